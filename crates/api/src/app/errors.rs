use axum::http::StatusCode;
use axum::response::IntoResponse;

use coachdata_infra::StoreError;

/// Body of every 500 response.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Body of every 400 response.
pub const INVALID_COACH_MESSAGE: &str = "Invalid coach data.";

/// Failures a coach handler can end in.
///
/// Bodies are plain text. Store errors of every kind become a generic 500;
/// their detail goes to the server log only. Malformed identifiers land there
/// too rather than on 400.
#[derive(Debug)]
pub enum ApiError {
    MalformedRequestBody,
    NotFound(String),
    Store(StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiError::MalformedRequestBody => {
                text_error(StatusCode::BAD_REQUEST, INVALID_COACH_MESSAGE)
            }
            ApiError::NotFound(id) => {
                text_error(StatusCode::NOT_FOUND, format!("Coach with ID {id} not found."))
            }
            ApiError::Store(_) => {
                text_error(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
            }
        }
    }
}

/// `text/plain` error response.
pub fn text_error(status: StatusCode, message: impl Into<String>) -> axum::response::Response {
    (status, message.into()).into_response()
}

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Extension, Path},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, put},
    Json, Router,
};

use crate::app::dto;
use crate::app::errors::ApiError;
use crate::app::services::AppServices;

/// Path prefix used in the `Location` header of created coaches.
pub const COACH_LOCATION_PREFIX: &str = "/api/Coach";

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_coaches).post(create_coach))
        .route("/:id", put(update_coach).delete(delete_coach))
}

pub async fn list_coaches(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.coaches().list_all().await {
        Ok(coaches) => (StatusCode::OK, Json(coaches)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "error fetching coaches");
            ApiError::Store(e).into_response()
        }
    }
}

pub async fn create_coach(
    Extension(services): Extension<Arc<AppServices>>,
    body: Bytes,
) -> axum::response::Response {
    let details = match dto::parse_coach_payload(&body) {
        Ok(d) => d,
        Err(e) => {
            tracing::info!(reason = %e, "rejected coach payload");
            return ApiError::MalformedRequestBody.into_response();
        }
    };

    match services.coaches().create(details).await {
        Ok(coach) => {
            let location = format!("{COACH_LOCATION_PREFIX}/{}", coach.id);
            tracing::info!(coach_id = %coach.id, "coach created");
            (
                StatusCode::CREATED,
                [(header::LOCATION, location)],
                Json(coach),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "error creating coach");
            ApiError::Store(e).into_response()
        }
    }
}

pub async fn update_coach(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Bytes,
) -> axum::response::Response {
    let details = match dto::parse_coach_payload(&body) {
        Ok(d) => d,
        Err(e) => {
            tracing::info!(coach_id = %id, reason = %e, "rejected coach payload");
            return ApiError::MalformedRequestBody.into_response();
        }
    };

    match services.coaches().replace(&id, details).await {
        Ok(Some(coach)) => (StatusCode::OK, Json(coach)).into_response(),
        Ok(None) => ApiError::NotFound(id).into_response(),
        Err(e) => {
            tracing::error!(coach_id = %id, error = %e, "error updating coach");
            ApiError::Store(e).into_response()
        }
    }
}

pub async fn delete_coach(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    match services.coaches().delete_by_id(&id).await {
        Ok(true) => {
            tracing::info!(coach_id = %id, "coach deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Ok(false) => ApiError::NotFound(id).into_response(),
        Err(e) => {
            tracing::error!(coach_id = %id, error = %e, "error deleting coach");
            ApiError::Store(e).into_response()
        }
    }
}

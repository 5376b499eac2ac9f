use axum::Router;

pub mod coaches;
pub mod system;

/// Router for all key-protected endpoints.
pub fn router() -> Router {
    Router::new().nest("/coaches", coaches::router())
}

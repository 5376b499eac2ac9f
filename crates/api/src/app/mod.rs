//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: store selection and shared handles
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: request body parsing
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs` and tests).
pub fn build_app(services: AppServices, function_key: Option<String>) -> Router {
    let auth_state = middleware::AuthState::new(function_key);
    let services = Arc::new(services);

    // Protected routes: require the invocation key.
    let protected = routes::router().layer(axum::middleware::from_fn_with_state(
        auth_state,
        middleware::function_key_middleware,
    ));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(protected)
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(middleware::request_tracing_middleware))
                .layer(Extension(services)),
        )
}

pub use services::AppServices;

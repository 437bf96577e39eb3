//! HTTP application wiring (axum router + service wiring).
//!
//! Layout:
//! - `services.rs`: backing-store wiring (in-memory or Postgres) + config
//! - `routes/`: HTTP routes + handlers (one file per domain area)
//! - `dto.rs`: forms, page payloads, and mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

pub use services::AppConfig;

/// Build the full HTTP router (public entrypoint used by `main.rs` and the
/// black-box tests).
pub async fn build_app(config: AppConfig) -> Router {
    let services = Arc::new(services::build_services(&config).await);

    Router::new()
        .route("/health", get(routes::system::health))
        .nest("/products", routes::products::router())
        .nest("/suppliers", routes::suppliers::router())
        .layer(Extension(services))
        .layer(axum::middleware::from_fn(middleware::request_log))
        .layer(ServiceBuilder::new())
}

//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: shared handler state (the database handle)
//! - `routes/`: HTTP routes + handlers (one file per resource)
//! - `dto.rs`: request helpers and response DTOs
//! - `errors.rs`: consistent error responses
//! - `stock_alerts.rs`: advisory stock warnings after product writes

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;

use stockroom_infra::Database;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;
pub mod stock_alerts;

/// Build the full HTTP router (public entrypoint used by `main.rs` and tests).
pub fn build_app(db: Database) -> Router {
    let services = Arc::new(services::AppServices::new(db));

    Router::new()
        .route("/health", get(routes::system::health))
        .route("/", get(routes::pages::products_page))
        .route("/suppliers", get(routes::pages::suppliers_page))
        .nest("/api", routes::router())
        .fallback(routes::system::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(middleware::trace_requests))
                .layer(axum::middleware::map_response(middleware::method_not_allowed_envelope))
                .layer(Extension(services)),
        )
}

use axum::Router;

pub mod orders;
pub mod pages;
pub mod products;
pub mod suppliers;
pub mod system;

/// Router for the JSON API under `/api`.
pub fn router() -> Router {
    Router::new()
        .nest("/products", products::router())
        .nest("/suppliers", suppliers::router())
        .nest("/orders", orders::router())
}

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use stockroom_core::OrderId;
use stockroom_orders::{CreateOrder, Order, OrderDetails};

use crate::app::dto;
use crate::app::errors::ApiError;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_orders).post(create_order))
        .route("/:id", get(get_order).delete(delete_order))
}

pub async fn list_orders(
    Extension(services): Extension<Arc<AppServices>>,
) -> Result<Json<Vec<Order>>, ApiError> {
    Ok(Json(services.db.orders().list().await?))
}

pub async fn get_order(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<Json<OrderDetails>, ApiError> {
    let id: OrderId = dto::parse_id(&id)?;
    Ok(Json(services.db.orders().get(id).await?))
}

pub async fn create_order(
    Extension(services): Extension<Arc<AppServices>>,
    payload: Result<Json<CreateOrder>, JsonRejection>,
) -> Result<(StatusCode, Json<OrderDetails>), ApiError> {
    let cmd = dto::body(payload)?;
    let order = services.db.orders().create(&cmd).await?;
    tracing::info!(
        order_id = order.order.id.get(),
        order_type = order.order.order_type.as_str(),
        lines = order.items.len(),
        "order recorded"
    );
    Ok((StatusCode::CREATED, Json(order)))
}

pub async fn delete_order(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<Json<dto::DeleteResponse>, ApiError> {
    let id: OrderId = dto::parse_id(&id)?;
    let deleted = services.db.orders().delete(id).await?;
    Ok(Json(dto::DeleteResponse::new("Order", deleted)))
}

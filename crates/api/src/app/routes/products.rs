use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use stockroom_core::ProductId;
use stockroom_products::{CreateProduct, Product, UpdateProduct};

use crate::app::errors::ApiError;
use crate::app::routes::system::csv_response;
use crate::app::services::AppServices;
use crate::app::{dto, stock_alerts};

pub fn router() -> Router {
    // Static segments win over `/:id`, so `low-stock` is never read as an id.
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/low-stock", get(list_low_stock))
        .route("/export.csv", get(export_products))
        .route(
            "/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
}

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
) -> Result<Json<Vec<Product>>, ApiError> {
    Ok(Json(services.db.products().list().await?))
}

pub async fn list_low_stock(
    Extension(services): Extension<Arc<AppServices>>,
) -> Result<Json<Vec<Product>>, ApiError> {
    Ok(Json(services.db.products().list_low_stock().await?))
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let id: ProductId = dto::parse_id(&id)?;
    Ok(Json(services.db.products().get(id).await?))
}

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    payload: Result<Json<CreateProduct>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let cmd = dto::body(payload)?;
    let product = services.db.products().create(&cmd).await?;
    stock_alerts::advise(&product);
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn update_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateProduct>, JsonRejection>,
) -> Result<Json<Product>, ApiError> {
    let id: ProductId = dto::parse_id(&id)?;
    let changes = dto::body(payload)?.into_changes()?;
    let product = services.db.products().update(id, changes).await?;
    stock_alerts::advise(&product);
    Ok(Json(product))
}

pub async fn delete_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<Json<dto::DeleteResponse>, ApiError> {
    let id: ProductId = dto::parse_id(&id)?;
    let deleted = services.db.products().delete(id).await?;
    Ok(Json(dto::DeleteResponse::new("Product", deleted)))
}

pub async fn export_products(
    Extension(services): Extension<Arc<AppServices>>,
) -> Result<axum::response::Response, ApiError> {
    let products = services.db.products().list().await?;
    let doc = stockroom_export::export(&products)?;
    Ok(csv_response(doc))
}

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::Response,
    routing::get,
    Json, Router,
};

use stockroom_core::SupplierId;
use stockroom_parties::{CreateSupplier, Supplier, UpdateSupplier};

use crate::app::dto;
use crate::app::errors::ApiError;
use crate::app::routes::system::csv_response;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_suppliers).post(create_supplier))
        .route("/export.csv", get(export_suppliers))
        .route(
            "/:id",
            get(get_supplier).put(update_supplier).delete(delete_supplier),
        )
}

pub async fn list_suppliers(
    Extension(services): Extension<Arc<AppServices>>,
) -> Result<Json<Vec<Supplier>>, ApiError> {
    Ok(Json(services.db.suppliers().list().await?))
}

pub async fn get_supplier(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<Json<Supplier>, ApiError> {
    let id: SupplierId = dto::parse_id(&id)?;
    Ok(Json(services.db.suppliers().get(id).await?))
}

pub async fn create_supplier(
    Extension(services): Extension<Arc<AppServices>>,
    payload: Result<Json<CreateSupplier>, JsonRejection>,
) -> Result<(StatusCode, Json<Supplier>), ApiError> {
    let cmd = dto::body(payload)?;
    let supplier = services.db.suppliers().create(&cmd).await?;
    Ok((StatusCode::CREATED, Json(supplier)))
}

pub async fn update_supplier(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateSupplier>, JsonRejection>,
) -> Result<Json<Supplier>, ApiError> {
    let id: SupplierId = dto::parse_id(&id)?;
    let changes = dto::body(payload)?.into_changes()?;
    Ok(Json(services.db.suppliers().update(id, changes).await?))
}

pub async fn delete_supplier(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<Json<dto::DeleteResponse>, ApiError> {
    let id: SupplierId = dto::parse_id(&id)?;
    let deleted = services.db.suppliers().delete(id).await?;
    Ok(Json(dto::DeleteResponse::new("Supplier", deleted)))
}

pub async fn export_suppliers(
    Extension(services): Extension<Arc<AppServices>>,
) -> Result<Response, ApiError> {
    let suppliers = services.db.suppliers().list().await?;
    let doc = stockroom_export::export(&suppliers)?;
    Ok(csv_response(doc))
}

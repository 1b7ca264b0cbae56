use std::str::FromStr;

use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde::Serialize;

use stockroom_core::DomainError;

use crate::app::errors::ApiError;

// -------------------------
// Request helpers
// -------------------------

/// Unwrap a JSON body, turning axum's rejection (malformed JSON, unknown or
/// mistyped fields, wrong content type) into a validation error.
pub fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload.map(|Json(body)| body).map_err(ApiError::from)
}

/// Parse a path segment into one of the typed ids.
pub fn parse_id<T>(raw: &str) -> Result<T, ApiError>
where
    T: FromStr<Err = DomainError>,
{
    raw.parse::<T>().map_err(ApiError::from)
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
    pub deleted: u64,
}

impl DeleteResponse {
    pub fn new(entity: &str, deleted: u64) -> Self {
        Self {
            message: format!("{entity} deleted"),
            deleted,
        }
    }
}

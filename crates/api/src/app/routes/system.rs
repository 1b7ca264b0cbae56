use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use stockroom_export::CsvDocument;

use crate::app::errors::json_error;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

/// JSON 404 for any path no router claims.
pub async fn not_found() -> Response {
    json_error(StatusCode::NOT_FOUND, "not_found", "route not found")
}

/// Serve a rendered CSV document as a file download.
pub fn csv_response(doc: CsvDocument) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, CsvDocument::CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, doc.content_disposition()),
        ],
        doc.content,
    )
        .into_response()
}

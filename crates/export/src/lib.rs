//! CSV export of loaded product and supplier lists.
//!
//! Shared by the HTTP download endpoints and the API client so both produce
//! byte-identical documents.

pub mod csv;

pub use csv::{export, CsvDocument, CsvField, CsvRecord, ExportError};

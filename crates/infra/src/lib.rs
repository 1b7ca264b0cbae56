//! Infrastructure layer: configuration, the SQLite store, and repositories.

pub mod config;
pub mod db;
pub mod error;
pub mod repository;

pub use config::{AppConfig, ConfigError};
pub use db::Database;
pub use error::StoreError;
pub use repository::{OrderRepository, ProductRepository, SupplierRepository};

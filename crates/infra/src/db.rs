//! SQLite connection pool and schema sync.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::config::AppConfig;
use crate::error::StoreError;
use crate::repository::{OrderRepository, ProductRepository, SupplierRepository};

/// Schema, created on startup if missing. There is no migration versioning.
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS products (
        id                  INTEGER PRIMARY KEY AUTOINCREMENT,
        name                TEXT    NOT NULL,
        description         TEXT    NULL,
        stock_quantity      INTEGER NOT NULL,
        reorder_level       INTEGER NOT NULL,
        maximum_stock_level INTEGER NOT NULL,
        price               REAL    NOT NULL,
        created_at          TEXT    NOT NULL,
        updated_at          TEXT    NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS products_name ON products (name)",
    r#"
    CREATE TABLE IF NOT EXISTS suppliers (
        id           INTEGER PRIMARY KEY AUTOINCREMENT,
        name         TEXT NOT NULL,
        contact_info TEXT NULL,
        created_at   TEXT NOT NULL,
        updated_at   TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS orders (
        id         INTEGER PRIMARY KEY AUTOINCREMENT,
        order_date TEXT NOT NULL,
        order_type TEXT NOT NULL CHECK (order_type IN ('sale', 'purchase')),
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS order_items (
        id             INTEGER PRIMARY KEY AUTOINCREMENT,
        order_id       INTEGER NOT NULL REFERENCES orders (id) ON DELETE CASCADE,
        product_id     INTEGER NULL REFERENCES products (id) ON DELETE SET NULL,
        quantity       INTEGER NOT NULL,
        price_at_order REAL    NOT NULL,
        created_at     TEXT    NOT NULL,
        updated_at     TEXT    NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS order_items_order_id ON order_items (order_id)",
    "CREATE INDEX IF NOT EXISTS order_items_product_id ON order_items (product_id)",
];

/// Handle to the relational store.
///
/// `SqlitePool` is `Send + Sync` and cheap to clone; repositories borrow it.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub async fn from_config(config: &AppConfig) -> Result<Self, StoreError> {
        Self::connect(&config.database_url).await
    }

    /// Open a pool for `url`.
    ///
    /// In-memory databases live only as long as their connection, so they are
    /// pinned to a single connection that is never recycled.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool_options = if is_in_memory(url) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(8)
        };

        let pool = pool_options.connect_with(options).await?;
        tracing::info!(url, "connected to database");
        Ok(Self { pool })
    }

    /// Open an in-memory database with the schema already in place.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let db = Self::connect("sqlite::memory:").await?;
        db.sync_schema().await?;
        Ok(db)
    }

    /// Create every table and index that does not exist yet.
    pub async fn sync_schema(&self) -> Result<(), StoreError> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        tracing::info!("database schema synced");
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn products(&self) -> ProductRepository<'_> {
        ProductRepository::new(&self.pool)
    }

    pub fn suppliers(&self) -> SupplierRepository<'_> {
        SupplierRepository::new(&self.pool)
    }

    pub fn orders(&self) -> OrderRepository<'_> {
        OrderRepository::new(&self.pool)
    }

    /// Wait for checked-out connections to return, then close the pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_in_memory_urls() {
        assert!(is_in_memory("sqlite::memory:"));
        assert!(is_in_memory("sqlite://file.db?mode=memory&cache=shared"));
        assert!(!is_in_memory("sqlite://inventory.sqlite?mode=rwc"));
    }

    #[tokio::test]
    async fn sync_schema_is_idempotent() {
        let db = Database::in_memory().await.unwrap();
        db.sync_schema().await.unwrap();

        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
        )
        .fetch_all(db.pool())
        .await
        .unwrap();
        let names: Vec<_> = tables.into_iter().map(|(n,)| n).collect();
        assert_eq!(names, vec!["order_items", "orders", "products", "suppliers"]);
    }

    #[tokio::test]
    async fn close_rejects_later_queries() {
        let db = Database::in_memory().await.unwrap();
        let handle = db.clone();
        db.close().await;

        assert!(handle.pool().is_closed());
        let err = handle.products().list().await.unwrap_err();
        assert!(matches!(err, StoreError::Database(sqlx::Error::PoolClosed)));
    }
}

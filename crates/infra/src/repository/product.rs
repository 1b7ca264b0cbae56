use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use stockroom_core::ProductId;
use stockroom_products::{CreateProduct, Product, ProductChanges};

use crate::error::StoreError;

const COLUMNS: &str = "id, name, description, stock_quantity, reorder_level, maximum_stock_level, price, created_at, updated_at";

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    description: Option<String>,
    stock_quantity: i64,
    reorder_level: i64,
    maximum_stock_level: i64,
    price: f64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: ProductId::new(row.id),
            name: row.name,
            description: row.description,
            stock_quantity: row.stock_quantity,
            reorder_level: row.reorder_level,
            maximum_stock_level: row.maximum_stock_level,
            price: row.price,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Product table access.
#[derive(Debug, Clone, Copy)]
pub struct ProductRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ProductRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Product>, StoreError> {
        let rows: Vec<ProductRow> =
            sqlx::query_as(&format!("SELECT {COLUMNS} FROM products ORDER BY id"))
                .fetch_all(self.pool)
                .await?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    pub async fn get(&self, id: ProductId) -> Result<Product, StoreError> {
        let row: Option<ProductRow> =
            sqlx::query_as(&format!("SELECT {COLUMNS} FROM products WHERE id = ?1"))
                .bind(id.get())
                .fetch_optional(self.pool)
                .await?;
        row.map(Product::from)
            .ok_or_else(|| StoreError::not_found("product"))
    }

    /// Products at or below their own reorder level.
    ///
    /// The threshold is a column of the same row, so the filter stays in SQL.
    pub async fn list_low_stock(&self) -> Result<Vec<Product>, StoreError> {
        let rows: Vec<ProductRow> = sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM products WHERE stock_quantity <= reorder_level ORDER BY id"
        ))
        .fetch_all(self.pool)
        .await?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    pub async fn create(&self, cmd: &CreateProduct) -> Result<Product, StoreError> {
        cmd.validate()?;
        let now = Utc::now();

        let row: ProductRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO products (
                name, description, stock_quantity, reorder_level, maximum_stock_level, price,
                created_at, updated_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&cmd.name)
        .bind(&cmd.description)
        .bind(cmd.stock_quantity)
        .bind(cmd.reorder_level)
        .bind(cmd.maximum_stock_level)
        .bind(cmd.price)
        .bind(now)
        .fetch_one(self.pool)
        .await?;

        tracing::debug!(product_id = row.id, "product created");
        Ok(row.into())
    }

    /// Apply the supplied columns to the product with `id`.
    ///
    /// An empty change set touches nothing and returns the current row.
    pub async fn update(&self, id: ProductId, changes: ProductChanges) -> Result<Product, StoreError> {
        if changes.is_empty() {
            return self.get(id).await;
        }

        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE products SET ");
        {
            let mut set = qb.separated(", ");
            if let Some(name) = changes.name {
                set.push("name = ");
                set.push_bind_unseparated(name);
            }
            if let Some(description) = changes.description {
                set.push("description = ");
                set.push_bind_unseparated(description);
            }
            if let Some(v) = changes.stock_quantity {
                set.push("stock_quantity = ");
                set.push_bind_unseparated(v);
            }
            if let Some(v) = changes.reorder_level {
                set.push("reorder_level = ");
                set.push_bind_unseparated(v);
            }
            if let Some(v) = changes.maximum_stock_level {
                set.push("maximum_stock_level = ");
                set.push_bind_unseparated(v);
            }
            if let Some(v) = changes.price {
                set.push("price = ");
                set.push_bind_unseparated(v);
            }
            set.push("updated_at = ");
            set.push_bind_unseparated(Utc::now());
        }

        qb.push(" WHERE id = ");
        qb.push_bind(id.get());
        qb.push(format!(" RETURNING {COLUMNS}"));

        let row: Option<ProductRow> = qb.build_query_as().fetch_optional(self.pool).await?;
        row.map(Product::from)
            .ok_or_else(|| StoreError::not_found("product"))
    }

    /// Delete the product with `id`, returning the number of rows removed.
    pub async fn delete(&self, id: ProductId) -> Result<u64, StoreError> {
        let deleted = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id.get())
            .execute(self.pool)
            .await?
            .rows_affected();

        if deleted == 0 {
            return Err(StoreError::not_found("product"));
        }
        Ok(deleted)
    }
}

use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use stockroom_core::SupplierId;
use stockroom_parties::{CreateSupplier, Supplier, SupplierChanges};

use crate::error::StoreError;

const COLUMNS: &str = "id, name, contact_info, created_at, updated_at";

#[derive(Debug, sqlx::FromRow)]
struct SupplierRow {
    id: i64,
    name: String,
    contact_info: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<SupplierRow> for Supplier {
    fn from(row: SupplierRow) -> Self {
        Supplier {
            id: SupplierId::new(row.id),
            name: row.name,
            contact_info: row.contact_info,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Supplier table access.
#[derive(Debug, Clone, Copy)]
pub struct SupplierRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> SupplierRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Supplier>, StoreError> {
        let rows: Vec<SupplierRow> =
            sqlx::query_as(&format!("SELECT {COLUMNS} FROM suppliers ORDER BY id"))
                .fetch_all(self.pool)
                .await?;
        Ok(rows.into_iter().map(Supplier::from).collect())
    }

    pub async fn get(&self, id: SupplierId) -> Result<Supplier, StoreError> {
        let row: Option<SupplierRow> =
            sqlx::query_as(&format!("SELECT {COLUMNS} FROM suppliers WHERE id = ?1"))
                .bind(id.get())
                .fetch_optional(self.pool)
                .await?;
        row.map(Supplier::from)
            .ok_or_else(|| StoreError::not_found("supplier"))
    }

    pub async fn create(&self, cmd: &CreateSupplier) -> Result<Supplier, StoreError> {
        cmd.validate()?;

        let row: SupplierRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO suppliers (name, contact_info, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?3)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&cmd.name)
        .bind(&cmd.contact_info)
        .bind(Utc::now())
        .fetch_one(self.pool)
        .await?;

        tracing::debug!(supplier_id = row.id, "supplier created");
        Ok(row.into())
    }

    pub async fn update(&self, id: SupplierId, changes: SupplierChanges) -> Result<Supplier, StoreError> {
        if changes.is_empty() {
            return self.get(id).await;
        }

        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE suppliers SET ");
        {
            let mut set = qb.separated(", ");
            if let Some(name) = changes.name {
                set.push("name = ");
                set.push_bind_unseparated(name);
            }
            if let Some(contact_info) = changes.contact_info {
                set.push("contact_info = ");
                set.push_bind_unseparated(contact_info);
            }
            set.push("updated_at = ");
            set.push_bind_unseparated(Utc::now());
        }

        qb.push(" WHERE id = ");
        qb.push_bind(id.get());
        qb.push(format!(" RETURNING {COLUMNS}"));

        let row: Option<SupplierRow> = qb.build_query_as().fetch_optional(self.pool).await?;
        row.map(Supplier::from)
            .ok_or_else(|| StoreError::not_found("supplier"))
    }

    pub async fn delete(&self, id: SupplierId) -> Result<u64, StoreError> {
        let deleted = sqlx::query("DELETE FROM suppliers WHERE id = ?1")
            .bind(id.get())
            .execute(self.pool)
            .await?
            .rows_affected();

        if deleted == 0 {
            return Err(StoreError::not_found("supplier"));
        }
        Ok(deleted)
    }
}

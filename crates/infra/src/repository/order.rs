use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use stockroom_core::{OrderId, OrderItemId, ProductId};
use stockroom_orders::{CreateOrder, Order, OrderDetails, OrderItem, OrderType};

use crate::error::StoreError;

const ORDER_COLUMNS: &str = "id, order_date, order_type, created_at, updated_at";
const ITEM_COLUMNS: &str = "id, order_id, product_id, quantity, price_at_order";

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i64,
    order_date: DateTime<Utc>,
    order_type: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = StoreError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let order_type = OrderType::parse(&row.order_type)
            .map_err(|e| StoreError::Corrupt(format!("order {}: {e}", row.id)))?;
        Ok(Order {
            id: OrderId::new(row.id),
            order_date: row.order_date,
            order_type,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct OrderItemRow {
    id: i64,
    order_id: i64,
    product_id: Option<i64>,
    quantity: i64,
    price_at_order: f64,
}

impl From<OrderItemRow> for OrderItem {
    fn from(row: OrderItemRow) -> Self {
        OrderItem {
            id: OrderItemId::new(row.id),
            order_id: OrderId::new(row.order_id),
            product_id: row.product_id.map(ProductId::new),
            quantity: row.quantity,
            price_at_order: row.price_at_order,
        }
    }
}

/// Order + order line access.
#[derive(Debug, Clone, Copy)]
pub struct OrderRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> OrderRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Order headers, without lines.
    pub async fn list(&self) -> Result<Vec<Order>, StoreError> {
        let rows: Vec<OrderRow> =
            sqlx::query_as(&format!("SELECT {ORDER_COLUMNS} FROM orders ORDER BY id"))
                .fetch_all(self.pool)
                .await?;
        rows.into_iter().map(Order::try_from).collect()
    }

    pub async fn get(&self, id: OrderId) -> Result<OrderDetails, StoreError> {
        let row: Option<OrderRow> =
            sqlx::query_as(&format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = ?1"))
                .bind(id.get())
                .fetch_optional(self.pool)
                .await?;
        let order: Order = row
            .ok_or_else(|| StoreError::not_found("order"))?
            .try_into()?;

        let items: Vec<OrderItemRow> = sqlx::query_as(&format!(
            "SELECT {ITEM_COLUMNS} FROM order_items WHERE order_id = ?1 ORDER BY id"
        ))
        .bind(id.get())
        .fetch_all(self.pool)
        .await?;

        Ok(OrderDetails {
            order,
            items: items.into_iter().map(OrderItem::from).collect(),
        })
    }

    /// Insert the order and all of its lines in one transaction.
    ///
    /// A line pointing at a missing product aborts the whole order.
    pub async fn create(&self, cmd: &CreateOrder) -> Result<OrderDetails, StoreError> {
        cmd.validate()?;
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let row: OrderRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO orders (order_date, order_type, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?3)
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(cmd.order_date.unwrap_or(now))
        .bind(cmd.order_type.as_str())
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;
        let order: Order = row.try_into()?;

        let mut items = Vec::with_capacity(cmd.items.len());
        for (idx, item) in cmd.items.iter().enumerate() {
            let inserted: Result<OrderItemRow, sqlx::Error> = sqlx::query_as(&format!(
                r#"
                INSERT INTO order_items (order_id, product_id, quantity, price_at_order, created_at, updated_at)
                VALUES (?1, ?2, ?3, ?4, ?5, ?5)
                RETURNING {ITEM_COLUMNS}
                "#
            ))
            .bind(order.id.get())
            .bind(item.product_id.get())
            .bind(item.quantity)
            .bind(item.price_at_order)
            .bind(now)
            .fetch_one(&mut *tx)
            .await;

            match inserted {
                Ok(row) => items.push(OrderItem::from(row)),
                Err(sqlx::Error::Database(db)) if db.is_foreign_key_violation() => {
                    return Err(StoreError::Validation(format!(
                        "items[{idx}].productId {} does not exist",
                        item.product_id
                    )));
                }
                Err(e) => return Err(e.into()),
            }
        }

        tx.commit().await?;
        tracing::debug!(order_id = order.id.get(), lines = items.len(), "order created");
        Ok(OrderDetails { order, items })
    }

    /// Delete an order; its lines go with it.
    pub async fn delete(&self, id: OrderId) -> Result<u64, StoreError> {
        let deleted = sqlx::query("DELETE FROM orders WHERE id = ?1")
            .bind(id.get())
            .execute(self.pool)
            .await?
            .rows_affected();

        if deleted == 0 {
            return Err(StoreError::not_found("order"));
        }
        Ok(deleted)
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult, Entity, OrderId, OrderItemId, ProductId};

/// Direction of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    Sale,
    Purchase,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Sale => "sale",
            OrderType::Purchase => "purchase",
        }
    }

    pub fn parse(s: &str) -> DomainResult<Self> {
        match s {
            "sale" => Ok(OrderType::Sale),
            "purchase" => Ok(OrderType::Purchase),
            other => Err(DomainError::validation(format!(
                "orderType must be one of: sale, purchase (got {other:?})"
            ))),
        }
    }
}

/// Order header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub order_date: DateTime<Utc>,
    pub order_type: OrderType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> OrderId {
        self.id
    }
}

/// Order line: product, quantity, unit price snapshot.
///
/// `product_id` becomes `None` once the product is deleted; the snapshot stays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: OrderItemId,
    pub order_id: OrderId,
    pub product_id: Option<ProductId>,
    pub quantity: i64,
    pub price_at_order: f64,
}

impl OrderItem {
    pub fn line_total(&self) -> f64 {
        self.quantity as f64 * self.price_at_order
    }
}

/// An order together with its lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetails {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}

impl OrderDetails {
    pub fn total(&self) -> f64 {
        self.items.iter().map(OrderItem::line_total).sum()
    }
}

/// Payload: create an order with its lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateOrder {
    pub order_type: OrderType,
    /// Defaults to the creation time.
    #[serde(default)]
    pub order_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub items: Vec<CreateOrderItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateOrderItem {
    pub product_id: ProductId,
    pub quantity: i64,
    pub price_at_order: f64,
}

impl CreateOrder {
    pub fn validate(&self) -> DomainResult<()> {
        for (idx, item) in self.items.iter().enumerate() {
            if item.quantity <= 0 {
                return Err(DomainError::validation(format!(
                    "items[{idx}].quantity must be positive"
                )));
            }
            if !item.price_at_order.is_finite() {
                return Err(DomainError::validation(format!(
                    "items[{idx}].priceAtOrder must be a finite number"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_type_round_trips_lowercase() {
        let t: OrderType = serde_json::from_str(r#""purchase""#).unwrap();
        assert_eq!(t, OrderType::Purchase);
        assert_eq!(OrderType::parse(t.as_str()).unwrap(), t);
        assert!(OrderType::parse("refund").is_err());
    }

    #[test]
    fn create_order_requires_order_type() {
        let err = serde_json::from_str::<CreateOrder>(r#"{"items":[]}"#).unwrap_err();
        assert!(err.to_string().contains("orderType"));
    }

    #[test]
    fn create_order_defaults_date_and_items() {
        let cmd: CreateOrder = serde_json::from_str(r#"{"orderType":"sale"}"#).unwrap();
        assert_eq!(cmd.order_date, None);
        assert!(cmd.items.is_empty());
        assert!(cmd.validate().is_ok());
    }

    #[test]
    fn create_order_rejects_non_positive_quantity() {
        let cmd: CreateOrder = serde_json::from_str(
            r#"{"orderType":"sale","items":[{"productId":1,"quantity":0,"priceAtOrder":2.5}]}"#,
        )
        .unwrap();
        match cmd.validate() {
            Err(DomainError::Validation(msg)) => assert!(msg.contains("items[0].quantity")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn details_total_sums_snapshots() {
        let now = Utc::now();
        let details = OrderDetails {
            order: Order {
                id: OrderId::new(1),
                order_date: now,
                order_type: OrderType::Sale,
                created_at: now,
                updated_at: now,
            },
            items: vec![
                OrderItem {
                    id: OrderItemId::new(1),
                    order_id: OrderId::new(1),
                    product_id: Some(ProductId::new(3)),
                    quantity: 2,
                    price_at_order: 1.5,
                },
                OrderItem {
                    id: OrderItemId::new(2),
                    order_id: OrderId::new(1),
                    product_id: None,
                    quantity: 1,
                    price_at_order: 4.0,
                },
            ],
        };
        assert_eq!(details.total(), 7.0);

        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json["orderType"], "sale");
        assert_eq!(json["items"].as_array().unwrap().len(), 2);
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{ensure_not_blank, DomainError, DomainResult, Entity, ProductId};

/// A stocked product.
///
/// The stock thresholds are stored as given; `0 <= stock_quantity` and
/// `reorder_level <= maximum_stock_level` are expected but never enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub stock_quantity: i64,
    pub reorder_level: i64,
    pub maximum_stock_level: i64,
    pub price: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> ProductId {
        self.id
    }
}

/// Payload: create a product.
///
/// Every field except `description` is required; unknown fields are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateProduct {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub stock_quantity: i64,
    pub reorder_level: i64,
    pub maximum_stock_level: i64,
    pub price: f64,
}

impl CreateProduct {
    pub fn validate(&self) -> DomainResult<()> {
        ensure_not_blank("name", &self.name)?;
        ensure_finite_price(self.price)
    }
}

/// Payload: update a product.
///
/// Absent fields are left untouched. `null` clears `description`; `null` for
/// any required field is a validation error (see [`UpdateProduct::into_changes`]).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateProduct {
    #[serde(default, with = "stockroom_core::nullable", skip_serializing_if = "Option::is_none")]
    pub name: Option<Option<String>>,
    #[serde(default, with = "stockroom_core::nullable", skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(default, with = "stockroom_core::nullable", skip_serializing_if = "Option::is_none")]
    pub stock_quantity: Option<Option<i64>>,
    #[serde(default, with = "stockroom_core::nullable", skip_serializing_if = "Option::is_none")]
    pub reorder_level: Option<Option<i64>>,
    #[serde(default, with = "stockroom_core::nullable", skip_serializing_if = "Option::is_none")]
    pub maximum_stock_level: Option<Option<i64>>,
    #[serde(default, with = "stockroom_core::nullable", skip_serializing_if = "Option::is_none")]
    pub price: Option<Option<f64>>,
}

/// Validated set of column changes for a product update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub stock_quantity: Option<i64>,
    pub reorder_level: Option<i64>,
    pub maximum_stock_level: Option<i64>,
    pub price: Option<f64>,
}

impl ProductChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.stock_quantity.is_none()
            && self.reorder_level.is_none()
            && self.maximum_stock_level.is_none()
            && self.price.is_none()
    }
}

impl UpdateProduct {
    pub fn into_changes(self) -> DomainResult<ProductChanges> {
        let name = required("name", self.name)?;
        if let Some(name) = &name {
            ensure_not_blank("name", name)?;
        }
        let price = required("price", self.price)?;
        if let Some(price) = price {
            ensure_finite_price(price)?;
        }

        Ok(ProductChanges {
            name,
            description: self.description,
            stock_quantity: required("stockQuantity", self.stock_quantity)?,
            reorder_level: required("reorderLevel", self.reorder_level)?,
            maximum_stock_level: required("maximumStockLevel", self.maximum_stock_level)?,
            price,
        })
    }
}

fn required<T>(field: &str, value: Option<Option<T>>) -> DomainResult<Option<T>> {
    match value {
        None => Ok(None),
        Some(Some(v)) => Ok(Some(v)),
        Some(None) => Err(DomainError::required(field)),
    }
}

fn ensure_finite_price(price: f64) -> DomainResult<()> {
    if !price.is_finite() {
        return Err(DomainError::validation("price must be a finite number"));
    }
    Ok(())
}

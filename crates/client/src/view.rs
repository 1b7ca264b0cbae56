//! Table rows as the product page renders them.

use stockroom_inventory::{classify_product, StockStatus};
use stockroom_products::Product;

/// One rendered product table row.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRow {
    /// Name with the stock label appended, e.g. `"Widget ⚠️ Low Stock"`.
    pub name: String,
    pub description: String,
    pub stock_quantity: i64,
    pub reorder_level: i64,
    pub maximum_stock_level: i64,
    pub price: String,
    pub status: StockStatus,
}

impl ProductRow {
    pub fn from_product(product: &Product) -> Self {
        let status = classify_product(product);
        let label = status.label();
        let name = if label.is_empty() {
            product.name.clone()
        } else {
            format!("{} ⚠️ {}", product.name, label)
        };

        Self {
            name,
            description: product.description.clone().unwrap_or_default(),
            stock_quantity: product.stock_quantity,
            reorder_level: product.reorder_level,
            maximum_stock_level: product.maximum_stock_level,
            price: product.price.to_string(),
            status,
        }
    }

    pub fn rows(products: &[Product]) -> Vec<Self> {
        products.iter().map(Self::from_product).collect()
    }
}

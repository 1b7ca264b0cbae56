//! Advisory stock notices emitted after product writes.
//!
//! These never block a write or alter the stored row.

use stockroom_inventory::{classify_product, StockFlag};
use stockroom_products::Product;

/// Log a warning for each advisory flag on `product`, returning the flags logged.
pub fn advise(product: &Product) -> Vec<StockFlag> {
    let status = classify_product(product);
    let flags: Vec<StockFlag> = status.advisories().collect();

    for flag in &flags {
        match flag {
            StockFlag::LowStock => tracing::warn!(
                product_id = product.id.get(),
                name = %product.name,
                stock_quantity = product.stock_quantity,
                reorder_level = product.reorder_level,
                "product at or below reorder level"
            ),
            StockFlag::Overstocked => tracing::warn!(
                product_id = product.id.get(),
                name = %product.name,
                stock_quantity = product.stock_quantity,
                maximum_stock_level = product.maximum_stock_level,
                "product above maximum stock level"
            ),
            StockFlag::CriticalStock => {}
        }
    }

    flags
}

//! Inventory domain module: stock level classification.
//!
//! Pure, stateless rules over a product's quantity fields (no IO, no storage).

pub mod stock;

pub use stock::{classify, classify_product, StockFlag, StockStatus};

use serde::{Deserialize, Serialize};

use stockroom_products::Product;

/// Percentage of the maximum stock level at or below which stock is critical.
pub const CRITICAL_PERCENT: i64 = 10;

/// A single stock classification flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockFlag {
    LowStock,
    Overstocked,
    CriticalStock,
}

impl StockFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockFlag::LowStock => "LOW_STOCK",
            StockFlag::Overstocked => "OVERSTOCKED",
            StockFlag::CriticalStock => "CRITICAL_STOCK",
        }
    }

    /// Human-readable label used in tables.
    pub fn label(&self) -> &'static str {
        match self {
            StockFlag::LowStock => "Low Stock",
            StockFlag::Overstocked => "Overstocked",
            StockFlag::CriticalStock => "Critical",
        }
    }
}

/// Result of [`classify`]: the set of flags that apply to a product.
///
/// `LOW_STOCK` and `OVERSTOCKED` are mutually exclusive; `CRITICAL_STOCK` is
/// evaluated independently and usually accompanies `LOW_STOCK`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct StockStatus {
    low: bool,
    overstocked: bool,
    critical: bool,
}

impl StockStatus {
    pub fn contains(&self, flag: StockFlag) -> bool {
        match flag {
            StockFlag::LowStock => self.low,
            StockFlag::Overstocked => self.overstocked,
            StockFlag::CriticalStock => self.critical,
        }
    }

    /// Flags in priority order.
    pub fn flags(&self) -> Vec<StockFlag> {
        [StockFlag::LowStock, StockFlag::Overstocked, StockFlag::CriticalStock]
            .into_iter()
            .filter(|f| self.contains(*f))
            .collect()
    }

    pub fn is_normal(&self) -> bool {
        !(self.low || self.overstocked || self.critical)
    }

    /// Flags that warrant a reorder/overstock notice after a write.
    pub fn advisories(&self) -> impl Iterator<Item = StockFlag> + '_ {
        self.flags()
            .into_iter()
            .filter(|f| matches!(f, StockFlag::LowStock | StockFlag::Overstocked))
    }

    /// Display text, e.g. `"Low Stock, Critical"`; empty when normal.
    pub fn label(&self) -> String {
        self.flags()
            .iter()
            .map(StockFlag::label)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Classify stock from a product's quantity fields.
///
/// 1. `stock_quantity <= reorder_level` → `LOW_STOCK`
/// 2. otherwise `stock_quantity > maximum_stock_level` → `OVERSTOCKED`
/// 3. independently, stock at or below 10% of `maximum_stock_level` → `CRITICAL_STOCK`
///
/// A non-positive `maximum_stock_level` has no meaningful percentage, so the
/// critical check is skipped for it. The comparison is done on widened
/// integers (`stock * 100 <= 10 * max`), so no input can fault.
pub fn classify(stock_quantity: i64, reorder_level: i64, maximum_stock_level: i64) -> StockStatus {
    let low = stock_quantity <= reorder_level;
    let overstocked = !low && stock_quantity > maximum_stock_level;

    let critical = maximum_stock_level > 0
        && i128::from(stock_quantity) * 100
            <= i128::from(CRITICAL_PERCENT) * i128::from(maximum_stock_level);

    StockStatus {
        low,
        overstocked,
        critical,
    }
}

pub fn classify_product(product: &Product) -> StockStatus {
    classify(
        product.stock_quantity,
        product.reorder_level,
        product.maximum_stock_level,
    )
}

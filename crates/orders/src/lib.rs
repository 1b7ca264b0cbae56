//! Orders domain module.
//!
//! An order is either a sale or a purchase; its lines snapshot quantity and
//! unit price at order time. Orders never move stock by themselves.

pub mod order;

pub use order::{CreateOrder, CreateOrderItem, Order, OrderDetails, OrderItem, OrderType};

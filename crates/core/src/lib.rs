//! `stockroom-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod entity;
pub mod error;
pub mod id;
pub mod nullable;

pub use entity::Entity;
pub use error::{ensure_not_blank, DomainError, DomainResult};
pub use id::{OrderId, OrderItemId, ProductId, SupplierId};

//! Products domain module.
//!
//! This crate contains the product record and the typed write payloads accepted
//! for it, implemented purely as domain logic (no IO, no HTTP, no storage).

pub mod product;

pub use product::{CreateProduct, Product, ProductChanges, UpdateProduct};

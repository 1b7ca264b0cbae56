//! Parties domain module: the suppliers products are bought from.
//!
//! Suppliers are not linked to products; the vendor relationship is tracked
//! outside this system.

pub mod supplier;

pub use supplier::{CreateSupplier, Supplier, SupplierChanges, UpdateSupplier};

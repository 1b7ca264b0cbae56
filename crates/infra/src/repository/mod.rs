//! Repositories over the SQLite pool, one per table family.
//!
//! Each repository borrows the pool and maps rows into domain values; every
//! call is a single attempt (no retries).

pub mod order;
pub mod product;
pub mod supplier;

pub use order::OrderRepository;
pub use product::ProductRepository;
pub use supplier::SupplierRepository;

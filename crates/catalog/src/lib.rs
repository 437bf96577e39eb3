//! `vitrine-catalog` — catalog domain entities.

pub mod product;
pub mod supplier;

pub use product::{Product, ProductWithSupplier};
pub use supplier::Supplier;

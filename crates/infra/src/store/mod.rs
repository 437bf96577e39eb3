//! Catalog repository contracts.
//!
//! The edit flow consumes these two traits and never sees a concrete store.
//! Expected validation failures are reported through the notification
//! collector upstream; errors here are genuine storage faults.

use async_trait::async_trait;
use thiserror::Error;

use vitrine_catalog::{Product, ProductWithSupplier, Supplier};
use vitrine_core::ProductId;

pub mod in_memory;
pub mod postgres;

/// Storage-level failure. Fatal to the current request only.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Read side of the catalog repository.
#[async_trait]
pub trait CatalogReader: Send + Sync {
    /// All products, each joined with its supplier.
    async fn products_with_suppliers(&self) -> StoreResult<Vec<ProductWithSupplier>>;

    /// One product joined with its supplier, or `None`.
    async fn product_with_supplier(&self, id: ProductId) -> StoreResult<Option<ProductWithSupplier>>;

    /// The full supplier reference list, for selection controls.
    async fn suppliers(&self) -> StoreResult<Vec<Supplier>>;
}

/// Write side of the catalog repository. Fire-and-forget from the caller's
/// perspective; no diagnostics beyond the error channel.
#[async_trait]
pub trait CatalogWriter: Send + Sync {
    async fn add_product(&self, product: Product) -> StoreResult<()>;

    async fn update_product(&self, product: Product) -> StoreResult<()>;

    /// Idempotent: deleting an absent id is not an error.
    async fn delete_product(&self, id: ProductId) -> StoreResult<()>;
}

//! Catalog product, the entity managed by the admin edit flow.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use vitrine_core::{Entity, ProductId, SupplierId};

/// A product offered in the catalog. References exactly one [`crate::Supplier`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub supplier_id: SupplierId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    /// Stored image filename, `None` until an upload completes.
    pub image: Option<String>,
}

impl Product {
    /// New product with a fresh id and creation timestamp; no image yet.
    pub fn new(
        supplier_id: SupplierId,
        name: impl Into<String>,
        description: impl Into<String>,
        price: Decimal,
        active: bool,
    ) -> Self {
        Self {
            id: ProductId::new(),
            supplier_id,
            name: name.into(),
            description: description.into(),
            price,
            active,
            created_at: Utc::now(),
            image: None,
        }
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// A product joined with its supplier, the shape the read side returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductWithSupplier {
    pub product: Product,
    pub supplier: crate::Supplier,
}

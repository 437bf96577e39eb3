//! In-memory catalog store for dev/test.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use vitrine_catalog::{Product, ProductWithSupplier, Supplier};
use vitrine_core::{ProductId, SupplierId};

use super::{CatalogReader, CatalogWriter, StoreResult};

/// RwLock-guarded maps; clones out on read so no lock is held across awaits.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    products: RwLock<HashMap<ProductId, Product>>,
    suppliers: RwLock<HashMap<SupplierId, Supplier>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_suppliers(suppliers: impl IntoIterator<Item = Supplier>) -> Self {
        let store = Self::new();
        for supplier in suppliers {
            store.insert_supplier(supplier);
        }
        store
    }

    pub fn insert_supplier(&self, supplier: Supplier) {
        if let Ok(mut map) = self.suppliers.write() {
            map.insert(supplier.id, supplier);
        }
    }

    fn join(&self, product: Product) -> Option<ProductWithSupplier> {
        let suppliers = self.suppliers.read().ok()?;
        match suppliers.get(&product.supplier_id) {
            Some(supplier) => Some(ProductWithSupplier {
                supplier: supplier.clone(),
                product,
            }),
            None => {
                tracing::warn!(product_id = %product.id, "product references an unknown supplier");
                None
            }
        }
    }
}

#[async_trait]
impl CatalogReader for InMemoryCatalog {
    async fn products_with_suppliers(&self) -> StoreResult<Vec<ProductWithSupplier>> {
        let products: Vec<Product> = match self.products.read() {
            Ok(map) => map.values().cloned().collect(),
            Err(_) => vec![],
        };

        let mut joined: Vec<ProductWithSupplier> =
            products.into_iter().filter_map(|p| self.join(p)).collect();
        joined.sort_by(|a, b| a.product.created_at.cmp(&b.product.created_at));
        Ok(joined)
    }

    async fn product_with_supplier(&self, id: ProductId) -> StoreResult<Option<ProductWithSupplier>> {
        let product = match self.products.read() {
            Ok(map) => map.get(&id).cloned(),
            Err(_) => None,
        };
        Ok(product.and_then(|p| self.join(p)))
    }

    async fn suppliers(&self) -> StoreResult<Vec<Supplier>> {
        let mut suppliers: Vec<Supplier> = match self.suppliers.read() {
            Ok(map) => map.values().cloned().collect(),
            Err(_) => vec![],
        };
        suppliers.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(suppliers)
    }
}

#[async_trait]
impl CatalogWriter for InMemoryCatalog {
    async fn add_product(&self, product: Product) -> StoreResult<()> {
        if let Ok(mut map) = self.products.write() {
            map.insert(product.id, product);
        }
        Ok(())
    }

    async fn update_product(&self, product: Product) -> StoreResult<()> {
        if let Ok(mut map) = self.products.write() {
            map.insert(product.id, product);
        }
        Ok(())
    }

    async fn delete_product(&self, id: ProductId) -> StoreResult<()> {
        if let Ok(mut map) = self.products.write() {
            map.remove(&id);
        }
        Ok(())
    }
}

//! Postgres-backed catalog store.
//!
//! Uses the sqlx connection pool (thread-safe, `Send + Sync`). Referential
//! integrity between products and suppliers is enforced by the schema; the
//! repository surfaces any violation as a [`StoreError`].

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use tracing::instrument;
use uuid::Uuid;

use vitrine_catalog::{Product, ProductWithSupplier, Supplier};
use vitrine_core::ProductId;

use super::{CatalogReader, CatalogWriter, StoreResult};
use async_trait::async_trait;

#[derive(Debug, Clone)]
pub struct PostgresCatalog {
    pool: Arc<PgPool>,
}

/// Flat row of the product/supplier join.
#[derive(Debug, FromRow)]
struct ProductSupplierRow {
    id: Uuid,
    supplier_id: Uuid,
    name: String,
    description: String,
    price: Decimal,
    active: bool,
    created_at: DateTime<Utc>,
    image: Option<String>,
    supplier_name: String,
    supplier_document: String,
    supplier_active: bool,
}

#[derive(Debug, FromRow)]
struct SupplierRow {
    id: Uuid,
    name: String,
    document: String,
    active: bool,
}

const JOIN_SELECT: &str = "SELECT p.id, p.supplier_id, p.name, p.description, p.price, p.active, \
     p.created_at, p.image, s.name AS supplier_name, s.document AS supplier_document, \
     s.active AS supplier_active \
     FROM products p JOIN suppliers s ON s.id = p.supplier_id";

impl PostgresCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Create the catalog tables when they do not exist yet.
    #[instrument(skip(self), err)]
    pub async fn ensure_schema(&self) -> StoreResult<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS suppliers (\
                 id UUID PRIMARY KEY, \
                 name TEXT NOT NULL, \
                 document TEXT NOT NULL, \
                 active BOOLEAN NOT NULL\
             )",
        )
        .execute(self.pool.as_ref())
        .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS products (\
                 id UUID PRIMARY KEY, \
                 supplier_id UUID NOT NULL REFERENCES suppliers(id), \
                 name TEXT NOT NULL, \
                 description TEXT NOT NULL, \
                 price NUMERIC(18, 2) NOT NULL, \
                 active BOOLEAN NOT NULL, \
                 created_at TIMESTAMPTZ NOT NULL, \
                 image TEXT\
             )",
        )
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }
}

fn row_to_joined(row: ProductSupplierRow) -> ProductWithSupplier {
    ProductWithSupplier {
        product: Product {
            id: row.id.into(),
            supplier_id: row.supplier_id.into(),
            name: row.name,
            description: row.description,
            price: row.price,
            active: row.active,
            created_at: row.created_at,
            image: row.image,
        },
        supplier: Supplier {
            id: row.supplier_id.into(),
            name: row.supplier_name,
            document: row.supplier_document,
            active: row.supplier_active,
        },
    }
}

#[async_trait]
impl CatalogReader for PostgresCatalog {
    async fn products_with_suppliers(&self) -> StoreResult<Vec<ProductWithSupplier>> {
        let rows: Vec<ProductSupplierRow> =
            sqlx::query_as(&format!("{JOIN_SELECT} ORDER BY p.created_at"))
                .fetch_all(self.pool.as_ref())
                .await?;

        Ok(rows.into_iter().map(row_to_joined).collect())
    }

    async fn product_with_supplier(&self, id: ProductId) -> StoreResult<Option<ProductWithSupplier>> {
        let row: Option<ProductSupplierRow> =
            sqlx::query_as(&format!("{JOIN_SELECT} WHERE p.id = $1"))
                .bind(*id.as_uuid())
                .fetch_optional(self.pool.as_ref())
                .await?;

        Ok(row.map(row_to_joined))
    }

    async fn suppliers(&self) -> StoreResult<Vec<Supplier>> {
        let rows: Vec<SupplierRow> =
            sqlx::query_as("SELECT id, name, document, active FROM suppliers ORDER BY name")
                .fetch_all(self.pool.as_ref())
                .await?;

        Ok(rows
            .into_iter()
            .map(|r| Supplier {
                id: r.id.into(),
                name: r.name,
                document: r.document,
                active: r.active,
            })
            .collect())
    }
}

#[async_trait]
impl CatalogWriter for PostgresCatalog {
    async fn add_product(&self, product: Product) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO products (id, supplier_id, name, description, price, active, created_at, image) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(*product.id.as_uuid())
        .bind(*product.supplier_id.as_uuid())
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.active)
        .bind(product.created_at)
        .bind(&product.image)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn update_product(&self, product: Product) -> StoreResult<()> {
        sqlx::query(
            "UPDATE products SET supplier_id = $2, name = $3, description = $4, price = $5, \
             active = $6, image = $7 WHERE id = $1",
        )
        .bind(*product.id.as_uuid())
        .bind(*product.supplier_id.as_uuid())
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.active)
        .bind(&product.image)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn delete_product(&self, id: ProductId) -> StoreResult<()> {
        // DELETE of an absent row affects zero rows; that is the idempotent contract.
        sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(*id.as_uuid())
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }
}

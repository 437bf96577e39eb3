use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use vitrine_catalog::{Product, ProductWithSupplier, Supplier};
use vitrine_core::money::{self, ClientRule};
use vitrine_core::{DomainError, Notifier, SupplierId};

// -------------------------
// Form input
// -------------------------

/// Raw product form fields, kept exactly as submitted so a failed request
/// re-renders them unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub supplier_id: String,
    #[serde(default)]
    pub active: bool,
}

/// Validated form output, ready to become a `Product`.
#[derive(Debug, Clone)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub supplier_id: SupplierId,
    pub active: bool,
}

impl ProductForm {
    /// Structural validation. Every failure lands on the notifier; `None`
    /// means at least one did.
    pub fn validate(&self, notifier: &mut Notifier) -> Option<ProductDraft> {
        let mut ok = true;

        if self.name.trim().is_empty() {
            notifier.notify("name is required");
            ok = false;
        }
        if self.description.trim().is_empty() {
            notifier.notify("description is required");
            ok = false;
        }

        let price = match money::parse_amount(&self.price) {
            Ok(price) => Some(price),
            Err(DomainError::Validation(msg)) => {
                notifier.notify(msg);
                ok = false;
                None
            }
            Err(e) => {
                notifier.notify(e.to_string());
                ok = false;
                None
            }
        };

        let supplier_id = match self.supplier_id.parse::<SupplierId>() {
            Ok(id) => Some(id),
            Err(_) => {
                notifier.notify("a supplier must be selected");
                ok = false;
                None
            }
        };

        if !ok {
            return None;
        }

        Some(ProductDraft {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            price: price?,
            supplier_id: supplier_id?,
            active: self.active,
        })
    }

    /// Pre-fill a form from a stored product (edit/detail flows).
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.to_string(),
            supplier_id: product.supplier_id.to_string(),
            active: product.active,
        }
    }
}

// -------------------------
// Presentation shapes
// -------------------------

#[derive(Debug, Serialize)]
pub struct SupplierView {
    pub id: String,
    pub name: String,
    pub document: String,
    pub active: bool,
}

#[derive(Debug, Serialize)]
pub struct ProductView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub active: bool,
    pub created_at: String,
    pub image: Option<String>,
    pub supplier: SupplierView,
}

pub fn supplier_view(supplier: Supplier) -> SupplierView {
    SupplierView {
        id: supplier.id.to_string(),
        name: supplier.name,
        document: supplier.document,
        active: supplier.active,
    }
}

pub fn product_view(joined: ProductWithSupplier) -> ProductView {
    ProductView {
        id: joined.product.id.to_string(),
        name: joined.product.name,
        description: joined.product.description,
        price: joined.product.price.to_string(),
        active: joined.product.active,
        created_at: joined.product.created_at.to_rfc3339(),
        image: joined.product.image,
        supplier: supplier_view(joined.supplier),
    }
}

// -------------------------
// Page payloads
// -------------------------

#[derive(Debug, Serialize)]
pub struct ProductListPage {
    pub products: Vec<ProductView>,
}

#[derive(Debug, Serialize)]
pub struct ProductDetailPage {
    pub product: ProductView,
}

#[derive(Debug, Serialize)]
pub struct DeleteConfirmPage {
    pub product: ProductView,
}

#[derive(Debug, Serialize)]
pub struct SupplierListPage {
    pub suppliers: Vec<SupplierView>,
}

/// The create/edit form page: submitted (or pre-filled) values, the supplier
/// selection list, collected notifications, and the client-side price rule.
#[derive(Debug, Serialize)]
pub struct ProductFormPage {
    pub form: ProductForm,
    pub suppliers: Vec<SupplierView>,
    pub notifications: Vec<String>,
    pub price_rule: ClientRule,
}

impl ProductFormPage {
    pub fn new(form: ProductForm, suppliers: Vec<Supplier>, notifier: &Notifier) -> Self {
        Self {
            form,
            suppliers: suppliers.into_iter().map(supplier_view).collect(),
            notifications: notifier
                .all()
                .iter()
                .map(|n| n.message().to_string())
                .collect(),
            price_rule: money::CURRENCY_RULE,
        }
    }
}

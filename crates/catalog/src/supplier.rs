//! Supplier reference data.
//!
//! Suppliers are maintained by a parallel flow; from the catalog admin's
//! perspective they are read-only options for a product's supplier reference.

use serde::{Deserialize, Serialize};

use vitrine_core::{Entity, SupplierId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: SupplierId,
    pub name: String,
    /// Registration/document number.
    pub document: String,
    pub active: bool,
}

impl Supplier {
    pub fn new(name: impl Into<String>, document: impl Into<String>, active: bool) -> Self {
        Self {
            id: SupplierId::new(),
            name: name.into(),
            document: document.into(),
            active,
        }
    }
}

impl Entity for Supplier {
    type Id = SupplierId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

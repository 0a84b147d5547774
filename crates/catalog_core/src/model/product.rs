//! Product domain model.
//!
//! # Responsibility
//! - Define the canonical product record persisted by stores.
//! - Provide constructors for unsaved and already-identified products.
//!
//! # Invariants
//! - `id` is `None` until a store assigns one on save.
//! - An assigned `id` is never reused for another product by the same store.

use serde::{Deserialize, Serialize};

/// Store-assigned product identifier.
pub type ProductId = i64;

/// Catalog product record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Assigned by the store on first save.
    pub id: Option<ProductId>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Unit price in minor currency units.
    #[serde(default)]
    pub price_cents: i64,
}

impl Product {
    /// Creates an unsaved product with no id and a zero price.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: None,
            price_cents: 0,
        }
    }

    /// Creates a product carrying a caller-provided id.
    ///
    /// Saving it upserts the record stored under that id.
    pub fn with_id(id: ProductId, name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            ..Self::new(name)
        }
    }

    /// Returns whether a store has assigned this product an id.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

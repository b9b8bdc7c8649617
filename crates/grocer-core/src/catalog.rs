//! # Catalog
//!
//! Products and the master catalog.
//!
//! ## Dual-Key Identity Pattern
//! Every product has:
//! - `id`: UUID v4 - immutable, used for inventory membership and cart removal
//! - `name`: business key - human readable, unique within one catalog
//!
//! Two `Product` values with the same name but different ids are different
//! items. Only [`crate::pricing::missing_items`] compares by name.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::Category;

// =============================================================================
// Product
// =============================================================================

/// A product that stores may stock. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    id: String,
    name: String,
    category: Category,
    /// Same price everywhere; store modifiers never apply.
    uniform: bool,
    base_price: Money,
}

impl Product {
    /// Creates a product with a freshly generated id.
    pub fn new(name: impl Into<String>, category: Category, uniform: bool, base_price: Money) -> Self {
        Product {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            category,
            uniform,
            base_price,
        }
    }

    /// Unique identifier (UUID v4).
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn category(&self) -> Category {
        self.category
    }

    #[inline]
    pub fn is_uniform(&self) -> bool {
        self.uniform
    }

    #[inline]
    pub fn base_price(&self) -> Money {
        self.base_price
    }

    /// Identity comparison (by id, never by name).
    #[inline]
    pub fn is_same_item(&self, other: &Product) -> bool {
        self.id == other.id
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// The fixed master list of products, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new() -> Self {
        Catalog::default()
    }

    /// Adds a product.
    ///
    /// ## Errors
    /// `ValidationError::Duplicate` if a product with the same name exists.
    pub fn insert(&mut self, product: Product) -> CoreResult<()> {
        if self.find_by_name(product.name()).is_some() {
            return Err(ValidationError::Duplicate {
                field: "product name".to_string(),
                value: product.name().to_string(),
            }
            .into());
        }
        self.products.push(product);
        Ok(())
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.name() == name)
    }

    /// Looks a name up, failing with `CoreError::ProductNotFound`.
    pub fn require(&self, name: &str) -> CoreResult<&Product> {
        self.find_by_name(name)
            .ok_or_else(|| CoreError::ProductNotFound(name.to_string()))
    }

    /// Whether this exact product (by id) belongs to the catalog.
    pub fn contains(&self, product: &Product) -> bool {
        self.products.iter().any(|p| p.is_same_item(product))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

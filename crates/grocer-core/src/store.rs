//! # Store
//!
//! A store is a named map location with an inventory and a price policy.
//!
//! ## Price Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  modifier_for(product)                                                  │
//! │                                                                         │
//! │   product.uniform? ──yes──► ×1.0                                        │
//! │          │                                                              │
//! │          no                                                             │
//! │          ▼                                                              │
//! │   category listed? ──yes──► listed modifier (e.g. DAIRY ×0.93)          │
//! │          │                                                              │
//! │          no                                                             │
//! │          ▼                                                              │
//! │   store default modifier (e.g. ×1.05)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Policies are plain data built at start-up; nothing dispatches on the
//! store's name.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::catalog::Product;
use crate::geometry;
use crate::types::{Category, Location, PriceModifier};

// =============================================================================
// Price Policy
// =============================================================================

/// Category → multiplier table with a fallback.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PricePolicy {
    modifiers: BTreeMap<Category, PriceModifier>,
    default: PriceModifier,
}

impl PricePolicy {
    /// A policy applying `default` to every category.
    pub fn flat(default: PriceModifier) -> Self {
        PricePolicy {
            modifiers: BTreeMap::new(),
            default,
        }
    }

    /// Overrides the multiplier for one category.
    pub fn with(mut self, category: Category, modifier: PriceModifier) -> Self {
        self.modifiers.insert(category, modifier);
        self
    }

    /// Multiplier for a category, ignoring uniformity.
    pub fn for_category(&self, category: Category) -> PriceModifier {
        self.modifiers
            .get(&category)
            .copied()
            .unwrap_or(self.default)
    }

    /// Multiplier for a product. Uniform products always get ×1.0.
    pub fn modifier_for(&self, product: &Product) -> PriceModifier {
        if product.is_uniform() {
            return PriceModifier::ONE;
        }
        self.for_category(product.category())
    }

    pub fn default_modifier(&self) -> PriceModifier {
        self.default
    }

    pub fn modifiers(&self) -> &BTreeMap<Category, PriceModifier> {
        &self.modifiers
    }
}

// =============================================================================
// Store
// =============================================================================

/// A store on the map.
///
/// `distance_to_user` is derived state: it is only correct after
/// [`Store::update_distance`] has been called for the current user location.
/// [`crate::Session`] takes care of that.
#[derive(Debug, Clone)]
pub struct Store {
    name: String,
    inventory: Vec<Product>,
    location: Location,
    policy: PricePolicy,
    /// Feet from the user's current location.
    distance_to_user: i64,
}

impl Store {
    pub fn new(
        name: impl Into<String>,
        inventory: Vec<Product>,
        location: Location,
        policy: PricePolicy,
    ) -> Self {
        Store {
            name: name.into(),
            inventory,
            location,
            policy,
            distance_to_user: 0,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn location(&self) -> Location {
        self.location
    }

    #[inline]
    pub fn policy(&self) -> &PricePolicy {
        &self.policy
    }

    pub fn inventory(&self) -> &[Product] {
        &self.inventory
    }

    /// Feet from the user, as of the last [`Store::update_distance`].
    #[inline]
    pub fn distance_to_user(&self) -> i64 {
        self.distance_to_user
    }

    /// Recomputes `distance_to_user` for a new user location.
    pub fn update_distance(&mut self, user: Location) {
        self.distance_to_user = geometry::distance_feet(user, self.location);
    }

    /// Whether this exact product (by id) is stocked.
    pub fn stocks(&self, product: &Product) -> bool {
        self.inventory.iter().any(|p| p.is_same_item(product))
    }

    /// Whether any stocked product carries this name.
    pub fn stocks_name(&self, name: &str) -> bool {
        self.inventory.iter().any(|p| p.name() == name)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Cart
//!
//! The shopping list the user is comparing stores for.
//!
//! ## Cart Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Front end action        Session command         Cart change            │
//! │  ────────────────        ───────────────         ───────────            │
//! │  Pick from catalog ────► add_to_cart() ────────► items.push(product)    │
//! │  Remove from list  ────► remove_from_cart() ───► first unit by id gone  │
//! │  View list         ────► cart() ───────────────► (read only)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - The same product may appear many times; every entry is one unit
//! - Removal takes out exactly one unit (the first match by id)
//! - Insertion order is kept for display; no computation depends on it
//! - There is no bulk clear

use serde::{Deserialize, Serialize};

use crate::catalog::Product;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<Product>,
}

impl Cart {
    pub fn new() -> Self {
        Cart::default()
    }

    /// Appends one unit of `product`.
    pub fn add(&mut self, product: &Product) {
        self.items.push(product.clone());
    }

    /// Removes one unit of `product` (first match by id).
    ///
    /// Returns `false` when nothing matched, including on an empty cart.
    pub fn remove(&mut self, product: &Product) -> bool {
        match self.items.iter().position(|p| p.is_same_item(product)) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    /// Whether at least one unit of this exact product is in the cart.
    pub fn contains(&self, product: &Product) -> bool {
        self.items.iter().any(|p| p.is_same_item(product))
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.items.iter().any(|p| p.id() == id)
    }

    /// First cart entry with this name.
    pub fn find_by_name(&self, name: &str) -> Option<&Product> {
        self.items.iter().find(|p| p.name() == name)
    }

    /// Number of units carrying this product's id.
    pub fn quantity_of(&self, product: &Product) -> usize {
        self.items.iter().filter(|p| p.is_same_item(product)).count()
    }

    pub fn items(&self) -> &[Product] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.items.iter()
    }

    /// Number of units in the cart.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

//! # Pricing
//!
//! Per-store prices, cart totals and missing items.
//!
//! ## Two kinds of equality
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  effective_price / cart_total      missing_items                        │
//! │  ───────────────────────────       ─────────────                        │
//! │  "is THIS product on the shelf"    "could I buy something called X"     │
//! │  store.stocks(product)  (by id)    store.stocks_name(name)  (by name)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All results are distinguished enums; there is no error path here.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::Cart;
use crate::catalog::Product;
use crate::money::Money;
use crate::store::Store;

// =============================================================================
// Result Types
// =============================================================================

/// Price of one product at one store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", content = "price", rename_all = "snake_case")]
pub enum ShelfPrice {
    Available(Money),
    /// The store does not stock this product.
    Unavailable,
}

impl ShelfPrice {
    pub fn price(&self) -> Option<Money> {
        match self {
            ShelfPrice::Available(price) => Some(*price),
            ShelfPrice::Unavailable => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, ShelfPrice::Available(_))
    }
}

/// Cart total at one store.
///
/// `Empty` means "nothing in the cart". `Total(zero)` means "items in the
/// cart but none of them stocked here" (or all of them free).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", content = "total", rename_all = "snake_case")]
pub enum CartTotal {
    Empty,
    Total(Money),
}

impl CartTotal {
    pub fn amount(&self) -> Option<Money> {
        match self {
            CartTotal::Empty => None,
            CartTotal::Total(total) => Some(*total),
        }
    }

    /// A strictly positive total; the only kind CHEAPEST may select.
    pub fn positive_amount(&self) -> Option<Money> {
        self.amount().filter(Money::is_positive)
    }
}

/// Items from the cart a store cannot supply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", content = "items", rename_all = "snake_case")]
pub enum MissingItems {
    EmptyCart,
    /// Missing products in first-occurrence cart order. Empty = none missing.
    Items(Vec<Product>),
}

impl MissingItems {
    pub fn names(&self) -> Vec<&str> {
        match self {
            MissingItems::EmptyCart => Vec::new(),
            MissingItems::Items(items) => items.iter().map(Product::name).collect(),
        }
    }

    /// True when the cart is non-empty and the store has everything.
    pub fn is_none_missing(&self) -> bool {
        matches!(self, MissingItems::Items(items) if items.is_empty())
    }
}

// =============================================================================
// Pricing Functions
// =============================================================================

/// Price of `product` at `store`: base price × store modifier, rounded to
/// cents half-up.
///
/// ## Example
/// ```rust
/// use grocer_core::{Category, Location, Money, PriceModifier, PricePolicy, Product, Store};
/// use grocer_core::pricing::{effective_price, ShelfPrice};
///
/// let milk = Product::new("Milk", Category::Dairy, false, Money::from_cents(200));
/// let policy = PricePolicy::flat(PriceModifier::from_bps(10500))
///     .with(Category::Dairy, PriceModifier::from_bps(9300));
/// let store = Store::new("Store A", vec![milk.clone()], Location::new(0, 0), policy);
///
/// assert_eq!(effective_price(&store, &milk), ShelfPrice::Available(Money::from_cents(186)));
/// ```
pub fn effective_price(store: &Store, product: &Product) -> ShelfPrice {
    if !store.stocks(product) {
        return ShelfPrice::Unavailable;
    }
    let modifier = store.policy().modifier_for(product);
    ShelfPrice::Available(product.base_price().apply_modifier(modifier))
}

/// Sum of effective prices of the cart items `store` stocks.
///
/// Unstocked items are left out of the sum, not counted as zero-cost errors.
pub fn cart_total(store: &Store, cart: &Cart) -> CartTotal {
    if cart.is_empty() {
        return CartTotal::Empty;
    }
    let total = cart
        .iter()
        .filter_map(|product| effective_price(store, product).price())
        .sum();
    CartTotal::Total(total)
}

/// Cart products whose name `store` does not stock, de-duplicated by name.
pub fn missing_items(store: &Store, cart: &Cart) -> MissingItems {
    if cart.is_empty() {
        return MissingItems::EmptyCart;
    }

    let mut missing: Vec<Product> = Vec::new();
    for product in cart.iter() {
        if store.stocks_name(product.name()) {
            continue;
        }
        if missing.iter().any(|m| m.name() == product.name()) {
            continue;
        }
        missing.push(product.clone());
    }
    MissingItems::Items(missing)
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Selection
//!
//! Which store is "the selected store", and why.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │            ModeChanged(Explicit)                                        │
//! │    ┌──────────────────────────────────┐   store := none                 │
//! │    ▼                                  │                                 │
//! │ ┌──────────┐  ModeChanged(Closest) ┌──┴───────┐                         │
//! │ │ EXPLICIT │ ────────────────────► │ CLOSEST  │ ◄── LocationChanged     │
//! │ │          │                       │          │     (recompute)         │
//! │ │ store := │ ◄──────────────────── └──────────┘                         │
//! │ │  chosen  │                                                            │
//! │ └────┬─────┘  ModeChanged(Cheapest) ┌──────────┐                        │
//! │      │ ───────────────────────────► │ CHEAPEST │ ◄── CartChanged        │
//! │      ▲                              │          │     (recompute)        │
//! │  StoreChosen                        └──────────┘                        │
//! │  (EXPLICIT only)                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Entering CLOSEST or CHEAPEST recomputes immediately. Entering EXPLICIT
//! clears the store so the user has to choose again. `StoreChosen` outside
//! EXPLICIT is ignored.
//!
//! `SelectionState` is a small value; every transition returns a new one.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;
use ts_rs::TS;

use crate::cart::Cart;
use crate::error::ValidationError;
use crate::money::Money;
use crate::pricing;
use crate::store::Store;

// =============================================================================
// Selection Mode
// =============================================================================

/// How the selected store is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    /// The user picks a store.
    #[default]
    Explicit,
    /// Nearest store to the user.
    Closest,
    /// Lowest positive cart total.
    Cheapest,
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionMode::Explicit => write!(f, "explicit"),
            SelectionMode::Closest => write!(f, "closest"),
            SelectionMode::Cheapest => write!(f, "cheapest"),
        }
    }
}

impl FromStr for SelectionMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "explicit" | "selected" | "manual" => Ok(SelectionMode::Explicit),
            "closest" | "nearest" => Ok(SelectionMode::Closest),
            "cheapest" => Ok(SelectionMode::Cheapest),
            other => Err(ValidationError::InvalidFormat {
                field: "mode".to_string(),
                reason: format!(
                    "unknown mode '{}'. Valid options: explicit, closest, cheapest",
                    other
                ),
            }),
        }
    }
}

// =============================================================================
// Store Resolution
// =============================================================================

/// Index of the store nearest to the user. First store wins ties.
pub fn closest_store(stores: &[Store]) -> Option<usize> {
    let mut best: Option<(usize, i64)> = None;
    for (index, store) in stores.iter().enumerate() {
        let distance = store.distance_to_user();
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((index, distance)),
        }
    }
    best.map(|(index, _)| index)
}

/// Index of the store with the lowest strictly positive cart total.
///
/// Returns `None` for an empty cart, and when no store has a positive total
/// (a zero total means "nothing available there", not "free").
/// First store wins ties.
pub fn cheapest_store(stores: &[Store], cart: &Cart) -> Option<usize> {
    if cart.is_empty() {
        return None;
    }

    let mut best: Option<(usize, Money)> = None;
    for (index, store) in stores.iter().enumerate() {
        let Some(total) = pricing::cart_total(store, cart).positive_amount() else {
            continue;
        };
        match best {
            Some((_, best_total)) if total >= best_total => {}
            _ => best = Some((index, total)),
        }
    }
    best.map(|(index, _)| index)
}

// =============================================================================
// Selection State
// =============================================================================

/// Inputs a transition may look at.
#[derive(Debug, Clone, Copy)]
pub struct SelectionContext<'a> {
    pub stores: &'a [Store],
    pub cart: &'a Cart,
}

/// Something that happened which may change the selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionEvent {
    ModeChanged(SelectionMode),
    /// The user chose a store (index into the session's stores).
    StoreChosen(usize),
    LocationChanged,
    CartChanged,
    /// The user chose a cart product (by id) for a single-item price lookup.
    ProductChosen(String),
    ProductCleared,
    /// One unit of this product id left the cart.
    ProductRemoved(String),
}

/// Current mode, selected store and selected product.
///
/// ## Invariants
/// - CLOSEST / CHEAPEST: `selected_store` is always engine-computed
/// - EXPLICIT: `selected_store` is the last store the user chose, or none
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionState {
    mode: SelectionMode,
    selected_store: Option<usize>,
    selected_product: Option<String>,
}

impl SelectionState {
    pub fn new() -> Self {
        SelectionState::default()
    }

    #[inline]
    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Index of the selected store.
    #[inline]
    pub fn selected_store(&self) -> Option<usize> {
        self.selected_store
    }

    /// Id of the selected cart product.
    pub fn selected_product(&self) -> Option<&str> {
        self.selected_product.as_deref()
    }

    /// Applies one event and returns the resulting state.
    pub fn apply(&self, event: &SelectionEvent, ctx: SelectionContext<'_>) -> SelectionState {
        let mut next = self.clone();

        match event {
            SelectionEvent::ModeChanged(mode) => {
                next.mode = *mode;
                next.selected_store = match mode {
                    SelectionMode::Explicit => None,
                    SelectionMode::Closest => closest_store(ctx.stores),
                    SelectionMode::Cheapest => cheapest_store(ctx.stores, ctx.cart),
                };
            }
            SelectionEvent::StoreChosen(index) => {
                if self.mode != SelectionMode::Explicit {
                    debug!(mode = %self.mode, "Ignoring store choice outside explicit mode");
                } else if *index < ctx.stores.len() {
                    next.selected_store = Some(*index);
                }
            }
            SelectionEvent::LocationChanged => {
                if self.mode == SelectionMode::Closest {
                    next.selected_store = closest_store(ctx.stores);
                }
            }
            SelectionEvent::CartChanged => {
                if self.mode == SelectionMode::Cheapest {
                    next.selected_store = cheapest_store(ctx.stores, ctx.cart);
                }
            }
            SelectionEvent::ProductChosen(id) => {
                if ctx.cart.contains_id(id) {
                    next.selected_product = Some(id.clone());
                }
            }
            SelectionEvent::ProductCleared => {
                next.selected_product = None;
            }
            SelectionEvent::ProductRemoved(id) => {
                if self.selected_product.as_deref() == Some(id.as_str()) {
                    next.selected_product = None;
                }
            }
        }

        if next != *self {
            debug!(
                ?event,
                mode = %next.mode,
                store = ?next.selected_store,
                product = ?next.selected_product,
                "Selection changed"
            );
        }
        next
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Product;
    use crate::store::PricePolicy;
    use crate::types::{Category, Location, PriceModifier};

    fn store_at(name: &str, inventory: Vec<Product>, x: i64, y: i64, bps: u32) -> Store {
        let mut store = Store::new(
            name,
            inventory,
            Location::new(x, y),
            PricePolicy::flat(PriceModifier::from_bps(bps)),
        );
        store.update_distance(Location::new(0, 0));
        store
    }

    fn chips() -> Product {
        Product::new("Chips", Category::Snack, false, Money::from_cents(100))
    }

    #[test]
    fn test_mode_parse_and_display() {
        assert_eq!("Closest".parse::<SelectionMode>().unwrap(), SelectionMode::Closest);
        assert_eq!(SelectionMode::Cheapest.to_string(), "cheapest");
        assert!("random".parse::<SelectionMode>().is_err());
    }

    #[test]
    fn test_closest_store_first_wins_ties() {
        let stores = vec![
            store_at("Far", vec![], 300, 400, 10000),
            store_at("Tie 1", vec![], 30, 40, 10000),
            store_at("Tie 2", vec![], 40, 30, 10000),
        ];
        assert_eq!(closest_store(&stores), Some(1));
        assert_eq!(closest_store(&[]), None);
    }

    #[test]
    fn test_cheapest_store_skips_zero_totals() {
        let chips = chips();
        let stores = vec![
            store_at("Empty shelves", vec![], 0, 0, 5000),
            store_at("Pricey", vec![chips.clone()], 0, 0, 12000),
            store_at("Cheap", vec![chips.clone()], 0, 0, 9000),
        ];
        let mut cart = Cart::new();
        cart.add(&chips);

        assert_eq!(cheapest_store(&stores, &cart), Some(2));
    }

    #[test]
    fn test_cheapest_store_none_cases() {
        let chips = chips();
        let stores = vec![store_at("Empty shelves", vec![], 0, 0, 10000)];

        assert_eq!(cheapest_store(&stores, &Cart::new()), None);

        let mut cart = Cart::new();
        cart.add(&chips);
        assert_eq!(cheapest_store(&stores, &cart), None);
    }

    #[test]
    fn test_cheapest_store_first_wins_ties() {
        let chips = chips();
        let stores = vec![
            store_at("A", vec![chips.clone()], 0, 0, 9000),
            store_at("B", vec![chips.clone()], 0, 0, 9000),
        ];
        let mut cart = Cart::new();
        cart.add(&chips);
        assert_eq!(cheapest_store(&stores, &cart), Some(0));
    }

    #[test]
    fn test_store_choice_only_in_explicit_mode() {
        let stores = vec![
            store_at("Near", vec![], 3, 4, 10000),
            store_at("Far", vec![], 30, 40, 10000),
        ];
        let cart = Cart::new();
        let ctx = SelectionContext {
            stores: &stores,
            cart: &cart,
        };

        let explicit = SelectionState::new().apply(&SelectionEvent::StoreChosen(1), ctx);
        assert_eq!(explicit.selected_store(), Some(1));

        let closest = explicit.apply(&SelectionEvent::ModeChanged(SelectionMode::Closest), ctx);
        assert_eq!(closest.selected_store(), Some(0));

        let ignored = closest.apply(&SelectionEvent::StoreChosen(1), ctx);
        assert_eq!(ignored, closest);
    }

    #[test]
    fn test_entering_explicit_clears_store() {
        let stores = vec![store_at("Near", vec![], 3, 4, 10000)];
        let cart = Cart::new();
        let ctx = SelectionContext {
            stores: &stores,
            cart: &cart,
        };

        let closest = SelectionState::new().apply(&SelectionEvent::ModeChanged(SelectionMode::Closest), ctx);
        assert_eq!(closest.selected_store(), Some(0));

        let explicit = closest.apply(&SelectionEvent::ModeChanged(SelectionMode::Explicit), ctx);
        assert_eq!(explicit.mode(), SelectionMode::Explicit);
        assert_eq!(explicit.selected_store(), None);
    }

    #[test]
    fn test_explicit_store_survives_cart_and_location_changes() {
        let stores = vec![
            store_at("Near", vec![], 3, 4, 10000),
            store_at("Far", vec![], 30, 40, 10000),
        ];
        let cart = Cart::new();
        let ctx = SelectionContext {
            stores: &stores,
            cart: &cart,
        };

        let chosen = SelectionState::new().apply(&SelectionEvent::StoreChosen(1), ctx);
        let after = chosen
            .apply(&SelectionEvent::LocationChanged, ctx)
            .apply(&SelectionEvent::CartChanged, ctx);
        assert_eq!(after.selected_store(), Some(1));
    }

    #[test]
    fn test_out_of_range_choice_is_ignored() {
        let stores = vec![store_at("Only", vec![], 0, 0, 10000)];
        let cart = Cart::new();
        let ctx = SelectionContext {
            stores: &stores,
            cart: &cart,
        };
        let state = SelectionState::new().apply(&SelectionEvent::StoreChosen(7), ctx);
        assert_eq!(state.selected_store(), None);
    }

    #[test]
    fn test_product_selection_follows_cart() {
        let chips = chips();
        let stores: Vec<Store> = Vec::new();
        let mut cart = Cart::new();

        let state = {
            let ctx = SelectionContext {
                stores: &stores,
                cart: &cart,
            };
            SelectionState::new().apply(&SelectionEvent::ProductChosen(chips.id().to_string()), ctx)
        };
        assert_eq!(state.selected_product(), None);

        cart.add(&chips);
        let ctx = SelectionContext {
            stores: &stores,
            cart: &cart,
        };
        let chosen = state.apply(&SelectionEvent::ProductChosen(chips.id().to_string()), ctx);
        assert_eq!(chosen.selected_product(), Some(chips.id()));

        let other = chosen.apply(&SelectionEvent::ProductRemoved("something-else".to_string()), ctx);
        assert_eq!(other.selected_product(), Some(chips.id()));

        let removed = chosen.apply(&SelectionEvent::ProductRemoved(chips.id().to_string()), ctx);
        assert_eq!(removed.selected_product(), None);
    }
}

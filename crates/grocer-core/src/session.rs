//! # Session
//!
//! The single owner of all mutable state, and the only surface a front end
//! talks to.
//!
//! ## Command / Query Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Front end                    Session                                   │
//! │  ─────────                    ───────                                   │
//! │                                                                         │
//! │  add_to_cart(&p) ──────────►  cart.add ─┐                               │
//! │  remove_from_cart(&p) ─────►  cart.rm  ─┤                               │
//! │  set_user_location(x, y) ──►  distances ┤                               │
//! │  set_mode(m) ──────────────►            ├─► SelectionState::apply       │
//! │  select_store(&s) ─────────►            │         │                     │
//! │  select_product(&p) ───────►           ─┘         ▼                     │
//! │                                              refresh() ─► SessionView   │
//! │                                              revision += 1              │
//! │                                                                         │
//! │  view() / selected_store() / closest_store() ◄── cached, no recompute   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Derived values are recomputed once per accepted command. Reads never
//! recompute, so a display loop may poll as often as it likes and compare
//! [`Session::revision`] to skip redraws.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use ts_rs::TS;

use crate::cart::Cart;
use crate::catalog::{Catalog, Product};
use crate::dataset::Dataset;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::pricing::{self, CartTotal, MissingItems, ShelfPrice};
use crate::selection::{self, SelectionContext, SelectionEvent, SelectionMode, SelectionState};
use crate::store::Store;
use crate::types::Location;

// =============================================================================
// View Types
// =============================================================================

/// The nearest store, always reported whatever the mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ClosestStore {
    pub name: String,
    pub distance_feet: i64,
}

/// Everything shown for the selected store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StoreReport {
    pub name: String,
    pub distance_feet: i64,
    pub cart_total: CartTotal,
    pub missing_items: MissingItems,
}

/// Single-item price lookup for the selected product at the selected store.
///
/// Variants are checked in declaration order: an empty cart wins over a
/// missing product selection, which wins over a missing store selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SelectedProductInfo {
    CartEmpty,
    NoProductSelected,
    NoStoreSelected,
    Unavailable { product: String, store: String },
    Price { product: String, store: String, price: Money },
}

/// Cached derived state, replaced after every accepted command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub mode: SelectionMode,
    pub closest: Option<ClosestStore>,
    pub selected: Option<StoreReport>,
    pub selected_product_info: SelectedProductInfo,
}

// =============================================================================
// Session
// =============================================================================

#[derive(Debug, Clone)]
pub struct Session {
    catalog: Catalog,
    stores: Vec<Store>,
    cart: Cart,
    user_location: Location,
    selection: SelectionState,
    closest: Option<usize>,
    view: SessionView,
    revision: u64,
}

impl Session {
    /// Starts a session in EXPLICIT mode with an empty cart.
    pub fn new(dataset: Dataset, user_location: Location) -> Self {
        let (catalog, mut stores) = dataset.into_parts();
        for store in &mut stores {
            store.update_distance(user_location);
        }

        let mut session = Session {
            catalog,
            stores,
            cart: Cart::new(),
            user_location,
            selection: SelectionState::new(),
            closest: None,
            view: SessionView {
                mode: SelectionMode::default(),
                closest: None,
                selected: None,
                selected_product_info: SelectedProductInfo::CartEmpty,
            },
            revision: 0,
        };
        session.refresh();

        info!(
            products = session.catalog.len(),
            stores = session.stores.len(),
            user = %user_location,
            "Session started"
        );
        session
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Adds one unit of a catalog product to the cart.
    ///
    /// ## Errors
    /// `CoreError::ProductNotFound` if `product` is not from this catalog.
    pub fn add_to_cart(&mut self, product: &Product) -> CoreResult<()> {
        if !self.catalog.contains(product) {
            return Err(CoreError::ProductNotFound(product.name().to_string()));
        }

        self.cart.add(product);
        debug!(product = product.name(), units = self.cart.len(), "Added to cart");
        self.commit(&[SelectionEvent::CartChanged], true);
        Ok(())
    }

    /// Removes one unit of `product`. Returns whether anything was removed.
    pub fn remove_from_cart(&mut self, product: &Product) -> bool {
        if !self.cart.remove(product) {
            debug!(product = product.name(), "Nothing to remove");
            return false;
        }

        debug!(product = product.name(), units = self.cart.len(), "Removed from cart");
        self.commit(
            &[
                SelectionEvent::ProductRemoved(product.id().to_string()),
                SelectionEvent::CartChanged,
            ],
            true,
        );
        true
    }

    /// Chooses a store. Only has an effect in EXPLICIT mode.
    ///
    /// A store is matched by name and location together.
    ///
    /// ## Errors
    /// `CoreError::StoreNotFound` if no session store has this name at this
    /// location.
    pub fn select_store(&mut self, store: &Store) -> CoreResult<()> {
        let index = self
            .stores
            .iter()
            .position(|s| s.name() == store.name() && s.location() == store.location())
            .ok_or_else(|| CoreError::StoreNotFound(store.name().to_string()))?;

        self.commit(&[SelectionEvent::StoreChosen(index)], false);
        Ok(())
    }

    /// Chooses the cart product used for the single-item price lookup.
    ///
    /// ## Errors
    /// `CoreError::ProductNotInCart` if no unit of `product` is in the cart.
    pub fn select_product(&mut self, product: &Product) -> CoreResult<()> {
        if !self.cart.contains(product) {
            return Err(CoreError::ProductNotInCart(product.name().to_string()));
        }

        self.commit(&[SelectionEvent::ProductChosen(product.id().to_string())], false);
        Ok(())
    }

    pub fn clear_selected_product(&mut self) {
        self.commit(&[SelectionEvent::ProductCleared], false);
    }

    /// Switches the selection mode, recomputing the selected store.
    pub fn set_mode(&mut self, mode: SelectionMode) {
        self.commit(&[SelectionEvent::ModeChanged(mode)], true);
    }

    /// Moves the user. Unchanged coordinates are ignored.
    pub fn set_user_location(&mut self, x: i64, y: i64) {
        let location = Location::new(x, y);
        if location == self.user_location {
            return;
        }

        self.user_location = location;
        for store in &mut self.stores {
            store.update_distance(location);
        }
        debug!(user = %location, "User moved");
        self.commit(&[SelectionEvent::LocationChanged], true);
    }

    /// Applies events, then refreshes the view when something changed.
    ///
    /// `inputs_changed` marks commands that altered cart, location or mode;
    /// those always refresh. Pure selection commands refresh only when the
    /// selection state actually moved.
    fn commit(&mut self, events: &[SelectionEvent], inputs_changed: bool) {
        let ctx = SelectionContext {
            stores: &self.stores,
            cart: &self.cart,
        };
        let next = events
            .iter()
            .fold(self.selection.clone(), |state, event| state.apply(event, ctx));

        if !inputs_changed && next == self.selection {
            return;
        }

        self.selection = next;
        self.refresh();
        self.revision += 1;
    }

    fn refresh(&mut self) {
        self.closest = selection::closest_store(&self.stores);

        let closest = self.closest.map(|index| {
            let store = &self.stores[index];
            ClosestStore {
                name: store.name().to_string(),
                distance_feet: store.distance_to_user(),
            }
        });

        let selected = self.selected_store().map(|store| StoreReport {
            name: store.name().to_string(),
            distance_feet: store.distance_to_user(),
            cart_total: pricing::cart_total(store, &self.cart),
            missing_items: pricing::missing_items(store, &self.cart),
        });

        self.view = SessionView {
            mode: self.selection.mode(),
            closest,
            selected,
            selected_product_info: self.compute_selected_product_info(),
        };
    }

    fn compute_selected_product_info(&self) -> SelectedProductInfo {
        if self.cart.is_empty() {
            return SelectedProductInfo::CartEmpty;
        }
        let Some(product) = self.selected_product() else {
            return SelectedProductInfo::NoProductSelected;
        };
        let Some(store) = self.selected_store() else {
            return SelectedProductInfo::NoStoreSelected;
        };

        match pricing::effective_price(store, product) {
            ShelfPrice::Available(price) => SelectedProductInfo::Price {
                product: product.name().to_string(),
                store: store.name().to_string(),
                price,
            },
            ShelfPrice::Unavailable => SelectedProductInfo::Unavailable {
                product: product.name().to_string(),
                store: store.name().to_string(),
            },
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn stores(&self) -> &[Store] {
        &self.stores
    }

    pub fn store_by_name(&self, name: &str) -> Option<&Store> {
        self.stores.iter().find(|s| s.name() == name)
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn user_location(&self) -> Location {
        self.user_location
    }

    pub fn mode(&self) -> SelectionMode {
        self.selection.mode()
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Number of accepted commands so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Cached derived state for display.
    pub fn view(&self) -> &SessionView {
        &self.view
    }

    pub fn selected_store(&self) -> Option<&Store> {
        self.selection
            .selected_store()
            .and_then(|index| self.stores.get(index))
    }

    pub fn selected_product(&self) -> Option<&Product> {
        let id = self.selection.selected_product()?;
        self.cart.iter().find(|p| p.id() == id)
    }

    pub fn closest_store(&self) -> Option<&Store> {
        self.closest.and_then(|index| self.stores.get(index))
    }

    pub fn selected_product_info(&self) -> &SelectedProductInfo {
        &self.view.selected_product_info
    }

    pub fn effective_price(&self, store: &Store, product: &Product) -> ShelfPrice {
        pricing::effective_price(store, product)
    }

    /// Cart total at `store` for the current cart.
    pub fn cart_total(&self, store: &Store) -> CartTotal {
        pricing::cart_total(store, &self.cart)
    }

    /// Missing items at `store` for the current cart.
    pub fn missing_items(&self, store: &Store) -> MissingItems {
        pricing::missing_items(store, &self.cart)
    }

    /// Feet from the user to `store`.
    pub fn distance_to(&self, store: &Store) -> i64 {
        self.stores
            .iter()
            .find(|s| s.name() == store.name() && s.location() == store.location())
            .map(Store::distance_to_user)
            .unwrap_or_else(|| crate::geometry::distance_feet(self.user_location, store.location()))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # grocer-core: Price Comparison & Store Selection
//!
//! This crate is the **decision engine** of Grocer. Given a catalog, a set of
//! stores and a shopping cart, it answers "what does this cost where" and
//! "which store should I go to".
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Grocer Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Front end (grocer-shell, or a GUI)              │   │
//! │  │   name lookup ──► commands ──► render view ◄── queries          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ &Product, &Store, (x, y)               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ grocer-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐  ┌─────────┐  ┌─────────┐  ┌───────────────────┐ │   │
//! │  │   │ catalog │  │  store  │  │  cart   │  │     session       │ │   │
//! │  │   │ Product │  │ Policy  │  │  Cart   │  │ commands/queries  │ │   │
//! │  │   └─────────┘  └─────────┘  └─────────┘  └───────────────────┘ │   │
//! │  │   ┌─────────┐  ┌───────────┐  ┌──────────┐  ┌───────────────┐ │   │
//! │  │   │ pricing │  │ selection │  │ geometry │  │    dataset    │ │   │
//! │  │   └─────────┘  └───────────┘  └──────────┘  └───────────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FLOATING POINT MONEY • SINGLE OWNER OF STATE      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`types`] - Small value types (Category, PriceModifier, Location)
//! - [`catalog`] - Products and the master catalog
//! - [`store`] - Stores, inventories and price policies
//! - [`cart`] - The shopping cart
//! - [`pricing`] - Effective prices, cart totals, missing items
//! - [`geometry`] - Map distances
//! - [`selection`] - Selection modes and the selection state machine
//! - [`session`] - The command/query surface for a front end
//! - [`dataset`] - Catalog/store configuration and the built-in demo data
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use grocer_core::{Dataset, Location, SelectionMode, Session};
//!
//! let mut session = Session::new(Dataset::builtin(), Location::new(520, 290));
//!
//! let bread = session.catalog().find_by_name("Bread").unwrap().clone();
//! session.add_to_cart(&bread).unwrap();
//! session.set_mode(SelectionMode::Cheapest);
//!
//! let cheapest = session.selected_store().unwrap();
//! assert_eq!(cheapest.name(), "Store C");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod dataset;
pub mod error;
pub mod geometry;
pub mod money;
pub mod pricing;
pub mod selection;
pub mod session;
pub mod store;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::Cart;
pub use catalog::{Catalog, Product};
pub use dataset::{Dataset, DatasetConfig, ProductConfig, StockConfig, StoreConfig};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use pricing::{CartTotal, MissingItems, ShelfPrice};
pub use selection::{SelectionEvent, SelectionMode, SelectionState};
pub use session::{ClosestStore, SelectedProductInfo, Session, SessionView, StoreReport};
pub use store::{PricePolicy, Store};
pub use types::{Category, Location, PriceModifier};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Feet represented by one map unit.
///
/// Distances are computed in whole map units and then scaled, so every
/// reported distance is a multiple of this value.
pub const FEET_PER_MAP_UNIT: i64 = 11;

/// Maximum length of a product or store name.
pub const MAX_NAME_LEN: usize = 100;

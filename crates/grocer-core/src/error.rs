//! # Error Types
//!
//! Domain-specific error types for grocer-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  grocer-core errors (this file)                                        │
//! │  ├── CoreError        - Lookups and session commands                   │
//! │  └── ValidationError  - Dataset / input validation failures            │
//! │                                                                         │
//! │  grocer-shell errors (separate crate)                                  │
//! │  └── ShellError       - Config I/O, parse errors, wrapped CoreError    │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ShellError → printed message      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What is NOT an error
//! Unavailable items, an empty cart, "no store selected" and "no cheapest
//! store" are normal outcomes. They are modelled as enum variants in
//! [`crate::pricing`] and [`crate::session`], never as `Err`.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product is not part of the session catalog.
    ///
    /// ## When This Occurs
    /// - A front end hands over a product built outside the catalog
    /// - A name lookup in the front end found nothing
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Store is not part of the session.
    #[error("Store not found: {0}")]
    StoreNotFound(String),

    /// The product must be in the cart for this operation.
    #[error("Product is not in the cart: {0}")]
    ProductNotInCart(String),

    /// A store inventory names a product the catalog does not have.
    #[error("Store {store} stocks unknown product {product}")]
    UnknownInventoryItem { store: String, product: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised while turning a `DatasetConfig` into a `Dataset`, before any
/// session exists.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Invalid format (e.g. "2.305" for a price).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g. two products named "Bread").
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

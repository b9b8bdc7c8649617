//! # Validation Module
//!
//! Input validation for dataset configuration.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Deserialization (serde)                                       │
//! │  ├── Shape of the dataset file, category names                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                   │
//! │  ├── Names present and bounded                                          │
//! │  ├── Prices non-negative, modifiers positive                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Dataset::from_config                                          │
//! │  └── Cross-references (unique names, inventory names exist)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Once a `Dataset` exists nothing is validated again; the engine trusts it.

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::PriceModifier;
use crate::MAX_NAME_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty or whitespace
/// - At most [`MAX_NAME_LEN`] characters
///
/// Names are case-sensitive and are NOT trimmed when stored: "Bread" and
/// "bread" are different products.
///
/// ## Example
/// ```rust
/// use grocer_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Batteries (AA)").is_ok());
/// assert!(validate_product_name("  ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    validate_name("product name", name)
}

/// Validates a store name. Same rules as product names.
pub fn validate_store_name(name: &str) -> ValidationResult<()> {
    validate_name("store name", name)
}

/// Validates and parses a base price ("2.30"). Must be ≥ 0.
pub fn validate_base_price(raw: &str) -> ValidationResult<Money> {
    let price: Money = raw.parse()?;

    if price.is_negative() {
        return Err(ValidationError::Negative {
            field: "base price".to_string(),
        });
    }

    Ok(price)
}

/// Validates and parses a price modifier ("0.93"). Must be > 0.
pub fn validate_modifier(raw: &str) -> ValidationResult<PriceModifier> {
    raw.parse()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Milk (Skim)").is_ok());
        assert_eq!(
            validate_product_name(""),
            Err(ValidationError::Required {
                field: "product name".to_string()
            })
        );
        assert!(matches!(
            validate_product_name(&"x".repeat(MAX_NAME_LEN + 1)),
            Err(ValidationError::TooLong { .. })
        ));
    }

    #[test]
    fn test_validate_store_name() {
        assert!(validate_store_name("Store A").is_ok());
        assert!(validate_store_name("\t").is_err());
    }

    #[test]
    fn test_validate_base_price() {
        assert_eq!(validate_base_price("2.30").unwrap().cents(), 230);
        assert_eq!(validate_base_price("0").unwrap().cents(), 0);
        assert_eq!(
            validate_base_price("-1.00"),
            Err(ValidationError::Negative {
                field: "base price".to_string()
            })
        );
        assert!(validate_base_price("two").is_err());
    }

    #[test]
    fn test_validate_modifier() {
        assert_eq!(validate_modifier("0.98").unwrap().bps(), 9800);
        assert!(validate_modifier("0").is_err());
    }
}

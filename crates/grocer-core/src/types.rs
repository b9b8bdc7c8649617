//! # Domain Types
//!
//! Small value types shared by the catalog, stores and pricing.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Value Types                                     │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Category     │   │  PriceModifier  │   │    Location     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  BEVERAGE       │   │  bps (u32)      │   │  x (i64)        │       │
//! │  │  FRUIT ... DAIRY│   │  9300 = 0.93    │   │  y (i64)        │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::{parse_decimal, to_scaled_i64};

// =============================================================================
// Category
// =============================================================================

/// Product category. Store price policies are keyed by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Beverage,
    Fruit,
    Meat,
    Snack,
    Util,
    Veggie,
    Wheat,
    Dairy,
}

impl Category {
    /// Every category, in declaration order.
    pub const ALL: [Category; 8] = [
        Category::Beverage,
        Category::Fruit,
        Category::Meat,
        Category::Snack,
        Category::Util,
        Category::Veggie,
        Category::Wheat,
        Category::Dairy,
    ];

    /// Upper-case label as used in dataset files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Beverage => "BEVERAGE",
            Category::Fruit => "FRUIT",
            Category::Meat => "MEAT",
            Category::Snack => "SNACK",
            Category::Util => "UTIL",
            Category::Veggie => "VEGGIE",
            Category::Wheat => "WHEAT",
            Category::Dairy => "DAIRY",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_uppercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| ValidationError::InvalidFormat {
                field: "category".to_string(),
                reason: format!("unknown category '{}'", s),
            })
    }
}

// =============================================================================
// Price Modifier
// =============================================================================

/// A price multiplier in basis points.
///
/// ## Why Basis Points?
/// 1 basis point = 1/10000. 9300 bps = ×0.93. Keeping the multiplier as an
/// integer lets [`crate::Money::apply_modifier`] stay in integer math.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PriceModifier(u32);

impl PriceModifier {
    /// Basis points per 1.0.
    pub const SCALE: u32 = 10_000;

    /// The identity modifier (×1.0), used for uniform products.
    pub const ONE: PriceModifier = PriceModifier(Self::SCALE);

    /// Creates a modifier from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        PriceModifier(bps)
    }

    /// Returns the modifier in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Checks if the modifier is usable (strictly positive).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }
}

impl Default for PriceModifier {
    fn default() -> Self {
        PriceModifier::ONE
    }
}

/// Shows the multiplier as a decimal, trailing zeros trimmed: `0.93`, `1`.
impl fmt::Display for PriceModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Decimal::new(i64::from(self.0), 4).normalize())
    }
}

/// Parses "0.93" style multipliers exactly (up to four decimal places).
impl FromStr for PriceModifier {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = parse_decimal(s, 4).map_err(|reason| ValidationError::InvalidFormat {
            field: "modifier".to_string(),
            reason,
        })?;

        if value <= Decimal::ZERO {
            return Err(ValidationError::MustBePositive {
                field: "modifier".to_string(),
            });
        }

        to_scaled_i64(value, i64::from(Self::SCALE))
            .and_then(|bps| u32::try_from(bps).ok())
            .map(PriceModifier)
            .ok_or_else(|| ValidationError::InvalidFormat {
                field: "modifier".to_string(),
                reason: format!("'{}' is out of range", s.trim()),
            })
    }
}

// =============================================================================
// Location
// =============================================================================

/// A point on the store map, in whole map units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Location {
    pub x: i64,
    pub y: i64,
}

impl Location {
    pub const fn new(x: i64, y: i64) -> Self {
        Location { x, y }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

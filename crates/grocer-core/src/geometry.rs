//! # Geometry
//!
//! Straight-line distances on the store map.
//!
//! ```text
//!   user (0,0) ─────────────► store (30,40)
//!   √(30² + 40²) = 50 map units  ──►  50 × 11 = 550 ft
//! ```
//!
//! The square root is truncated, never rounded: √8 = 2.83 becomes 2 units.
//! It is computed with an integer square root so the result does not depend
//! on floating point behaviour.

use crate::types::Location;
use crate::FEET_PER_MAP_UNIT;

/// Floor of the square root of a non-negative integer.
fn isqrt(n: u128) -> u128 {
    if n < 2 {
        return n;
    }
    // Newton's method from an upper bound; converges monotonically downward.
    let mut x = n / 2 + 1;
    let mut y = (x + n / x) / 2;
    while y < x {
        x = y;
        y = (x + n / x) / 2;
    }
    x
}

/// Distance between two points in whole map units (truncated).
///
/// Distances beyond `i64::MAX` saturate.
pub fn map_distance(a: Location, b: Location) -> i64 {
    let dx = (i128::from(a.x) - i128::from(b.x)).unsigned_abs();
    let dy = (i128::from(a.y) - i128::from(b.y)).unsigned_abs();
    let squared = dx
        .checked_mul(dx)
        .and_then(|x2| dy.checked_mul(dy).and_then(|y2| x2.checked_add(y2)));
    match squared {
        Some(squared) => i64::try_from(isqrt(squared)).unwrap_or(i64::MAX),
        None => i64::MAX,
    }
}

/// Converts map units to feet, saturating at `i64::MAX`.
#[inline]
pub const fn to_feet(units: i64) -> i64 {
    units.saturating_mul(FEET_PER_MAP_UNIT)
}

/// Distance between two points in feet.
pub fn distance_feet(a: Location, b: Location) -> i64 {
    to_feet(map_distance(a, b))
}

// =============================================================================
// Unit Tests
// =============================================================================

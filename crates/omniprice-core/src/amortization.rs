//! # Return Amortization
//!
//! Returned orders still cost packaging and shipping. Those costs are
//! spread over the orders that are kept.
//!
//! ```text
//! r = return_rate / 100
//!
//! packaging  = pack_total / (1 - r)
//! shipping   = (outbound + return * r) / (1 - r)
//!
//! r >= 1 ──► UNRECOVERABLE_COST (every order comes back)
//! ```

use tracing::warn;

/// Amortized cost reported when every order is returned.
///
/// A large finite value keeps the downstream price solver free of
/// infinities and NaN.
pub const UNRECOVERABLE_COST: f64 = 999_999.0;

/// Converts a return rate in percent to a fraction.
#[inline]
pub fn return_fraction(return_rate: f64) -> f64 {
    return_rate / 100.0
}

/// Expected packaging cost per kept order.
///
/// ## Example
/// ```rust
/// use omniprice_core::amortization::amortize_packaging;
///
/// assert!((amortize_packaging(20.0, 0.20) - 25.0).abs() < 1e-9);
/// ```
pub fn amortize_packaging(pack_total: f64, r: f64) -> f64 {
    if r >= 1.0 {
        warn!(return_fraction = r, "All orders returned, packaging unrecoverable");
        return UNRECOVERABLE_COST;
    }
    pack_total / (1.0 - r)
}

/// Expected shipping cost per kept order.
///
/// Each return pays the return leg, and the outbound leg of the returned
/// order is spread over the kept ones. Without a distinct return rate the
/// return leg costs the same as outbound.
pub fn amortize_shipping(outbound: f64, return_cost: Option<f64>, r: f64) -> f64 {
    if r >= 1.0 {
        warn!(return_fraction = r, "All orders returned, shipping unrecoverable");
        return UNRECOVERABLE_COST;
    }
    let return_cost = return_cost.unwrap_or(outbound);
    (outbound + return_cost * r) / (1.0 - r)
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Money Module
//!
//! Price arithmetic shared by the engine and the copy-to-text helpers.
//!
//! ## What Lives Here
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  to_inclusive        stated amount ──► amount with VAT                  │
//! │  round_price         raw solved price ──► X9.99 retail price            │
//! │  project_list_price  sale price + discount ──► strike-through price     │
//! │  format_amount       1769.99 ──► "1769,99"                              │
//! │                                                                         │
//! │  Rounding is applied to prices only, never to intermediate costs.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use omniprice_core::money::{round_price, to_inclusive};
//! use omniprice_core::VatMode;
//!
//! // 100 TL + 20% VAT
//! let gross = to_inclusive(100.0, VatMode::TaxExclusive, Some(20.0));
//! assert!((gross - 120.0).abs() < 1e-9);
//!
//! // Retail rounding
//! assert!((round_price(102.50) - 109.99).abs() < 1e-9);
//! ```

use crate::types::VatMode;
use crate::DEFAULT_VAT_RATE;

// =============================================================================
// VAT
// =============================================================================

/// Converts a stated amount to its VAT-inclusive value.
///
/// ## Rules
/// - A zero amount stays zero whatever the mode
/// - A missing rate counts as [`DEFAULT_VAT_RATE`]
/// - Inclusive amounts come back unchanged
/// - Exclusive amounts get `rate` percent added
///
/// ## Example
/// ```rust
/// use omniprice_core::money::to_inclusive;
/// use omniprice_core::VatMode;
///
/// assert_eq!(to_inclusive(100.0, VatMode::TaxInclusive, Some(20.0)), 100.0);
/// assert_eq!(to_inclusive(0.0, VatMode::TaxExclusive, Some(20.0)), 0.0);
/// ```
pub fn to_inclusive(value: f64, mode: VatMode, rate: Option<f64>) -> f64 {
    if value == 0.0 {
        return 0.0;
    }

    let rate = rate.unwrap_or(DEFAULT_VAT_RATE);
    match mode {
        VatMode::TaxInclusive => value,
        VatMode::TaxExclusive => value * (1.0 + rate / 100.0),
    }
}

// =============================================================================
// Rounding
// =============================================================================

/// Rounds a price up to the next `X9.99` ending.
///
/// ## Rule
/// `ceil(price / 10) * 10 - 0.01`, and 0 for any non-positive price.
///
/// ```text
///   87.99 ──► 89.99
///   90.00 ──► 89.99   (already on a multiple of ten)
///  102.50 ──► 109.99
/// ```
pub fn round_price(price: f64) -> f64 {
    if price <= 0.0 {
        return 0.0;
    }
    (price / 10.0).ceil() * 10.0 - 0.01
}

/// Back-solves the pre-discount list price from the final sale price.
///
/// ## Returns
/// - `Some(round_price(sale / (1 - d/100)))` for `0 < d < 100`
/// - `None` when there is no discount, the discount is 100% or more, or
///   there is no sale price to discount
///
/// ## Example
/// ```rust
/// use omniprice_core::money::project_list_price;
///
/// let list = project_list_price(199.99, 20.0).unwrap();
/// assert!((list - 249.99).abs() < 1e-9);
/// assert_eq!(project_list_price(199.99, 0.0), None);
/// ```
pub fn project_list_price(sale_price: f64, discount_rate: f64) -> Option<f64> {
    if sale_price <= 0.0 || discount_rate <= 0.0 {
        return None;
    }

    let discount = discount_rate / 100.0;
    if discount >= 1.0 {
        return None;
    }

    Some(round_price(sale_price / (1.0 - discount)))
}

// =============================================================================
// Formatting
// =============================================================================

/// Formats an amount for pasting into marketplace panels.
///
/// Two fraction digits, comma as decimal separator, no grouping.
///
/// ## Example
/// ```rust
/// use omniprice_core::money::format_amount;
///
/// assert_eq!(format_amount(1769.99), "1769,99");
/// assert_eq!(format_amount(5.0), "5,00");
/// ```
pub fn format_amount(value: f64) -> String {
    // avoid printing "-0,00"
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{:.2}", value).replace('.', ",")
}

// =============================================================================
// Unit Tests
// =============================================================================

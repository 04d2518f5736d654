//! # Copy-to-Text
//!
//! Price texts meant to be pasted into marketplace seller panels.
//!
//! ```text
//! single:  1769,99
//! bulk:    SITE: 519,99 | TY: 589,99 | HB: 539,99
//! ```
//!
//! Only the formatting lives here; writing to the system clipboard is the
//! caller's concern.

use crate::money::format_amount;
use crate::types::{ChannelKey, ChannelResult};

/// Separator between channels in the bulk text.
pub const BULK_SEPARATOR: &str = " | ";

/// Sale price text of one result.
pub fn sale_price_text(result: &ChannelResult) -> String {
    format_amount(result.sale_price)
}

/// List price text of one result, if it has a list price.
pub fn list_price_text(result: &ChannelResult) -> Option<String> {
    result.list_price.map(format_amount)
}

/// `"CODE: amount"` for every selected result without an error.
///
/// Returns `None` when no result qualifies.
///
/// ## Example
/// ```rust
/// use omniprice_core::clipboard::bulk_copy_text;
/// use omniprice_core::{compute, CalculationInputs, ChannelKey, SettingsCatalog};
///
/// let results = compute(
///     &CalculationInputs::default(),
///     &SettingsCatalog::defaults(),
///     &ChannelKey::ALL,
/// );
/// let text = bulk_copy_text(&results, &[ChannelKey::Web]).unwrap();
/// assert!(text.starts_with("SITE: "));
/// assert!(!text.contains(" | "));
/// ```
pub fn bulk_copy_text(results: &[ChannelResult], selected: &[ChannelKey]) -> Option<String> {
    let parts: Vec<String> = results
        .iter()
        .filter(|r| r.is_ok() && selected.contains(&r.channel_key))
        .map(|r| format!("{}: {}", r.channel_key.code(), format_amount(r.sale_price)))
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(BULK_SEPARATOR))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PricingError;
    use crate::types::CostBreakdown;

    fn solved(key: ChannelKey, sale_price: f64, list_price: Option<f64>) -> ChannelResult {
        ChannelResult {
            channel_key: key,
            channel_name: key.default_name().to_string(),
            sale_price,
            list_price,
            net_profit: 0.0,
            profit_rate: 0.0,
            breakdown: CostBreakdown::default(),
            error: None,
        }
    }

    #[test]
    fn test_single_texts() {
        let result = solved(ChannelKey::MarketplaceA, 1769.99, Some(2209.99));
        assert_eq!(sale_price_text(&result), "1769,99");
        assert_eq!(list_price_text(&result).as_deref(), Some("2209,99"));

        let result = solved(ChannelKey::MarketplaceA, 1769.99, None);
        assert_eq!(list_price_text(&result), None);
    }

    #[test]
    fn test_bulk_text() {
        let results = vec![
            solved(ChannelKey::Web, 519.99, None),
            solved(ChannelKey::MarketplaceA, 1769.99, None),
            ChannelResult::failed(ChannelKey::MarketplaceB, "Hepsiburada", PricingError::TargetUnreachable),
            solved(ChannelKey::MarketplaceC, 569.99, None),
        ];

        let text = bulk_copy_text(&results, &ChannelKey::ALL).unwrap();
        assert_eq!(text, "SITE: 519,99 | TY: 1769,99 | PAZARAMA: 569,99");

        let text = bulk_copy_text(&results, &[ChannelKey::MarketplaceA]).unwrap();
        assert_eq!(text, "TY: 1769,99");
    }

    #[test]
    fn test_bulk_text_nothing_to_copy() {
        let results = vec![ChannelResult::failed(
            ChannelKey::Web,
            "Web",
            PricingError::CommissionTooHigh,
        )];
        assert_eq!(bulk_copy_text(&results, &ChannelKey::ALL), None);
        assert_eq!(bulk_copy_text(&[], &ChannelKey::ALL), None);
    }
}

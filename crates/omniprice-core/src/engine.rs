//! # Pricing Engine
//!
//! Solves the sale price of every requested channel and explains it.
//!
//! ## Pipeline (per call)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Shared (once)                                                          │
//! │  ├── product cost  = cost × (1 + vat) [× (1 + overhead)]                │
//! │  └── packaging     = Σ(box, card, bag, tape incl. VAT) / (1 - r)        │
//! │                                                                         │
//! │  Per channel (fixed order: SITE, TY, HB, PAZARAMA)                      │
//! │  ├── shipping      = (out + ret × r) / (1 - r)                          │
//! │  ├── F             = shipping + product + packaging + invoice + fee     │
//! │  ├── raw price     = F / (1 - c - t)         margin                     │
//! │  │                   F × (1 + t) / (1 - c)   markup                     │
//! │  ├── sale price    = round to X9.99                                     │
//! │  ├── list price    = round(sale / (1 - d))   when discounted            │
//! │  └── breakdown     from the rounded sale price                          │
//! │                                                                         │
//! │  An unsolvable channel yields a zeroed result with an error string.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use omniprice_core::{CalculationInputs, ChannelKey, PricingEngine, SettingsCatalog};
//!
//! let engine = PricingEngine::default();
//! let results = engine.compute(
//!     &CalculationInputs::default(),
//!     &SettingsCatalog::defaults(),
//!     &[ChannelKey::MarketplaceA],
//! );
//! assert_eq!(results[0].channel_key, ChannelKey::MarketplaceA);
//! ```

use tracing::debug;

use crate::amortization::{amortize_packaging, amortize_shipping, return_fraction};
use crate::catalog::{keys, ChannelProfile, SettingsCatalog};
use crate::error::PricingError;
use crate::money::{project_list_price, round_price};
use crate::types::{
    CalculationInputs, ChannelKey, ChannelResult, CostBreakdown, PackagingDetails, ProfitBasis,
};

// =============================================================================
// Engine
// =============================================================================

/// The channel price solver.
///
/// Holds the channel profiles; everything else arrives per call.
#[derive(Debug, Clone)]
pub struct PricingEngine {
    profiles: Vec<ChannelProfile>,
}

impl Default for PricingEngine {
    fn default() -> Self {
        PricingEngine {
            profiles: ChannelProfile::defaults(),
        }
    }
}

/// Costs that do not depend on the channel.
#[derive(Debug, Clone, Copy)]
struct SharedCosts {
    r: f64,
    product_cost_total: f64,
    packaging_details: PackagingDetails,
    packaging_total: f64,
}

impl PricingEngine {
    /// Creates an engine with custom channel profiles.
    ///
    /// Channels without a profile fall back to the built-in one.
    pub fn with_profiles(profiles: Vec<ChannelProfile>) -> Self {
        PricingEngine { profiles }
    }

    /// Computes one result per active channel, in fixed channel order.
    ///
    /// Never fails: unsolvable channels carry their error in the result.
    pub fn compute(
        &self,
        inputs: &CalculationInputs,
        catalog: &SettingsCatalog,
        active: &[ChannelKey],
    ) -> Vec<ChannelResult> {
        let r = return_fraction(inputs.return_rate);
        let packaging_details = catalog.packaging();
        let shared = SharedCosts {
            r,
            product_cost_total: product_cost_total(inputs, catalog),
            packaging_details,
            packaging_total: amortize_packaging(packaging_details.total(), r),
        };

        ChannelKey::ALL
            .into_iter()
            .filter(|key| active.contains(key))
            .map(|key| {
                let fallback;
                let profile = match self.profiles.iter().find(|p| p.key == key) {
                    Some(profile) => profile,
                    None => {
                        fallback = ChannelProfile::for_channel(key);
                        &fallback
                    }
                };
                self.compute_channel(profile, inputs, catalog, &shared)
            })
            .collect()
    }

    fn compute_channel(
        &self,
        profile: &ChannelProfile,
        inputs: &CalculationInputs,
        catalog: &SettingsCatalog,
        shared: &SharedCosts,
    ) -> ChannelResult {
        let commission_rate = catalog.percentage(&profile.commission_key);

        let outbound = catalog.inclusive_amount(&profile.shipping_key);
        let return_cost = profile
            .return_shipping_key
            .as_deref()
            .map(|key| catalog.inclusive_amount(key));
        let shipping_total = amortize_shipping(outbound, return_cost, shared.r);

        let invoice_cost = catalog.inclusive_amount(&profile.invoice_key);
        let platform_fee = profile
            .platform_fee_key
            .as_deref()
            .map_or(0.0, |key| catalog.inclusive_amount(key));

        let fixed = shipping_total
            + shared.product_cost_total
            + shared.packaging_total
            + invoice_cost
            + platform_fee;

        let raw_price = match solve_price(
            fixed,
            commission_rate,
            inputs.target_profit_rate,
            inputs.profit_basis,
        ) {
            Ok(price) => price,
            Err(err) => {
                debug!(
                    channel = %profile.key,
                    commission_rate,
                    target = inputs.target_profit_rate,
                    error = %err,
                    "Channel price unsolvable"
                );
                return ChannelResult::failed(profile.key, profile.name.clone(), err);
            }
        };

        let sale_price = round_price(raw_price);
        let list_price = project_list_price(sale_price, inputs.discount_rate);

        let commission_amount = sale_price * commission_rate / 100.0;
        let net_after_commission = sale_price - commission_amount;
        let net_profit = net_after_commission - fixed;
        let profit_rate = profit_rate(net_profit, sale_price, fixed, inputs.profit_basis);

        debug!(
            channel = %profile.key,
            fixed_costs = fixed,
            raw_price,
            sale_price,
            net_profit,
            "Channel price solved"
        );

        ChannelResult {
            channel_key: profile.key,
            channel_name: profile.name.clone(),
            sale_price,
            list_price,
            net_profit,
            profit_rate,
            breakdown: CostBreakdown {
                commission_amount,
                net_after_commission,
                shipping_total,
                packaging_total: shared.packaging_total,
                packaging_details: shared.packaging_details,
                product_cost_total: shared.product_cost_total,
                platform_fee,
                invoice_cost,
            },
            error: None,
        }
    }
}

/// Computes results with the built-in channel profiles.
pub fn compute(
    inputs: &CalculationInputs,
    catalog: &SettingsCatalog,
    active: &[ChannelKey],
) -> Vec<ChannelResult> {
    PricingEngine::default().compute(inputs, catalog, active)
}

// =============================================================================
// Formulas
// =============================================================================

/// Product cost with VAT, inflated by the overhead rate when selected.
pub fn product_cost_total(inputs: &CalculationInputs, catalog: &SettingsCatalog) -> f64 {
    let with_vat = inputs.product_cost_ex_vat * (1.0 + inputs.product_vat_rate / 100.0);
    if inputs.include_overhead {
        with_vat * (1.0 + catalog.percentage(keys::OVERHEAD_RATE) / 100.0)
    } else {
        with_vat
    }
}

/// Inverts the profit formula for the unrounded sale price.
///
/// `fixed` is the channel's fixed cost total; both rates are in percent.
///
/// ## Errors
/// - `TargetUnreachable` on margin basis when commission plus target
///   reach 100%
/// - `CommissionTooHigh` on markup basis when commission reaches 100%
///
/// ## Example
/// ```rust
/// use omniprice_core::engine::solve_price;
/// use omniprice_core::ProfitBasis;
///
/// let price = solve_price(100.0, 10.0, 30.0, ProfitBasis::Markup).unwrap();
/// assert!((price - 144.444).abs() < 1e-3);
/// ```
pub fn solve_price(
    fixed: f64,
    commission_rate: f64,
    target_rate: f64,
    basis: ProfitBasis,
) -> Result<f64, PricingError> {
    let c = commission_rate / 100.0;
    let t = target_rate / 100.0;

    match basis {
        ProfitBasis::Margin => {
            let denominator = (1.0 - c) - t;
            if denominator <= 0.0 {
                return Err(PricingError::TargetUnreachable);
            }
            Ok(fixed / denominator)
        }
        ProfitBasis::Markup => {
            if c >= 1.0 {
                return Err(PricingError::CommissionTooHigh);
            }
            Ok(fixed * (1.0 + t) / (1.0 - c))
        }
    }
}

/// Achieved profit in percent of the sale price (margin) or of the fixed
/// cost (markup). Zero when the denominator is zero.
pub fn profit_rate(net_profit: f64, sale_price: f64, fixed: f64, basis: ProfitBasis) -> f64 {
    if sale_price <= 0.0 {
        return 0.0;
    }
    match basis {
        ProfitBasis::Margin => net_profit / sale_price * 100.0,
        ProfitBasis::Markup if fixed == 0.0 => 0.0,
        ProfitBasis::Markup => net_profit / fixed * 100.0,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CostSetting, CostValue};

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() < tolerance,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_solve_margin() {
        let price = solve_price(100.0, 20.0, 20.0, ProfitBasis::Margin).unwrap();
        assert_close(price, 166.67, 0.005);
    }

    #[test]
    fn test_solve_margin_unreachable() {
        assert_eq!(
            solve_price(100.0, 50.0, 50.0, ProfitBasis::Margin),
            Err(PricingError::TargetUnreachable)
        );
        assert_eq!(
            solve_price(100.0, 60.0, 50.0, ProfitBasis::Margin),
            Err(PricingError::TargetUnreachable)
        );
    }

    #[test]
    fn test_solve_markup() {
        let price = solve_price(100.0, 10.0, 30.0, ProfitBasis::Markup).unwrap();
        assert_close(price, 144.44, 0.005);
    }

    #[test]
    fn test_solve_markup_commission_too_high() {
        assert_eq!(
            solve_price(100.0, 100.0, 10.0, ProfitBasis::Markup),
            Err(PricingError::CommissionTooHigh)
        );
        // markup has no ceiling on the target
        assert!(solve_price(100.0, 50.0, 500.0, ProfitBasis::Markup).is_ok());
    }

    #[test]
    fn test_profit_rate() {
        assert_close(profit_rate(20.0, 100.0, 60.0, ProfitBasis::Margin), 20.0, 1e-9);
        assert_close(profit_rate(20.0, 100.0, 80.0, ProfitBasis::Markup), 25.0, 1e-9);
        assert_eq!(profit_rate(20.0, 0.0, 80.0, ProfitBasis::Margin), 0.0);
        assert_eq!(profit_rate(20.0, 100.0, 0.0, ProfitBasis::Markup), 0.0);
    }

    #[test]
    fn test_product_cost_total() {
        let catalog = SettingsCatalog::defaults();
        let mut inputs = CalculationInputs::default();
        assert_close(product_cost_total(&inputs, &catalog), 143.0, 1e-9);

        inputs.include_overhead = false;
        assert_close(product_cost_total(&inputs, &catalog), 110.0, 1e-9);
    }

    #[test]
    fn test_filtered_channels_keep_order() {
        let results = compute(
            &CalculationInputs::default(),
            &SettingsCatalog::defaults(),
            &[ChannelKey::MarketplaceC, ChannelKey::Web],
        );
        let keys: Vec<ChannelKey> = results.iter().map(|r| r.channel_key).collect();
        assert_eq!(keys, vec![ChannelKey::Web, ChannelKey::MarketplaceC]);
    }

    #[test]
    fn test_empty_selection() {
        let results = compute(&CalculationInputs::default(), &SettingsCatalog::defaults(), &[]);
        assert!(results.is_empty());
    }

    #[test]
    fn test_unreachable_channel_does_not_block_others() {
        let mut catalog = SettingsCatalog::defaults();
        catalog.update_value(keys::TY_COMMISSION, 90.0).unwrap();

        let results = compute(&CalculationInputs::default(), &catalog, &ChannelKey::ALL);
        assert_eq!(results.len(), 4);

        let ty = &results[1];
        assert_eq!(ty.channel_key, ChannelKey::MarketplaceA);
        assert_eq!(
            ty.error.as_deref(),
            Some("Target profit is unreachable at this commission rate")
        );
        assert_eq!(ty.sale_price, 0.0);
        assert_eq!(ty.net_profit, 0.0);
        assert_eq!(ty.breakdown, CostBreakdown::default());

        assert!(results[0].is_ok());
        assert!(results[2].is_ok());
        assert!(results[3].is_ok());
    }

    #[test]
    fn test_platform_fee_only_on_profile_with_fee() {
        let results = compute(
            &CalculationInputs::default(),
            &SettingsCatalog::defaults(),
            &ChannelKey::ALL,
        );
        assert_close(results[1].breakdown.platform_fee, 10.2, 1e-9);
        assert_eq!(results[0].breakdown.platform_fee, 0.0);
        assert_eq!(results[2].breakdown.platform_fee, 0.0);
        assert_eq!(results[3].breakdown.platform_fee, 0.0);
    }

    #[test]
    fn test_web_returns_at_outbound_rate() {
        let results = compute(
            &CalculationInputs::default(),
            &SettingsCatalog::defaults(),
            &[ChannelKey::Web],
        );
        // 118.9 * 1.2 = 142.68; (142.68 + 142.68 * 0.2) / 0.8
        assert_close(results[0].breakdown.shipping_total, 214.02, 1e-9);
    }

    #[test]
    fn test_commission_stored_as_amount_is_not_charged() {
        let catalog = SettingsCatalog::new(
            SettingsCatalog::defaults()
                .iter()
                .cloned()
                .map(|mut s| {
                    if s.key == keys::SITE_POS {
                        s.cost = CostValue::currency(3.0, crate::types::VatMode::TaxExclusive, 20.0);
                    }
                    s
                })
                .collect(),
        );

        let results = compute(&CalculationInputs::default(), &catalog, &[ChannelKey::Web]);
        assert!(results[0].is_ok());
        assert_eq!(results[0].breakdown.commission_amount, 0.0);
        assert!(results[0].sale_price < 519.99);
    }

    #[test]
    fn test_custom_profile() {
        let base = SettingsCatalog::defaults();
        let catalog = SettingsCatalog::new(
            base.iter()
                .cloned()
                .chain(std::iter::once(CostSetting::new(
                    "webCommission",
                    "Web commission",
                    CostValue::percentage(50.0),
                )))
                .collect(),
        );

        let mut profile = ChannelProfile::for_channel(ChannelKey::Web);
        profile.commission_key = "webCommission".to_string();
        profile.name = "Shop".to_string();

        let engine = PricingEngine::with_profiles(vec![profile]);
        let inputs = CalculationInputs {
            target_profit_rate: 50.0,
            ..CalculationInputs::default()
        };
        let results = engine.compute(&inputs, &catalog, &[ChannelKey::Web, ChannelKey::MarketplaceB]);

        assert_eq!(results[0].channel_name, "Shop");
        assert!(results[0].error.is_some());
        // falls back to the built-in profile
        assert_eq!(results[1].channel_name, "Hepsiburada");
        assert!(results[1].is_ok());
    }

    #[test]
    fn test_markup_profit_rate_meets_target() {
        let inputs = CalculationInputs {
            profit_basis: ProfitBasis::Markup,
            target_profit_rate: 30.0,
            ..CalculationInputs::default()
        };
        let results = compute(&inputs, &SettingsCatalog::defaults(), &ChannelKey::ALL);
        for result in &results {
            assert!(result.is_ok());
            assert!(result.profit_rate >= 30.0, "{}: {}", result.channel_key, result.profit_rate);
        }
    }

    #[test]
    fn test_full_return_rate_stays_finite() {
        let inputs = CalculationInputs {
            return_rate: 100.0,
            ..CalculationInputs::default()
        };
        let results = compute(&inputs, &SettingsCatalog::defaults(), &ChannelKey::ALL);
        for result in &results {
            assert!(result.sale_price.is_finite());
            assert_eq!(result.breakdown.packaging_total, crate::UNRECOVERABLE_COST);
            assert_eq!(result.breakdown.shipping_total, crate::UNRECOVERABLE_COST);
        }
    }
}

//! # Domain Types
//!
//! Core domain types used throughout OmniPrice.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  INPUTS                                OUTPUTS                          │
//! │  ┌─────────────────────┐               ┌─────────────────────┐          │
//! │  │ CalculationInputs   │               │ ChannelResult       │          │
//! │  │  product cost/VAT   │   compute()   │  sale / list price  │          │
//! │  │  return rate        │ ────────────► │  net profit, rate   │          │
//! │  │  target + basis     │               │  CostBreakdown      │          │
//! │  │  overhead, discount │               │  error (optional)   │          │
//! │  └─────────────────────┘               └─────────────────────┘          │
//! │  ┌─────────────────────┐                                                │
//! │  │ CostSetting         │  key + label + CostValue:                      │
//! │  │                     │   Percentage { value }                         │
//! │  │                     │   Currency   { value, vat_mode, vat_rate }     │
//! │  └─────────────────────┘                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All amounts are `f64` in the single shop currency. Rates are percentages
//! (20.0 means 20%), never fractions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::catalog::SettingsCatalog;
use crate::error::{CoreError, PricingError, ValidationError};
use crate::money;
use crate::DEFAULT_VAT_RATE;

// =============================================================================
// Channel Key
// =============================================================================

/// A sales channel.
///
/// Declaration order is the fixed presentation order, so `Ord` sorts
/// channels the way results are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ChannelKey {
    /// Own web shop.
    #[serde(rename = "SITE")]
    Web,
    /// Trendyol.
    #[serde(rename = "TY")]
    MarketplaceA,
    /// Hepsiburada.
    #[serde(rename = "HB")]
    MarketplaceB,
    /// Pazarama.
    #[serde(rename = "PAZARAMA")]
    MarketplaceC,
}

impl ChannelKey {
    /// Every channel, in presentation order.
    pub const ALL: [ChannelKey; 4] = [
        ChannelKey::Web,
        ChannelKey::MarketplaceA,
        ChannelKey::MarketplaceB,
        ChannelKey::MarketplaceC,
    ];

    /// Short wire code, also used in copied price lists (`TY: 1769,99`).
    pub const fn code(&self) -> &'static str {
        match self {
            ChannelKey::Web => "SITE",
            ChannelKey::MarketplaceA => "TY",
            ChannelKey::MarketplaceB => "HB",
            ChannelKey::MarketplaceC => "PAZARAMA",
        }
    }

    /// Display name used when no custom channel profile overrides it.
    pub const fn default_name(&self) -> &'static str {
        match self {
            ChannelKey::Web => "Web",
            ChannelKey::MarketplaceA => "Trendyol",
            ChannelKey::MarketplaceB => "Hepsiburada",
            ChannelKey::MarketplaceC => "Pazarama",
        }
    }
}

impl fmt::Display for ChannelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ChannelKey {
    type Err = CoreError;

    /// Accepts the wire code or the default display name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        ChannelKey::ALL
            .into_iter()
            .find(|key| {
                key.code().eq_ignore_ascii_case(needle)
                    || key.default_name().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| CoreError::UnknownChannel(needle.to_string()))
    }
}

// =============================================================================
// VAT Mode
// =============================================================================

/// Whether a currency amount already contains VAT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum VatMode {
    /// Stated amount already includes VAT.
    TaxInclusive,
    /// VAT is added on top of the stated amount.
    TaxExclusive,
}

impl fmt::Display for VatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VatMode::TaxInclusive => f.write_str("tax-inclusive"),
            VatMode::TaxExclusive => f.write_str("tax-exclusive"),
        }
    }
}

impl FromStr for VatMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tax-inclusive" | "inclusive" | "incl" => Ok(VatMode::TaxInclusive),
            "tax-exclusive" | "exclusive" | "excl" => Ok(VatMode::TaxExclusive),
            _ => Err(ValidationError::NotAllowed {
                field: "VAT mode".to_string(),
                allowed: vec!["tax-inclusive".to_string(), "tax-exclusive".to_string()],
            }),
        }
    }
}

// =============================================================================
// Profit Basis
// =============================================================================

/// What the target profit rate is a fraction of.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum ProfitBasis {
    /// Profit as a share of the sale price.
    #[default]
    Margin,
    /// Profit as a share of the fixed cost.
    Markup,
}

impl fmt::Display for ProfitBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfitBasis::Margin => f.write_str("margin"),
            ProfitBasis::Markup => f.write_str("markup"),
        }
    }
}

impl FromStr for ProfitBasis {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "margin" => Ok(ProfitBasis::Margin),
            "markup" => Ok(ProfitBasis::Markup),
            _ => Err(ValidationError::NotAllowed {
                field: "profit basis".to_string(),
                allowed: vec!["margin".to_string(), "markup".to_string()],
            }),
        }
    }
}

// =============================================================================
// Cost Setting
// =============================================================================

/// The value of one cost line, tagged by unit.
///
/// A currency value without a VAT mode cannot be constructed or
/// deserialized. The VAT rate may be omitted and then counts as
/// [`DEFAULT_VAT_RATE`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "unit", rename_all = "snake_case")]
pub enum CostValue {
    /// A rate in percent (commission, overhead).
    Percentage { value: f64 },
    /// A flat amount (shipping, packaging, fees).
    Currency {
        value: f64,
        #[serde(rename = "vatMode")]
        vat_mode: VatMode,
        #[serde(rename = "vatRate", default)]
        vat_rate: Option<f64>,
    },
}

impl CostValue {
    /// Creates a currency value with an explicit VAT rate.
    pub const fn currency(value: f64, vat_mode: VatMode, vat_rate: f64) -> Self {
        CostValue::Currency {
            value,
            vat_mode,
            vat_rate: Some(vat_rate),
        }
    }

    /// Creates a percentage value.
    pub const fn percentage(value: f64) -> Self {
        CostValue::Percentage { value }
    }

    /// The stated number, as entered.
    pub const fn raw(&self) -> f64 {
        match self {
            CostValue::Percentage { value } | CostValue::Currency { value, .. } => *value,
        }
    }

    /// The amount with VAT included. Percentages come back unchanged.
    pub fn inclusive_amount(&self) -> f64 {
        match *self {
            CostValue::Percentage { value } => value,
            CostValue::Currency {
                value,
                vat_mode,
                vat_rate,
            } => money::to_inclusive(value, vat_mode, vat_rate),
        }
    }

    /// `"percentage"` or `"currency"`.
    pub const fn unit_name(&self) -> &'static str {
        match self {
            CostValue::Percentage { .. } => "percentage",
            CostValue::Currency { .. } => "currency",
        }
    }

    /// Returns the effective VAT rate of a currency value.
    pub fn effective_vat_rate(&self) -> Option<f64> {
        match self {
            CostValue::Percentage { .. } => None,
            CostValue::Currency { vat_rate, .. } => Some(vat_rate.unwrap_or(DEFAULT_VAT_RATE)),
        }
    }
}

/// One cost-line item of the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CostSetting {
    /// Stable lookup key (`"tyCommission"`, `"box"`, ...).
    pub key: String,
    /// Human-readable label.
    pub label: String,
    /// Value and unit.
    pub cost: CostValue,
}

impl CostSetting {
    pub fn new(key: impl Into<String>, label: impl Into<String>, cost: CostValue) -> Self {
        CostSetting {
            key: key.into(),
            label: label.into(),
            cost,
        }
    }

    /// Unit suffix for display: `%` or the currency symbol.
    pub fn suffix<'a>(&self, currency_symbol: &'a str) -> &'a str {
        match self.cost {
            CostValue::Percentage { .. } => "%",
            CostValue::Currency { .. } => currency_symbol,
        }
    }
}

// =============================================================================
// Calculation Inputs
// =============================================================================

/// The per-product form values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CalculationInputs {
    /// Product purchase cost, VAT excluded.
    pub product_cost_ex_vat: f64,
    /// VAT rate applied to the product cost, in percent.
    pub product_vat_rate: f64,
    /// Expected share of units returned, in percent (0 to 100, exclusive).
    pub return_rate: f64,
    /// Target margin or markup, in percent.
    pub target_profit_rate: f64,
    /// What the target is measured against.
    pub profit_basis: ProfitBasis,
    /// Inflate the product cost by the company overhead rate.
    pub include_overhead: bool,
    /// Discount to display against a list price, in percent. 0 disables it.
    #[serde(default)]
    pub discount_rate: f64,
}

impl Default for CalculationInputs {
    fn default() -> Self {
        CalculationInputs {
            product_cost_ex_vat: 100.0,
            product_vat_rate: 10.0,
            return_rate: 20.0,
            target_profit_rate: 20.0,
            profit_basis: ProfitBasis::Margin,
            include_overhead: true,
            discount_rate: 0.0,
        }
    }
}

// =============================================================================
// Channel Result
// =============================================================================

/// VAT-inclusive cost of each packaging item, before return amortization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PackagingDetails {
    #[serde(rename = "box")]
    pub box_cost: f64,
    pub card: f64,
    pub bag: f64,
    pub tape: f64,
}

impl PackagingDetails {
    pub fn total(&self) -> f64 {
        self.box_cost + self.card + self.bag + self.tape
    }
}

/// Where the sale price goes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub commission_amount: f64,
    pub net_after_commission: f64,
    /// Expected shipping per kept sale, returns included.
    pub shipping_total: f64,
    /// Expected packaging per kept sale, returns included.
    pub packaging_total: f64,
    pub packaging_details: PackagingDetails,
    /// Product cost with VAT, and overhead when selected.
    pub product_cost_total: f64,
    pub platform_fee: f64,
    pub invoice_cost: f64,
}

/// One channel's computed outcome.
///
/// When `error` is set every numeric field is zero and `list_price` is
/// `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ChannelResult {
    pub channel_key: ChannelKey,
    pub channel_name: String,
    pub sale_price: f64,
    /// Pre-discount reference price. `None` without a discount.
    pub list_price: Option<f64>,
    pub net_profit: f64,
    /// Profit in percent of the sale price (margin) or fixed cost (markup).
    pub profit_rate: f64,
    pub breakdown: CostBreakdown,
    pub error: Option<String>,
}

impl ChannelResult {
    /// A zeroed result carrying the solver failure.
    pub fn failed(channel_key: ChannelKey, channel_name: impl Into<String>, err: PricingError) -> Self {
        ChannelResult {
            channel_key,
            channel_name: channel_name.into(),
            sale_price: 0.0,
            list_price: None,
            net_profit: 0.0,
            profit_rate: 0.0,
            breakdown: CostBreakdown::default(),
            error: Some(err.to_string()),
        }
    }

    /// True when a price was solved.
    #[inline]
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

// =============================================================================
// Snapshot
// =============================================================================

/// Everything the form owns, as persisted between sessions.
///
/// Opaque to the engine; the storage layer writes it as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub settings: SettingsCatalog,
    pub inputs: CalculationInputs,
    pub selected_channels: Vec<ChannelKey>,
}

impl Snapshot {
    /// Built-in defaults with every channel selected.
    pub fn defaults() -> Self {
        Snapshot {
            settings: SettingsCatalog::defaults(),
            inputs: CalculationInputs::default(),
            selected_channels: ChannelKey::ALL.to_vec(),
        }
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Snapshot::defaults()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

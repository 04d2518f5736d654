//! # Cost Catalog
//!
//! The table of cost settings the engine reads from, and the per-channel
//! profiles that say which settings apply to which channel.
//!
//! ## Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SettingsCatalog (ordered, looked up by key)                            │
//! │  ├── rates      fgRate, tyCommission, hbCommission, sitePos, ...        │
//! │  ├── fees       platformFee                                             │
//! │  ├── shipping   marketplaceShip, marketplaceRetShip, siteShip, ...      │
//! │  ├── packaging  box, card, bag, tape                                    │
//! │  └── invoicing  invoiceMp, invoiceSite                                  │
//! │                                                                         │
//! │  ChannelProfile (one per channel)                                       │
//! │  SITE ──► sitePos + siteShip + invoiceSite                              │
//! │  TY   ──► tyCommission + marketplaceShip/RetShip + invoiceMp + fee      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lookups of a missing key, or of a key holding the other unit, read as
//! zero and log a warning. A stored catalog written before a setting
//! existed is repaired with [`SettingsCatalog::fill_missing_defaults`],
//! one with mistyped units with [`SettingsCatalog::repair_units`].

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{CoreError, CoreResult};
use crate::types::{ChannelKey, CostSetting, CostValue, PackagingDetails, VatMode};

// =============================================================================
// Setting Keys
// =============================================================================

/// Stable keys of the built-in cost settings.
pub mod keys {
    pub const OVERHEAD_RATE: &str = "fgRate";
    pub const TY_COMMISSION: &str = "tyCommission";
    pub const HB_COMMISSION: &str = "hbCommission";
    pub const SITE_POS: &str = "sitePos";
    pub const PAZARAMA_COMMISSION: &str = "pazaramaCommission";
    pub const PLATFORM_FEE: &str = "platformFee";
    pub const MARKETPLACE_SHIP: &str = "marketplaceShip";
    pub const MARKETPLACE_RETURN_SHIP: &str = "marketplaceRetShip";
    pub const SITE_SHIP: &str = "siteShip";
    pub const PAZARAMA_SHIP: &str = "pazaramaShip";
    pub const BOX: &str = "box";
    pub const CARD: &str = "card";
    pub const BAG: &str = "bag";
    pub const TAPE: &str = "tape";
    pub const INVOICE_MARKETPLACE: &str = "invoiceMp";
    pub const INVOICE_SITE: &str = "invoiceSite";
}

// =============================================================================
// Settings Catalog
// =============================================================================

/// Ordered list of cost settings, unique by key.
///
/// Serializes as a plain JSON array so stored snapshots stay readable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SettingsCatalog {
    settings: Vec<CostSetting>,
}

impl SettingsCatalog {
    /// The built-in catalog.
    pub fn defaults() -> Self {
        use keys::*;
        use crate::types::VatMode::{TaxExclusive, TaxInclusive};

        let pct = |key: &str, label: &str, value: f64| {
            CostSetting::new(key, label, CostValue::percentage(value))
        };
        let cur = |key: &str, label: &str, value: f64, mode: VatMode| {
            CostSetting::new(key, label, CostValue::currency(value, mode, 20.0))
        };

        SettingsCatalog {
            settings: vec![
                // Rates
                pct(OVERHEAD_RATE, "Company overhead rate", 30.0),
                pct(TY_COMMISSION, "Trendyol commission", 21.5),
                pct(HB_COMMISSION, "Hepsiburada commission", 18.0),
                pct(SITE_POS, "Web virtual POS", 3.0),
                pct(PAZARAMA_COMMISSION, "Pazarama commission", 12.0),
                // Service fees
                cur(PLATFORM_FEE, "Platform service fee (Trendyol)", 10.2, TaxInclusive),
                // Shipping
                cur(MARKETPLACE_SHIP, "Trendyol shipping", 81.08, TaxExclusive),
                cur(MARKETPLACE_RETURN_SHIP, "Trendyol return shipping", 99.99, TaxExclusive),
                cur(SITE_SHIP, "Web shipping", 118.9, TaxExclusive),
                cur(PAZARAMA_SHIP, "Pazarama shipping", 140.69, TaxInclusive),
                // Packaging
                cur(BOX, "Box", 12.75, TaxExclusive),
                cur(CARD, "Thank-you card", 1.2, TaxExclusive),
                cur(BAG, "Box bag", 2.6, TaxExclusive),
                cur(TAPE, "Return safety tape", 7.5, TaxExclusive),
                // e-Invoice
                cur(INVOICE_MARKETPLACE, "e-Invoice (marketplace)", 0.19, TaxExclusive),
                cur(INVOICE_SITE, "e-Invoice (web)", 1.2, TaxExclusive),
            ],
        }
    }

    /// Builds a catalog from arbitrary settings. Later duplicates of a key
    /// are dropped.
    pub fn new(settings: Vec<CostSetting>) -> Self {
        let mut unique: Vec<CostSetting> = Vec::with_capacity(settings.len());
        for setting in settings {
            if unique.iter().any(|s| s.key == setting.key) {
                warn!(key = %setting.key, "Duplicate cost setting ignored");
                continue;
            }
            unique.push(setting);
        }
        SettingsCatalog { settings: unique }
    }

    pub fn iter(&self) -> impl Iterator<Item = &CostSetting> {
        self.settings.iter()
    }

    pub fn len(&self) -> usize {
        self.settings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&CostSetting> {
        self.settings.iter().find(|s| s.key == key)
    }

    fn get_mut(&mut self, key: &str) -> CoreResult<&mut CostSetting> {
        self.settings
            .iter_mut()
            .find(|s| s.key == key)
            .ok_or_else(|| CoreError::UnknownSetting(key.to_string()))
    }

    /// Reads a rate in percent. Missing keys, and keys stored as a
    /// currency amount, read as 0.
    pub fn percentage(&self, key: &str) -> f64 {
        match self.lookup(key, "percentage") {
            Some(cost) => cost.raw(),
            None => 0.0,
        }
    }

    /// Reads an amount with VAT included. Missing keys, and keys stored as
    /// a percentage, read as 0.
    pub fn inclusive_amount(&self, key: &str) -> f64 {
        match self.lookup(key, "currency") {
            Some(cost) => cost.inclusive_amount(),
            None => 0.0,
        }
    }

    fn lookup(&self, key: &str, unit: &str) -> Option<&CostValue> {
        let Some(setting) = self.get(key) else {
            warn!(key, "Cost setting missing, using 0");
            return None;
        };
        if setting.cost.unit_name() != unit {
            warn!(
                key,
                expected = unit,
                actual = setting.cost.unit_name(),
                "Cost setting has the wrong unit, using 0"
            );
            return None;
        }
        Some(&setting.cost)
    }

    /// VAT-inclusive cost of each packaging item.
    pub fn packaging(&self) -> PackagingDetails {
        PackagingDetails {
            box_cost: self.inclusive_amount(keys::BOX),
            card: self.inclusive_amount(keys::CARD),
            bag: self.inclusive_amount(keys::BAG),
            tape: self.inclusive_amount(keys::TAPE),
        }
    }

    // =========================================================================
    // Editing
    // =========================================================================

    /// Replaces the stated value of a setting, keeping its unit.
    pub fn update_value(&mut self, key: &str, value: f64) -> CoreResult<()> {
        let setting = self.get_mut(key)?;
        match &mut setting.cost {
            CostValue::Percentage { value: v } | CostValue::Currency { value: v, .. } => *v = value,
        }
        Ok(())
    }

    /// Changes the VAT mode and/or rate of a currency setting.
    ///
    /// ## Errors
    /// - `UnknownSetting` if no setting has this key
    /// - `UnitMismatch` if the setting is a percentage
    pub fn update_vat(
        &mut self,
        key: &str,
        mode: Option<VatMode>,
        rate: Option<f64>,
    ) -> CoreResult<()> {
        let setting = self.get_mut(key)?;
        match &mut setting.cost {
            CostValue::Percentage { .. } => Err(CoreError::UnitMismatch {
                key: key.to_string(),
                expected: "currency".to_string(),
                actual: "percentage".to_string(),
            }),
            CostValue::Currency {
                vat_mode, vat_rate, ..
            } => {
                if let Some(mode) = mode {
                    *vat_mode = mode;
                }
                if let Some(rate) = rate {
                    *vat_rate = Some(rate);
                }
                Ok(())
            }
        }
    }

    /// Keys present in the built-in catalog but absent here.
    pub fn missing_keys(&self) -> Vec<String> {
        SettingsCatalog::defaults()
            .settings
            .into_iter()
            .filter(|d| self.get(&d.key).is_none())
            .map(|d| d.key)
            .collect()
    }

    /// Appends every built-in setting this catalog lacks.
    ///
    /// Returns how many settings were added.
    pub fn fill_missing_defaults(&mut self) -> usize {
        let mut added = 0;
        for default in SettingsCatalog::defaults().settings {
            if self.get(&default.key).is_none() {
                self.settings.push(default);
                added += 1;
            }
        }
        added
    }

    /// Checks that every built-in key holds the unit it is read as.
    ///
    /// Keys outside the built-in catalog are not checked.
    ///
    /// ## Errors
    /// - `UnitMismatch` for the first setting stored with the other unit
    pub fn check_units(&self) -> CoreResult<()> {
        match self.mismatched_units().into_iter().next() {
            Some((key, expected, actual)) => Err(CoreError::UnitMismatch {
                key,
                expected: expected.to_string(),
                actual: actual.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Replaces every setting stored with the wrong unit by its built-in
    /// default.
    ///
    /// Returns how many settings were replaced.
    pub fn repair_units(&mut self) -> usize {
        let defaults = SettingsCatalog::defaults();
        let mut repaired = 0;
        for setting in &mut self.settings {
            let Some(default) = defaults.get(&setting.key) else {
                continue;
            };
            if setting.cost.unit_name() != default.cost.unit_name() {
                warn!(
                    key = %setting.key,
                    actual = setting.cost.unit_name(),
                    "Cost setting had the wrong unit, reset to default"
                );
                setting.cost = default.cost;
                repaired += 1;
            }
        }
        repaired
    }

    fn mismatched_units(&self) -> Vec<(String, &'static str, &'static str)> {
        SettingsCatalog::defaults()
            .settings
            .into_iter()
            .filter_map(|default| {
                let stored = self.get(&default.key)?;
                let (expected, actual) = (default.cost.unit_name(), stored.cost.unit_name());
                (expected != actual).then_some((default.key, expected, actual))
            })
            .collect()
    }
}

impl Default for SettingsCatalog {
    fn default() -> Self {
        SettingsCatalog::defaults()
    }
}

// =============================================================================
// Channel Profile
// =============================================================================

/// Which catalog settings make up one channel's costs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelProfile {
    pub key: ChannelKey,
    pub name: String,
    pub commission_key: String,
    pub shipping_key: String,
    /// Return shipping setting. `None` charges returns at the outbound rate.
    pub return_shipping_key: Option<String>,
    pub invoice_key: String,
    pub platform_fee_key: Option<String>,
}

impl ChannelProfile {
    /// The built-in profiles, in presentation order.
    pub fn defaults() -> Vec<ChannelProfile> {
        ChannelKey::ALL.into_iter().map(ChannelProfile::for_channel).collect()
    }

    /// Built-in profile of one channel.
    pub fn for_channel(key: ChannelKey) -> ChannelProfile {
        use keys::*;

        let (commission, shipping, return_shipping, invoice, platform_fee) = match key {
            ChannelKey::Web => (SITE_POS, SITE_SHIP, None, INVOICE_SITE, None),
            ChannelKey::MarketplaceA => (
                TY_COMMISSION,
                MARKETPLACE_SHIP,
                Some(MARKETPLACE_RETURN_SHIP),
                INVOICE_MARKETPLACE,
                Some(PLATFORM_FEE),
            ),
            ChannelKey::MarketplaceB => (
                HB_COMMISSION,
                MARKETPLACE_SHIP,
                Some(MARKETPLACE_RETURN_SHIP),
                INVOICE_MARKETPLACE,
                None,
            ),
            ChannelKey::MarketplaceC => (
                PAZARAMA_COMMISSION,
                PAZARAMA_SHIP,
                Some(MARKETPLACE_RETURN_SHIP),
                INVOICE_MARKETPLACE,
                None,
            ),
        };

        ChannelProfile {
            key,
            name: key.default_name().to_string(),
            commission_key: commission.to_string(),
            shipping_key: shipping.to_string(),
            return_shipping_key: return_shipping.map(str::to_string),
            invoice_key: invoice.to_string(),
            platform_fee_key: platform_fee.map(str::to_string),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

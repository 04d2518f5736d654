//! # Validation Module
//!
//! Input coercion and range checks for OmniPrice.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Text entry (CLI flags, form fields)                           │
//! │  └── coerce_number: "12,5" → 12.5, "abc" → 0                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                   │
//! │  ├── Rates and amounts must not be negative                             │
//! │  ├── Return and discount rates must not exceed 100                      │
//! │  └── Other rates stay under MAX_RATE, amounts under MAX_AMOUNT          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Engine                                                        │
//! │  └── Never fails; unsolvable channels carry an error string             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use omniprice_core::validation::{coerce_number, validate_inputs};
//! use omniprice_core::CalculationInputs;
//!
//! assert_eq!(coerce_number("12,5"), 12.5);
//! assert_eq!(coerce_number("abc"), 0.0);
//!
//! validate_inputs(&CalculationInputs::default()).unwrap();
//! ```

use crate::error::ValidationError;
use crate::types::{CalculationInputs, CostValue};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Largest accepted amount (product cost, setting amounts).
pub const MAX_AMOUNT: f64 = 1_000_000_000.0;

/// Largest accepted rate in percent when no tighter bound applies.
pub const MAX_RATE: f64 = 1_000.0;

// =============================================================================
// Coercion
// =============================================================================

/// Parses user text as a number. Anything unparseable or non-finite is 0.
///
/// A comma is accepted as decimal separator.
///
/// ## Example
/// ```rust
/// use omniprice_core::validation::coerce_number;
///
/// assert_eq!(coerce_number(" 81.08 "), 81.08);
/// assert_eq!(coerce_number("0,19"), 0.19);
/// assert_eq!(coerce_number(""), 0.0);
/// assert_eq!(coerce_number("inf"), 0.0);
/// ```
pub fn coerce_number(text: &str) -> f64 {
    let normalized = text.trim().replace(',', ".");
    match normalized.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Replaces non-finite numbers in the inputs with 0.
pub fn sanitize_inputs(inputs: CalculationInputs) -> CalculationInputs {
    let finite = |v: f64| if v.is_finite() { v } else { 0.0 };
    CalculationInputs {
        product_cost_ex_vat: finite(inputs.product_cost_ex_vat),
        product_vat_rate: finite(inputs.product_vat_rate),
        return_rate: finite(inputs.return_rate),
        target_profit_rate: finite(inputs.target_profit_rate),
        discount_rate: finite(inputs.discount_rate),
        ..inputs
    }
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a rate in percent.
///
/// ## Rules
/// - Must not be negative
/// - Must not exceed `max`, or [`MAX_RATE`] when none is given
///
/// ## Example
/// ```rust
/// use omniprice_core::validation::validate_rate;
///
/// assert!(validate_rate("return rate", 20.0, Some(100.0)).is_ok());
/// assert!(validate_rate("return rate", 120.0, Some(100.0)).is_err());
/// assert!(validate_rate("target", -1.0, None).is_err());
/// assert!(validate_rate("target", 5_000.0, None).is_err());
/// ```
pub fn validate_rate(field: &str, value: f64, max: Option<f64>) -> ValidationResult<()> {
    if value < 0.0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }

    let max = max.unwrap_or(MAX_RATE);
    if !value.is_finite() || value > max {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0.0,
            max,
        });
    }

    Ok(())
}

/// Validates a product cost.
///
/// ## Rules
/// - Must not be negative
/// - Must not exceed [`MAX_AMOUNT`]
/// - Zero is allowed (free samples still cost shipping)
pub fn validate_cost(field: &str, value: f64) -> ValidationResult<()> {
    if value < 0.0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }
    if !value.is_finite() || value > MAX_AMOUNT {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0.0,
            max: MAX_AMOUNT,
        });
    }
    Ok(())
}

/// Validates the calculation form.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  calc --cost 100 --return-rate 120                                      │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_inputs ← THIS FUNCTION                                        │
/// │       │                                                                 │
/// │       ├── cost < 0?          → "product cost cannot be negative"        │
/// │       ├── cost > 1e9?        → "product cost must be between 0 and ..." │
/// │       ├── rate < 0?          → "<rate> cannot be negative"              │
/// │       ├── return > 100?      → "return rate must be between 0 and 100"  │
/// │       ├── discount > 100?    → "discount rate must be between 0 and 100"│
/// │       │                                                                 │
/// │       └── OK → save inputs, compute                                     │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_inputs(inputs: &CalculationInputs) -> ValidationResult<()> {
    validate_cost("product cost", inputs.product_cost_ex_vat)?;
    validate_rate("product VAT rate", inputs.product_vat_rate, None)?;
    validate_rate("return rate", inputs.return_rate, Some(100.0))?;
    validate_rate("target profit rate", inputs.target_profit_rate, None)?;
    validate_rate("discount rate", inputs.discount_rate, Some(100.0))?;
    Ok(())
}

/// Validates a new value for a cost setting.
///
/// Percentages are bounded like rates, amounts like costs. A stated VAT
/// rate is checked as a rate.
pub fn validate_setting_value(key: &str, cost: &CostValue) -> ValidationResult<()> {
    if !cost.raw().is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: key.to_string(),
            reason: "must be a number".to_string(),
        });
    }
    match cost {
        CostValue::Percentage { value } => validate_rate(key, *value, None)?,
        CostValue::Currency {
            value, vat_rate, ..
        } => {
            validate_cost(key, *value)?;
            if let Some(rate) = vat_rate {
                validate_rate("VAT rate", *rate, None)?;
            }
        }
    }
    Ok(())
}

/// Validates a setting key typed by the user.
pub fn validate_key(key: &str) -> ValidationResult<String> {
    let key = key.trim();
    if key.is_empty() {
        return Err(ValidationError::Required {
            field: "key".to_string(),
        });
    }
    Ok(key.to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::VatMode;

    #[test]
    fn test_coerce_number() {
        assert_eq!(coerce_number("100"), 100.0);
        assert_eq!(coerce_number("12,5"), 12.5);
        assert_eq!(coerce_number("  7.5 "), 7.5);
        assert_eq!(coerce_number("-3"), -3.0);

        assert_eq!(coerce_number(""), 0.0);
        assert_eq!(coerce_number("abc"), 0.0);
        assert_eq!(coerce_number("NaN"), 0.0);
        assert_eq!(coerce_number("1e400"), 0.0);
    }

    #[test]
    fn test_sanitize_inputs() {
        let inputs = CalculationInputs {
            product_cost_ex_vat: f64::NAN,
            discount_rate: f64::INFINITY,
            ..CalculationInputs::default()
        };
        let clean = sanitize_inputs(inputs);
        assert_eq!(clean.product_cost_ex_vat, 0.0);
        assert_eq!(clean.discount_rate, 0.0);
        assert_eq!(clean.return_rate, 20.0);
    }

    #[test]
    fn test_validate_rate() {
        assert!(validate_rate("x", 0.0, None).is_ok());
        assert!(validate_rate("x", 100.0, Some(100.0)).is_ok());
        assert!(validate_rate("x", 250.0, None).is_ok());

        assert!(matches!(
            validate_rate("x", -0.1, None),
            Err(ValidationError::Negative { .. })
        ));
        assert!(matches!(
            validate_rate("x", 100.1, Some(100.0)),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(matches!(
            validate_rate("x", 1e12, None),
            Err(ValidationError::OutOfRange { max, .. }) if max == MAX_RATE
        ));
    }

    #[test]
    fn test_validate_cost_upper_bound() {
        assert!(validate_cost("product cost", MAX_AMOUNT).is_ok());
        assert!(matches!(
            validate_cost("product cost", MAX_AMOUNT * 10.0),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(validate_cost("product cost", f64::NAN).is_err());
    }

    #[test]
    fn test_validate_inputs() {
        assert!(validate_inputs(&CalculationInputs::default()).is_ok());

        let bad = CalculationInputs {
            return_rate: 120.0,
            ..CalculationInputs::default()
        };
        let err = validate_inputs(&bad).unwrap_err();
        assert_eq!(err.to_string(), "return rate must be between 0 and 100");

        let bad = CalculationInputs {
            product_cost_ex_vat: -1.0,
            ..CalculationInputs::default()
        };
        assert_eq!(
            validate_inputs(&bad).unwrap_err().to_string(),
            "product cost cannot be negative"
        );
    }

    #[test]
    fn test_validate_inputs_rejects_huge_values() {
        let bad = CalculationInputs {
            product_cost_ex_vat: coerce_number("1e308"),
            ..CalculationInputs::default()
        };
        assert_eq!(
            validate_inputs(&bad).unwrap_err().to_string(),
            "product cost must be between 0 and 1000000000"
        );

        let bad = CalculationInputs {
            product_vat_rate: 1e300,
            ..CalculationInputs::default()
        };
        assert!(validate_inputs(&bad).is_err());

        let bad = CalculationInputs {
            target_profit_rate: 1e300,
            ..CalculationInputs::default()
        };
        assert!(validate_inputs(&bad).is_err());
    }

    #[test]
    fn test_validate_setting_value() {
        assert!(validate_setting_value("box", &CostValue::currency(12.75, VatMode::TaxExclusive, 20.0)).is_ok());
        assert!(validate_setting_value("box", &CostValue::currency(-1.0, VatMode::TaxExclusive, 20.0)).is_err());
        assert!(validate_setting_value("box", &CostValue::currency(1.0, VatMode::TaxExclusive, -5.0)).is_err());
        assert!(validate_setting_value("fgRate", &CostValue::percentage(f64::NAN)).is_err());

        assert!(validate_setting_value("fgRate", &CostValue::percentage(1e308)).is_err());
        assert!(validate_setting_value("box", &CostValue::currency(1e308, VatMode::TaxExclusive, 20.0)).is_err());
        assert!(validate_setting_value("box", &CostValue::currency(1.0, VatMode::TaxExclusive, 1e308)).is_err());
    }

    #[test]
    fn test_validate_key() {
        assert_eq!(validate_key(" box ").unwrap(), "box");
        assert!(validate_key("  ").is_err());
    }
}

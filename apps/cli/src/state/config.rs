//! # Configuration State
//!
//! Display and location settings loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command line (`--db`)
//! 2. Environment variables (`OMNIPRICE_*`)
//! 3. Defaults (this file)
//!
//! Read-only after initialization, so no mutex.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Currency symbol appended to amounts
    pub currency_symbol: String,

    /// Number of decimal places for currency
    pub currency_decimals: u8,

    /// Decimal separator (Turkish style: comma)
    pub decimal_separator: char,

    /// Thousands separator (Turkish style: dot)
    pub thousands_separator: char,

    /// Database file. `None` means the platform data directory.
    pub database_path: Option<PathBuf>,
}

impl Default for ConfigState {
    /// Turkish lira formatting, database in the platform data directory.
    fn default() -> Self {
        ConfigState {
            currency_symbol: "TL".to_string(),
            currency_decimals: 2,
            decimal_separator: ',',
            thousands_separator: '.',
            database_path: None,
        }
    }
}

impl ConfigState {
    /// Creates a new ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `OMNIPRICE_CURRENCY_SYMBOL`: Override currency symbol
    /// - `OMNIPRICE_CURRENCY_DECIMALS`: Override decimal places (0 to 6)
    /// - `OMNIPRICE_DB_PATH`: Database file location
    pub fn from_env() -> Self {
        let mut config = ConfigState::default();

        if let Ok(symbol) = std::env::var("OMNIPRICE_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        if let Ok(decimals) = std::env::var("OMNIPRICE_CURRENCY_DECIMALS") {
            match decimals.parse::<u8>() {
                Ok(d) if d <= 6 => config.currency_decimals = d,
                _ => tracing::warn!(value = %decimals, "Ignoring invalid OMNIPRICE_CURRENCY_DECIMALS"),
            }
        }

        if let Ok(path) = std::env::var("OMNIPRICE_DB_PATH") {
            if !path.trim().is_empty() {
                config.database_path = Some(PathBuf::from(path));
            }
        }

        config
    }

    /// Formats a number with grouping and the configured separators.
    ///
    /// ## Example
    /// ```rust
    /// use omniprice_cli_lib::state::ConfigState;
    ///
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_number(1769.99), "1.769,99");
    /// ```
    pub fn format_number(&self, value: f64) -> String {
        let decimals = self.currency_decimals as usize;
        let digits = format!("{:.*}", decimals, value.abs());
        let (whole, frac) = match digits.split_once('.') {
            Some((whole, frac)) => (whole, Some(frac)),
            None => (digits.as_str(), None),
        };

        // no sign when the value rounds to zero
        let negative = value < 0.0 && digits.chars().any(|c| c.is_ascii_digit() && c != '0');

        let mut out = String::with_capacity(digits.len() + whole.len() / 3 + 1);
        if negative {
            out.push('-');
        }
        for (i, ch) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                out.push(self.thousands_separator);
            }
            out.push(ch);
        }
        if let Some(frac) = frac {
            out.push(self.decimal_separator);
            out.push_str(frac);
        }
        out
    }

    /// Formats an amount as a currency string, e.g. `1.769,99 TL`.
    pub fn format_currency(&self, amount: f64) -> String {
        format!("{} {}", self.format_number(amount), self.currency_symbol)
    }

    /// Formats a rate in percent, e.g. `21,13%`.
    pub fn format_percent(&self, rate: f64) -> String {
        format!("{}%", self.format_number(rate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency_positive() {
        let config = ConfigState::default();
        assert_eq!(config.format_currency(519.99), "519,99 TL");
        assert_eq!(config.format_currency(1.0), "1,00 TL");
        assert_eq!(config.format_currency(0.0), "0,00 TL");
    }

    #[test]
    fn test_format_currency_negative() {
        let config = ConfigState::default();
        assert_eq!(config.format_currency(-1234.5), "-1.234,50 TL");
        assert_eq!(config.format_currency(-0.001), "0,00 TL");
    }

    #[test]
    fn test_format_currency_large() {
        let config = ConfigState::default();
        assert_eq!(config.format_currency(999_999.0), "999.999,00 TL");
        assert_eq!(config.format_currency(1_234_567.891), "1.234.567,89 TL");
    }

    #[test]
    fn test_format_without_decimals() {
        let config = ConfigState {
            currency_decimals: 0,
            currency_symbol: "₺".to_string(),
            ..ConfigState::default()
        };
        assert_eq!(config.format_currency(1769.6), "1.770 ₺");
    }

    #[test]
    fn test_format_percent() {
        let config = ConfigState::default();
        assert_eq!(config.format_percent(21.127), "21,13%");
        assert_eq!(config.format_percent(0.0), "0,00%");
    }
}

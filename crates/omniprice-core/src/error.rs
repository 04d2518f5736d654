//! # Error Types
//!
//! Domain-specific error types for omniprice-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  omniprice-core errors (this file)                                      │
//! │  ├── CoreError        - Catalog / channel lookup failures               │
//! │  ├── PricingError     - Channel-local solver failures                   │
//! │  └── ValidationError  - Input validation failures                       │
//! │                                                                         │
//! │  omniprice-db errors (separate crate)                                   │
//! │  └── DbError          - Snapshot persistence failures                   │
//! │                                                                         │
//! │  CLI errors (in app)                                                    │
//! │  └── ApiError         - What the user sees                              │
//! │                                                                         │
//! │  PricingError never propagates: it is rendered into                     │
//! │  ChannelResult.error and the other channels keep going.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Catalog and channel errors.
///
/// Raised by the editing and lookup APIs around the engine. The engine's
/// `compute` itself never returns one of these.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No cost setting with this key exists in the catalog.
    #[error("Unknown cost setting: {0}")]
    UnknownSetting(String),

    /// The code does not name one of the four channels.
    #[error("Unknown channel: {0}")]
    UnknownChannel(String),

    /// The setting exists but holds the other unit kind.
    ///
    /// ## When This Occurs
    /// - Setting a VAT mode on a percentage setting
    /// - A stored catalog holding a built-in key with the other unit
    ///   (see `SettingsCatalog::check_units`)
    #[error("Setting {key} is a {actual} setting, expected {expected}")]
    UnitMismatch {
        key: String,
        expected: String,
        actual: String,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Pricing Error
// =============================================================================

/// Why a channel's target price could not be solved.
///
/// The `Display` text is what ends up in `ChannelResult::error`.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum PricingError {
    /// Margin basis: commission plus target margin consume the whole price.
    #[error("Target profit is unreachable at this commission rate")]
    TargetUnreachable,

    /// Markup basis: commission takes 100% or more of revenue.
    #[error("Commission cannot be 100% or more")]
    CommissionTooHigh,
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used by the calling layer before values reach the engine.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: f64, max: f64 },

    /// Value must not be negative.
    #[error("{field} cannot be negative")]
    Negative { field: String },

    /// Invalid format (e.g., unknown VAT mode).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

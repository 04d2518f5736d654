//! # omniprice-core: Pricing Engine for OmniPrice
//!
//! This crate is the **heart** of OmniPrice. It turns a product cost and a
//! catalog of channel costs into a sale price per sales channel, as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        OmniPrice Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │                    omniprice CLI (apps/cli)                     │    │
//! │  │     calc ──► settings ──► channels ──► copy                     │    │
//! │  └─────────────────────────────┬───────────────────────────────────┘    │
//! │                                │ Snapshot (inputs + catalog)            │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐    │
//! │  │             ★ omniprice-core (THIS CRATE) ★                     │    │
//! │  │                                                                 │    │
//! │  │   ┌───────────┐  ┌─────────────┐  ┌───────────┐  ┌──────────┐   │    │
//! │  │   │   money   │  │amortization │  │  engine   │  │clipboard │   │    │
//! │  │   │  VAT, X9  │  │  returns    │  │  solver   │  │  texts   │   │    │
//! │  │   │  .99 round│  │  sentinel   │  │ breakdown │  │          │   │    │
//! │  │   └───────────┘  └─────────────┘  └───────────┘  └──────────┘   │    │
//! │  │   ┌───────────┐  ┌─────────────┐  ┌───────────┐                 │    │
//! │  │   │   types   │  │   catalog   │  │validation │                 │    │
//! │  │   └───────────┘  └─────────────┘  └───────────┘                 │    │
//! │  │                                                                 │    │
//! │  │   NO I/O • NO DATABASE • NO CLIPBOARD • PURE FUNCTIONS          │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐    │
//! │  │                omniprice-db (Snapshot Store)                    │    │
//! │  │              SQLite key/value snapshots, migrations             │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (CostSetting, CalculationInputs, ChannelResult)
//! - [`money`] - VAT normalization, retail rounding, amount formatting
//! - [`catalog`] - Default cost catalog and channel profiles
//! - [`amortization`] - Spreading return costs over kept sales
//! - [`engine`] - Per-channel price solver
//! - [`clipboard`] - Copy-to-text formats
//! - [`error`] - Domain error types
//! - [`validation`] - Input coercion and range checks
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same inputs, same results
//! 2. **No I/O**: the storage collaborator lives in omniprice-db
//! 3. **Channel-local failures**: one unreachable target never aborts the rest
//!
//! ## Example Usage
//!
//! ```rust
//! use omniprice_core::{compute, CalculationInputs, ChannelKey, SettingsCatalog};
//!
//! let catalog = SettingsCatalog::defaults();
//! let inputs = CalculationInputs::default();
//!
//! let results = compute(&inputs, &catalog, &ChannelKey::ALL);
//! assert_eq!(results.len(), 4);
//! assert!(results.iter().all(|r| r.error.is_none()));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod amortization;
pub mod catalog;
pub mod clipboard;
pub mod engine;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use omniprice_core::PricingEngine` instead of
// `use omniprice_core::engine::PricingEngine`

pub use amortization::UNRECOVERABLE_COST;
pub use catalog::{ChannelProfile, SettingsCatalog};
pub use engine::{compute, PricingEngine};
pub use error::{CoreError, CoreResult, PricingError, ValidationError};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// VAT rate assumed for a currency setting that does not state one.
///
/// ## Business Reason
/// 20% is the standard rate on shipping, packaging and service invoices.
pub const DEFAULT_VAT_RATE: f64 = 20.0;

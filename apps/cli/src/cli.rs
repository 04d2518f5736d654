//! # Command Line Definitions
//!
//! ```text
//! omniprice [--db PATH] <command>
//!
//!   calc      [--cost N] [--vat N] [--return-rate N] [--target N]
//!             [--basis margin|markup] [--overhead | --no-overhead]
//!             [--discount N] [--json]
//!   settings  list [--json] | set <key> <value> [--vat-mode M] [--vat-rate N] | reset
//!   channels  list | toggle <code>
//!   copy      [--channel CODE [--list]]
//!   config
//!   status
//! ```
//!
//! Numeric values are taken as text and coerced, so `12,5` reads as 12.5
//! and anything unparseable as 0.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use omniprice_core::{ProfitBasis, VatMode};

/// Multi-channel sale price calculator
#[derive(Debug, Parser)]
#[command(name = "omniprice")]
#[command(about = "Multi-channel sale price calculator")]
#[command(version)]
pub struct Cli {
    /// Path to the database file (overrides OMNIPRICE_DB_PATH)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Update the stored inputs and compute prices for the selected channels
    Calc(CalcArgs),

    /// Show or edit cost settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },

    /// Show or change the channel selection
    Channels {
        #[command(subcommand)]
        action: ChannelsAction,
    },

    /// Print price text for pasting into seller panels
    Copy {
        /// Single channel code (SITE, TY, HB, PAZARAMA); all selected when omitted
        #[arg(long)]
        channel: Option<String>,

        /// Print the list price instead of the sale price
        #[arg(long, requires = "channel")]
        list: bool,
    },

    /// Show effective configuration
    Config,

    /// Show database health and migration status
    Status,
}

/// Overrides for the calculation form. Omitted values keep their stored value.
#[derive(Debug, Clone, Default, Args)]
pub struct CalcArgs {
    /// Product cost, VAT excluded
    #[arg(long, allow_hyphen_values = true)]
    pub cost: Option<String>,

    /// Product VAT rate (%)
    #[arg(long, allow_hyphen_values = true)]
    pub vat: Option<String>,

    /// Expected return rate (%)
    #[arg(long, allow_hyphen_values = true)]
    pub return_rate: Option<String>,

    /// Target margin or markup (%)
    #[arg(long, allow_hyphen_values = true)]
    pub target: Option<String>,

    /// What the target is measured against
    #[arg(long)]
    pub basis: Option<ProfitBasis>,

    /// Include company overhead in the product cost
    #[arg(long, conflicts_with = "no_overhead")]
    pub overhead: bool,

    /// Exclude company overhead from the product cost
    #[arg(long)]
    pub no_overhead: bool,

    /// Discount shown against a list price (%)
    #[arg(long, allow_hyphen_values = true)]
    pub discount: Option<String>,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,
}

impl CalcArgs {
    /// The overhead switch, if either flag was given.
    pub fn overhead(&self) -> Option<bool> {
        match (self.overhead, self.no_overhead) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum SettingsAction {
    /// List all cost settings
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Change one setting
    Set {
        /// Setting key (e.g. tyCommission, box)
        key: String,

        /// New value
        #[arg(allow_hyphen_values = true)]
        value: String,

        /// VAT mode of a currency setting (inclusive / exclusive)
        #[arg(long)]
        vat_mode: Option<VatMode>,

        /// VAT rate of a currency setting (%)
        #[arg(long, allow_hyphen_values = true)]
        vat_rate: Option<String>,
    },

    /// Restore the built-in catalog
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum ChannelsAction {
    /// List channels and whether they are selected
    List,

    /// Select or deselect a channel
    Toggle {
        /// Channel code or name
        code: String,
    },
}

//! # Calculation Commands
//!
//! Updates the stored form inputs and computes prices for the selected
//! channels.
//!
//! ## Calculation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  omniprice calc --cost 250 --target 25                                  │
//! │                    │                                                    │
//! │                    ▼                                                    │
//! │  ┌────────────────────────────────────────────────────────────────┐     │
//! │  │  1. Stored inputs + overrides (text coerced, "12,5" → 12.5)    │     │
//! │  │  2. Sanitize non-finite numbers, validate ranges               │     │
//! │  │  3. Persist inputs when they changed                           │     │
//! │  │  4. compute(inputs, settings, selected channels)               │     │
//! │  └────────────────────────────────────────────────────────────────┘     │
//! │                    │                                                    │
//! │                    ▼                                                    │
//! │  One result per selected channel, in SITE, TY, HB, PAZARAMA order       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::{debug, info};

use omniprice_core::validation::{coerce_number, sanitize_inputs, validate_inputs};
use omniprice_core::{compute, CalculationInputs, ChannelKey, ChannelResult};
use omniprice_db::SnapshotKind;

use crate::cli::CalcArgs;
use crate::error::ApiError;
use crate::state::{DbState, WorkspaceState};

/// Inputs used and the per-channel results.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResponse {
    pub inputs: CalculationInputs,
    pub selected_channels: Vec<ChannelKey>,
    pub results: Vec<ChannelResult>,
}

/// Applies command line overrides on top of the stored inputs.
pub fn apply_overrides(inputs: CalculationInputs, args: &CalcArgs) -> CalculationInputs {
    let number = |text: &Option<String>, current: f64| text.as_deref().map_or(current, coerce_number);

    CalculationInputs {
        product_cost_ex_vat: number(&args.cost, inputs.product_cost_ex_vat),
        product_vat_rate: number(&args.vat, inputs.product_vat_rate),
        return_rate: number(&args.return_rate, inputs.return_rate),
        target_profit_rate: number(&args.target, inputs.target_profit_rate),
        profit_basis: args.basis.unwrap_or(inputs.profit_basis),
        include_overhead: args.overhead().unwrap_or(inputs.include_overhead),
        discount_rate: number(&args.discount, inputs.discount_rate),
    }
}

/// Updates the inputs and computes the selected channels.
///
/// ## Errors
/// - `VALIDATION_ERROR` for negative values or rates above 100 where a
///   ceiling applies; nothing is stored in that case
///
/// A channel whose price cannot be solved is not an error here; its
/// result carries the message instead.
pub async fn calculate(
    db: &DbState,
    workspace: &WorkspaceState,
    args: &CalcArgs,
) -> Result<CalculationResponse, ApiError> {
    debug!(?args, "calc command");

    let current = workspace.with_workspace(|ws| ws.inputs);
    let inputs = sanitize_inputs(apply_overrides(current, args));
    validate_inputs(&inputs)?;

    if inputs != current {
        db.inner()
            .snapshots()
            .save(SnapshotKind::Inputs, &inputs)
            .await?;
        workspace.with_workspace_mut(|ws| ws.inputs = inputs);
        info!("Calculation inputs updated");
    }

    Ok(current_results(workspace))
}

/// Computes the selected channels from the workspace as it is.
pub fn current_results(workspace: &WorkspaceState) -> CalculationResponse {
    let selected = workspace.selected_channels();
    let (inputs, results) = workspace.with_workspace(|ws| {
        (ws.inputs, compute(&ws.inputs, &ws.settings, &selected))
    });

    CalculationResponse {
        inputs,
        selected_channels: selected,
        results,
    }
}

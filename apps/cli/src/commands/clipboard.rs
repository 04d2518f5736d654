//! # Copy Commands
//!
//! Produces the price text a seller pastes into a marketplace panel.
//!
//! ```text
//! omniprice copy                       → SITE: 519,99 | TY: 589,99 | ...
//! omniprice copy --channel TY          → 589,99
//! omniprice copy --channel TY --list   → 739,99   (needs a discount)
//! ```
//!
//! The text goes to stdout; piping it into the system clipboard is left
//! to the shell.

use tracing::debug;

use omniprice_core::clipboard::{bulk_copy_text, list_price_text, sale_price_text};
use omniprice_core::ChannelKey;

use crate::commands::calc::current_results;
use crate::error::{ApiError, ErrorCode};
use crate::state::WorkspaceState;

/// Builds copy text for one channel or for every selected channel.
///
/// ## Errors
/// - `NOTHING_TO_COPY` when no selected channel has a price, or a list
///   price is requested without a discount
/// - `PRICING_ERROR` when the requested channel's price could not be solved
/// - `VALIDATION_ERROR` when the requested channel is not selected
pub fn copy_text(
    workspace: &WorkspaceState,
    channel: Option<&str>,
    list: bool,
) -> Result<String, ApiError> {
    debug!(?channel, list, "copy_text command");

    let response = current_results(workspace);

    let Some(code) = channel else {
        return bulk_copy_text(&response.results, &response.selected_channels)
            .ok_or_else(|| ApiError::nothing_to_copy("no calculated prices to copy"));
    };

    let key: ChannelKey = code.parse()?;
    let result = response
        .results
        .iter()
        .find(|r| r.channel_key == key)
        .ok_or_else(|| ApiError::validation(format!("channel {} is not selected", key.code())))?;

    if let Some(message) = &result.error {
        return Err(ApiError::new(ErrorCode::PricingError, message.clone()));
    }

    if list {
        list_price_text(result).ok_or_else(|| {
            ApiError::nothing_to_copy(format!("no list price for {}; set a discount first", key.code()))
        })
    } else {
        Ok(sale_price_text(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use omniprice_core::catalog::keys;

    #[test]
    fn test_bulk_copy_all_channels() {
        let workspace = WorkspaceState::default();
        let text = copy_text(&workspace, None, false).unwrap();
        assert_eq!(
            text,
            "SITE: 519,99 | TY: 589,99 | HB: 539,99 | PAZARAMA: 569,99"
        );
    }

    #[test]
    fn test_bulk_copy_skips_failed_channels() {
        let workspace = WorkspaceState::default();
        workspace.with_workspace_mut(|ws| ws.inputs.target_profit_rate = 90.0);

        let text = copy_text(&workspace, None, false).unwrap();
        assert!(text.starts_with("SITE: "));
        assert!(!text.contains(" | "));
    }

    #[test]
    fn test_bulk_copy_nothing_selected() {
        let workspace = WorkspaceState::default();
        workspace.with_workspace_mut(|ws| ws.selected_channels.clear());

        let err = copy_text(&workspace, None, false).unwrap_err();
        assert_eq!(err.code, ErrorCode::NothingToCopy);
        assert_eq!(err.message, "no calculated prices to copy");
    }

    #[test]
    fn test_single_channel_sale_and_list_price() {
        let workspace = WorkspaceState::default();
        assert_eq!(copy_text(&workspace, Some("hb"), false).unwrap(), "539,99");

        let err = copy_text(&workspace, Some("HB"), true).unwrap_err();
        assert_eq!(err.code, ErrorCode::NothingToCopy);

        workspace.with_workspace_mut(|ws| ws.inputs.discount_rate = 20.0);
        assert_eq!(copy_text(&workspace, Some("SITE"), true).unwrap(), "649,99");
    }

    #[test]
    fn test_single_channel_errors() {
        let workspace = WorkspaceState::default();
        workspace.with_workspace_mut(|ws| {
            ws.selected_channels = vec![ChannelKey::MarketplaceB];
            ws.settings.update_value(keys::HB_COMMISSION, 100.0).unwrap();
        });

        let err = copy_text(&workspace, Some("HB"), false).unwrap_err();
        assert_eq!(err.code, ErrorCode::PricingError);

        let err = copy_text(&workspace, Some("SITE"), false).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }
}

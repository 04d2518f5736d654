//! # Channel Commands
//!
//! Which sales channels take part in calculations. The selection is kept
//! in canonical order (SITE, TY, HB, PAZARAMA) whatever order it was
//! toggled in.

use serde::Serialize;
use tracing::{debug, info};

use omniprice_core::ChannelKey;
use omniprice_db::SnapshotKind;

use crate::error::ApiError;
use crate::state::{DbState, WorkspaceState};

/// One channel and whether it is selected.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelStatus {
    pub key: ChannelKey,
    pub code: String,
    pub name: String,
    pub selected: bool,
}

impl ChannelStatus {
    fn new(key: ChannelKey, selected: bool) -> Self {
        ChannelStatus {
            key,
            code: key.code().to_string(),
            name: key.default_name().to_string(),
            selected,
        }
    }
}

/// Lists all channels with their selection flag.
pub fn list_channels(workspace: &WorkspaceState) -> Vec<ChannelStatus> {
    debug!("list_channels command");
    let selected = workspace.selected_channels();
    ChannelKey::ALL
        .into_iter()
        .map(|key| ChannelStatus::new(key, selected.contains(&key)))
        .collect()
}

/// Flips one channel in or out of the selection.
///
/// ## Arguments
/// * `code` - Channel code or name, case-insensitive (`ty`, `Trendyol`)
///
/// ## Returns
/// The channel's new status
pub async fn toggle_channel(
    db: &DbState,
    workspace: &WorkspaceState,
    code: &str,
) -> Result<ChannelStatus, ApiError> {
    debug!(code = %code, "toggle_channel command");

    let key: ChannelKey = code.parse()?;
    let mut selected = workspace.selected_channels();
    let now_selected = match selected.iter().position(|k| *k == key) {
        Some(index) => {
            selected.remove(index);
            false
        }
        None => {
            selected.push(key);
            selected.sort();
            true
        }
    };

    db.inner()
        .snapshots()
        .save(SnapshotKind::Channels, &selected)
        .await?;
    workspace.with_workspace_mut(|ws| ws.selected_channels = selected);

    info!(channel = %key, selected = now_selected, "Channel selection changed");
    Ok(ChannelStatus::new(key, now_selected))
}

//! # Workspace State
//!
//! The calculator's working state: cost settings, form inputs and the
//! channel selection, loaded from the snapshot store at startup.
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Command                 Workspace Change              Persisted As     │
//! │  ───────                 ────────────────              ────────────     │
//! │                                                                         │
//! │  calc --cost 250 ──────► inputs.product_cost = 250 ──► Inputs           │
//! │  settings set box 13 ──► settings["box"] = 13 ───────► Settings         │
//! │  settings reset ───────► settings = defaults ────────► Settings         │
//! │  channels toggle TY ───► selected_channels ± TY ─────► Channels         │
//! │  copy ─────────────────► (read only)                                    │
//! │                                                                         │
//! │  NOTE: Commands persist first, then update the workspace, so a failed   │
//! │        write leaves the in-memory state as it was on disk.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use omniprice_core::{ChannelKey, Snapshot};

/// Thread-safe wrapper around the current [`Snapshot`].
#[derive(Debug, Clone)]
pub struct WorkspaceState {
    snapshot: Arc<Mutex<Snapshot>>,
}

impl WorkspaceState {
    /// Wraps a loaded snapshot.
    pub fn new(snapshot: Snapshot) -> Self {
        WorkspaceState {
            snapshot: Arc::new(Mutex::new(snapshot)),
        }
    }

    /// Executes a function with read access to the workspace.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let inputs = workspace.with_workspace(|ws| ws.inputs);
    /// ```
    pub fn with_workspace<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Snapshot) -> R,
    {
        let snapshot = self.snapshot.lock().unwrap_or_else(PoisonError::into_inner);
        f(&snapshot)
    }

    /// Executes a function with write access to the workspace.
    pub fn with_workspace_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Snapshot) -> R,
    {
        let mut snapshot = self.snapshot.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut snapshot)
    }

    /// Selected channels in canonical order.
    pub fn selected_channels(&self) -> Vec<ChannelKey> {
        self.with_workspace(|ws| {
            ChannelKey::ALL
                .into_iter()
                .filter(|key| ws.selected_channels.contains(key))
                .collect()
        })
    }
}

impl Default for WorkspaceState {
    fn default() -> Self {
        Self::new(Snapshot::defaults())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_selects_every_channel() {
        let workspace = WorkspaceState::default();
        assert_eq!(workspace.selected_channels(), ChannelKey::ALL.to_vec());
    }

    #[test]
    fn test_selected_channels_are_ordered() {
        let mut snapshot = Snapshot::defaults();
        snapshot.selected_channels = vec![ChannelKey::MarketplaceC, ChannelKey::Web];
        let workspace = WorkspaceState::new(snapshot);

        assert_eq!(
            workspace.selected_channels(),
            vec![ChannelKey::Web, ChannelKey::MarketplaceC]
        );
    }

    #[test]
    fn test_mutation_is_shared_between_clones() {
        let workspace = WorkspaceState::default();
        let other = workspace.clone();

        workspace.with_workspace_mut(|ws| ws.inputs.discount_rate = 15.0);
        assert_eq!(other.with_workspace(|ws| ws.inputs.discount_rate), 15.0);
    }
}

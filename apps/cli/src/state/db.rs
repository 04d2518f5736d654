//! # Database State
//!
//! Wraps the `Database` connection for use in commands.
//!
//! ## Usage in Commands
//! ```rust,ignore
//! async fn reset_settings(db: &DbState, workspace: &WorkspaceState) -> Result<SettingsCatalog, ApiError> {
//!     let catalog = SettingsCatalog::defaults();
//!     db.inner().snapshots().save(SnapshotKind::Settings, &catalog).await?;
//!     workspace.with_workspace_mut(|ws| ws.settings = catalog.clone());
//!     Ok(catalog)
//! }
//! ```

use omniprice_db::Database;

/// Wrapper around `Database` handed to commands.
#[derive(Debug, Clone)]
pub struct DbState {
    db: Database,
}

impl DbState {
    /// Creates a new DbState wrapping the database connection.
    pub fn new(db: Database) -> Self {
        DbState { db }
    }

    /// Returns a reference to the inner Database.
    pub fn inner(&self) -> &Database {
        &self.db
    }
}

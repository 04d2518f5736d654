//! # Status Commands
//!
//! Database health and what is stored.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use omniprice_db::SnapshotKind;

use crate::error::ApiError;
use crate::state::{ConfigState, DbState};

/// Last write of one stored snapshot part.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredPart {
    /// `settings`, `inputs` or `channels`.
    pub part: String,
    /// `None` when the part was never saved and defaults apply.
    pub updated_at: Option<DateTime<Utc>>,
}

/// Database health report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub database_path: Option<String>,
    pub healthy: bool,
    pub migrations_total: usize,
    pub migrations_applied: usize,
    pub stored: Vec<StoredPart>,
}

/// Gets database health, migration counts and snapshot timestamps.
pub async fn get_status(db: &DbState, config: &ConfigState) -> Result<StatusResponse, ApiError> {
    debug!("get_status command");

    let database = db.inner();
    let healthy = database.health_check().await;
    let (migrations_total, migrations_applied) = database.migration_status().await?;

    let repo = database.snapshots();
    let mut stored = Vec::with_capacity(SnapshotKind::ALL.len());
    for kind in SnapshotKind::ALL {
        let record = repo.record(kind).await?;
        stored.push(StoredPart {
            part: kind.to_string(),
            updated_at: record.map(|r| r.updated_at),
        });
    }

    Ok(StatusResponse {
        database_path: config
            .database_path
            .as_ref()
            .map(|p| p.display().to_string()),
        healthy,
        migrations_total,
        migrations_applied,
        stored,
    })
}

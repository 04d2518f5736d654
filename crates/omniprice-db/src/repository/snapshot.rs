//! # Snapshot Repository
//!
//! Load and save the calculator's state between sessions.
//!
//! ## Storage Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  snapshots                                                              │
//! │  ┌──────────────────────────────┬──────────────────────┬─────────────┐  │
//! │  │ key                          │ payload (JSON)       │ updated_at  │  │
//! │  ├──────────────────────────────┼──────────────────────┼─────────────┤  │
//! │  │ sales_price_calc_settings_v1 │ [ {key, label, ...} ]│ 2026-...    │  │
//! │  │ sales_price_calc_inputs_v1   │ { productCostExVat } │ 2026-...    │  │
//! │  │ sales_price_calc_channels_v1 │ ["SITE", "TY"]       │ 2026-...    │  │
//! │  └──────────────────────────────┴──────────────────────┴─────────────┘  │
//! │                                                                         │
//! │  load_or_default():                                                     │
//! │  ├── nothing stored          ──► Snapshot::defaults()                   │
//! │  ├── part missing / corrupt  ──► that part from defaults                │
//! │  ├── catalog lacks new keys  ──► filled from defaults                   │
//! │  └── key holds wrong unit    ──► reset to its default                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::SqlitePool;
use std::fmt;
use tracing::{debug, info, warn};

use crate::error::{DbError, DbResult};
use omniprice_core::{CalculationInputs, ChannelKey, SettingsCatalog, Snapshot};

const UPSERT_SQL: &str = r#"
    INSERT INTO snapshots (key, payload, updated_at)
    VALUES (?1, ?2, ?3)
    ON CONFLICT(key) DO UPDATE SET
        payload = excluded.payload,
        updated_at = excluded.updated_at
"#;

// =============================================================================
// Snapshot Kind
// =============================================================================

/// The independently stored parts of a [`Snapshot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnapshotKind {
    /// Cost settings catalog.
    Settings,
    /// Calculation form values.
    Inputs,
    /// Selected channels.
    Channels,
}

impl SnapshotKind {
    pub const ALL: [SnapshotKind; 3] = [
        SnapshotKind::Settings,
        SnapshotKind::Inputs,
        SnapshotKind::Channels,
    ];

    /// Row key in the `snapshots` table.
    pub const fn storage_key(&self) -> &'static str {
        match self {
            SnapshotKind::Settings => "sales_price_calc_settings_v1",
            SnapshotKind::Inputs => "sales_price_calc_inputs_v1",
            SnapshotKind::Channels => "sales_price_calc_channels_v1",
        }
    }
}

impl fmt::Display for SnapshotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotKind::Settings => f.write_str("settings"),
            SnapshotKind::Inputs => f.write_str("inputs"),
            SnapshotKind::Channels => f.write_str("channels"),
        }
    }
}

/// One stored row.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SnapshotRecord {
    pub key: String,
    pub payload: String,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for snapshot persistence.
#[derive(Debug, Clone)]
pub struct SnapshotRepository {
    pool: SqlitePool,
}

impl SnapshotRepository {
    /// Creates a new SnapshotRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SnapshotRepository { pool }
    }

    /// Fetches the raw row of one part.
    pub async fn record(&self, kind: SnapshotKind) -> DbResult<Option<SnapshotRecord>> {
        let record = sqlx::query_as::<_, SnapshotRecord>(
            r#"
            SELECT key, payload, updated_at
            FROM snapshots
            WHERE key = ?1
            "#,
        )
        .bind(kind.storage_key())
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Loads and decodes one part.
    ///
    /// A payload that no longer decodes is logged and reported as absent.
    pub async fn load<T: DeserializeOwned>(&self, kind: SnapshotKind) -> DbResult<Option<T>> {
        let Some(record) = self.record(kind).await? else {
            debug!(%kind, "No stored snapshot");
            return Ok(None);
        };

        match serde_json::from_str(&record.payload) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!(%kind, error = %e, "Stored snapshot is corrupt, ignoring it");
                Ok(None)
            }
        }
    }

    /// Encodes and stores one part, replacing any previous value.
    pub async fn save<T: Serialize + ?Sized>(&self, kind: SnapshotKind, value: &T) -> DbResult<()> {
        let payload = serde_json::to_string(value)?;

        sqlx::query(UPSERT_SQL)
            .bind(kind.storage_key())
            .bind(&payload)
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;

        debug!(%kind, bytes = payload.len(), "Snapshot saved");
        Ok(())
    }

    /// Removes one part. Returns whether anything was stored.
    pub async fn delete(&self, kind: SnapshotKind) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM snapshots WHERE key = ?1")
            .bind(kind.storage_key())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Number of stored parts.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM snapshots")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    // =========================================================================
    // Whole Snapshot
    // =========================================================================

    /// Loads the full snapshot.
    ///
    /// ## Returns
    /// - `None` when no part is stored (or none decodes)
    /// - Otherwise the stored parts, with absent ones taken from defaults,
    ///   the catalog topped up with any settings it lacks and mistyped
    ///   settings reset
    pub async fn load_snapshot(&self) -> DbResult<Option<Snapshot>> {
        let settings: Option<SettingsCatalog> = self.load(SnapshotKind::Settings).await?;
        let inputs: Option<CalculationInputs> = self.load(SnapshotKind::Inputs).await?;
        let channels: Option<Vec<ChannelKey>> = self.load(SnapshotKind::Channels).await?;

        if settings.is_none() && inputs.is_none() && channels.is_none() {
            return Ok(None);
        }

        let defaults = Snapshot::defaults();
        let mut settings = settings.unwrap_or(defaults.settings);
        let added = settings.fill_missing_defaults();
        if added > 0 {
            info!(added, "Filled missing cost settings from defaults");
        }
        let repaired = settings.repair_units();
        if repaired > 0 {
            warn!(repaired, "Reset cost settings stored with the wrong unit");
        }

        Ok(Some(Snapshot {
            settings,
            inputs: inputs.unwrap_or(defaults.inputs),
            selected_channels: channels.unwrap_or(defaults.selected_channels),
        }))
    }

    /// Loads the full snapshot, or the built-in defaults when none is stored.
    pub async fn load_or_default(&self) -> DbResult<Snapshot> {
        match self.load_snapshot().await? {
            Some(snapshot) => Ok(snapshot),
            None => {
                info!("No stored state, using defaults");
                Ok(Snapshot::defaults())
            }
        }
    }

    /// Stores all three parts in one transaction.
    pub async fn save_snapshot(&self, snapshot: &Snapshot) -> DbResult<()> {
        let parts = [
            (SnapshotKind::Settings, serde_json::to_string(&snapshot.settings)?),
            (SnapshotKind::Inputs, serde_json::to_string(&snapshot.inputs)?),
            (
                SnapshotKind::Channels,
                serde_json::to_string(&snapshot.selected_channels)?,
            ),
        ];
        let now = Utc::now();

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        for (kind, payload) in &parts {
            sqlx::query(UPSERT_SQL)
                .bind(kind.storage_key())
                .bind(payload)
                .bind(now)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        info!("Snapshot saved");
        Ok(())
    }

    /// Removes every stored part.
    pub async fn clear(&self) -> DbResult<u64> {
        let result = sqlx::query("DELETE FROM snapshots")
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

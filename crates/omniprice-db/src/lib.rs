//! # omniprice-db: Snapshot Store for OmniPrice
//!
//! This crate persists the calculator's state (cost catalog, form inputs,
//! channel selection) in SQLite with sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        OmniPrice Data Flow                              │
//! │                                                                         │
//! │  CLI command (calc, settings set, channels toggle)                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │                  omniprice-db (THIS CRATE)                      │    │
//! │  │                                                                 │    │
//! │  │   ┌───────────────┐    ┌────────────────┐    ┌──────────────┐   │    │
//! │  │   │   Database    │    │  Repositories  │    │  Migrations  │   │    │
//! │  │   │   (pool.rs)   │◄───│ (snapshot.rs)  │    │  (embedded)  │   │    │
//! │  │   └───────────────┘    └────────────────┘    └──────────────┘   │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │                     SQLite Database                             │    │
//! │  │   ~/.local/share/calc/omniprice.db (platform data dir)          │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use omniprice_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("omniprice.db")).await?;
//! let mut snapshot = db.snapshots().load_or_default().await?;
//! snapshot.inputs.discount_rate = 10.0;
//! db.snapshots().save_snapshot(&snapshot).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::snapshot::{SnapshotKind, SnapshotRecord, SnapshotRepository};

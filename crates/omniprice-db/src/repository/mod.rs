//! # Repository Module
//!
//! Database repository implementations for OmniPrice.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CLI command                                                            │
//! │       │                                                                 │
//! │       │  db.snapshots().load_or_default()                               │
//! │       ▼                                                                 │
//! │  SnapshotRepository                                                     │
//! │  ├── load(&self, kind) / save(&self, kind, value)                       │
//! │  ├── load_snapshot(&self) / save_snapshot(&self, snapshot)              │
//! │  └── delete(&self, kind)                                                │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`SnapshotRepository`](snapshot::SnapshotRepository) - Calculator state

pub mod snapshot;

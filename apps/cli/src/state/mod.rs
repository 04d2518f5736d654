//! # State Module
//!
//! Manages application state for one CLI invocation.
//!
//! ## Multiple State Types
//! Commands declare exactly which state they need instead of receiving a
//! single `AppState`.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │                      run(cli)                                   │    │
//! │  │  let db = DbState::new(database);                               │    │
//! │  │  let workspace = WorkspaceState::new(snapshot);                 │    │
//! │  │  let config = ConfigState::from_env();                          │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! │                              │                                          │
//! │          ┌───────────────────┼──────────────────┐                       │
//! │          ▼                   ▼                  ▼                       │
//! │  ┌──────────────┐  ┌──────────────────┐  ┌──────────────────┐           │
//! │  │   DbState    │  │  WorkspaceState  │  │   ConfigState    │           │
//! │  │              │  │                  │  │                  │           │
//! │  │  Database    │  │  Arc<Mutex<      │  │  currency        │           │
//! │  │  (SQLite     │  │    Snapshot      │  │  separators      │           │
//! │  │   pool)      │  │  >>              │  │  database path   │           │
//! │  └──────────────┘  └──────────────────┘  └──────────────────┘           │
//! │                                                                         │
//! │  THREAD SAFETY:                                                         │
//! │  • DbState: Database has internal connection pool (thread-safe)         │
//! │  • WorkspaceState: Protected by Arc<Mutex<T>> for exclusive access      │
//! │  • ConfigState: Read-only after initialization                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod db;
mod workspace;

pub use config::ConfigState;
pub use db::DbState;
pub use workspace::WorkspaceState;

//! # Commands Module
//!
//! One module per subcommand. Commands return data; `render` turns it
//! into text and `run` prints it.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs        ◄─── You are here (exports)
//! ├── calc.rs       ◄─── Form inputs and price calculation
//! ├── settings.rs   ◄─── Cost catalog editing
//! ├── channels.rs   ◄─── Channel selection
//! ├── clipboard.rs  ◄─── Price text for pasting
//! ├── config.rs     ◄─── Configuration retrieval
//! └── status.rs     ◄─── Database health
//! ```
//!
//! ## State Injection
//! Each command declares only the state it needs:
//! ```rust,ignore
//! // Only needs the workspace
//! fn list_channels(workspace: &WorkspaceState)
//!
//! // Persists, so needs both
//! async fn toggle_channel(db: &DbState, workspace: &WorkspaceState, code: &str)
//!
//! // Only needs database
//! async fn get_status(db: &DbState, config: &ConfigState)
//! ```

pub mod calc;
pub mod channels;
pub mod clipboard;
pub mod config;
pub mod settings;
pub mod status;

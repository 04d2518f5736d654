//! # OmniPrice CLI Library
//!
//! Everything behind the `omniprice` binary: argument definitions,
//! state, commands and text rendering.
//!
//! ## Module Organization
//! ```text
//! omniprice_cli_lib/
//! ├── lib.rs          ◄─── You are here (startup & dispatch)
//! ├── cli.rs          ◄─── clap argument definitions
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── db.rs       ◄─── Database state wrapper
//! │   ├── workspace.rs◄─── Settings, inputs, channel selection
//! │   └── config.rs   ◄─── Configuration state
//! ├── commands/
//! │   ├── calc.rs     ◄─── Inputs and calculation
//! │   ├── settings.rs ◄─── Cost catalog editing
//! │   ├── channels.rs ◄─── Channel selection
//! │   ├── clipboard.rs◄─── Copy text
//! │   ├── config.rs   ◄─── Configuration retrieval
//! │   └── status.rs   ◄─── Database health
//! ├── render.rs       ◄─── Terminal text
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## One Invocation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  run(cli)                                                               │
//! │    ├── init_tracing()                  stderr, RUST_LOG aware           │
//! │    ├── ConfigState::from_env()                                          │
//! │    ├── get_database_path()             --db > env > data directory      │
//! │    ├── Database::new() + migrations                                     │
//! │    ├── snapshots().load_or_default()   → WorkspaceState                 │
//! │    ├── dispatch(command)               → String                         │
//! │    ├── db.close()                                                       │
//! │    └── println!(output)                stdout                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod render;
pub mod state;

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::info;
use tracing_subscriber::EnvFilter;

use omniprice_db::{Database, DbConfig};

use cli::{ChannelsAction, Cli, Command, SettingsAction};
use commands::{calc, channels, clipboard, settings, status};
use error::ApiError;
use state::{ConfigState, DbState, WorkspaceState};

/// Runs one command end to end and prints its output.
pub async fn run(cli: Cli) -> Result<(), ApiError> {
    init_tracing();

    let mut config = ConfigState::from_env();
    let db_path = get_database_path(cli.db.as_deref(), &config)?;
    info!(path = %db_path.display(), "Database path");
    config.database_path = Some(db_path.clone());

    let db = DbState::new(Database::new(DbConfig::new(&db_path)).await?);
    let snapshot = db.inner().snapshots().load_or_default().await?;
    let workspace = WorkspaceState::new(snapshot);

    let output = dispatch(cli.command, &db, &workspace, &config).await;
    db.inner().close().await;

    println!("{}", output?);
    Ok(())
}

/// Executes a command against loaded state and returns the text to print.
pub async fn dispatch(
    command: Command,
    db: &DbState,
    workspace: &WorkspaceState,
    config: &ConfigState,
) -> Result<String, ApiError> {
    match command {
        Command::Calc(args) => {
            let response = calc::calculate(db, workspace, &args).await?;
            if args.json {
                Ok(serde_json::to_string_pretty(&response)?)
            } else {
                Ok(render::results(&response, config))
            }
        }
        Command::Settings { action } => match action {
            SettingsAction::List { json } => {
                let catalog = settings::list_settings(workspace);
                if json {
                    Ok(serde_json::to_string_pretty(&catalog)?)
                } else {
                    Ok(render::settings(&catalog, config))
                }
            }
            SettingsAction::Set {
                key,
                value,
                vat_mode,
                vat_rate,
            } => {
                let setting = settings::set_setting(
                    db,
                    workspace,
                    &key,
                    &value,
                    vat_mode,
                    vat_rate.as_deref(),
                )
                .await?;
                Ok(render::setting_line(&setting, config))
            }
            SettingsAction::Reset => {
                let catalog = settings::reset_settings(db, workspace).await?;
                Ok(render::settings(&catalog, config))
            }
        },
        Command::Channels { action } => match action {
            ChannelsAction::List => Ok(render::channels(&channels::list_channels(workspace))),
            ChannelsAction::Toggle { code } => {
                channels::toggle_channel(db, workspace, &code).await?;
                Ok(render::channels(&channels::list_channels(workspace)))
            }
        },
        Command::Copy { channel, list } => clipboard::copy_text(workspace, channel.as_deref(), list),
        Command::Config => Ok(render::config(&commands::config::get_config(config))),
        Command::Status => {
            let report = status::get_status(db, config).await?;
            Ok(render::status(&report))
        }
    }
}

/// Initializes the tracing subscriber for logging.
///
/// ## Log Levels
/// - `RUST_LOG` overrides the default filter
/// - Default: `info,omniprice=debug,sqlx=warn`
///
/// Logs go to stderr; stdout carries command output only.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,omniprice=debug,sqlx=warn"));

    // Already installed when embedded in another process
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Determines the database file path.
///
/// ## Priority
/// 1. `--db`
/// 2. `OMNIPRICE_DB_PATH` (already read into `config`)
/// 3. Platform data directory:
///    - **macOS**: `~/Library/Application Support/com.omniprice.calc/omniprice.db`
///    - **Windows**: `%APPDATA%\omniprice\calc\data\omniprice.db`
///    - **Linux**: `~/.local/share/calc/omniprice.db`
///
/// The parent directory is created when missing.
pub fn get_database_path(cli_path: Option<&Path>, config: &ConfigState) -> Result<PathBuf, ApiError> {
    let path = match cli_path.or(config.database_path.as_deref()) {
        Some(path) => path.to_path_buf(),
        None => {
            let proj_dirs = ProjectDirs::from("com", "omniprice", "calc")
                .ok_or_else(|| ApiError::internal("Could not determine app data directory"))?;
            proj_dirs.data_dir().join("omniprice.db")
        }
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            ApiError::internal(format!("Could not create {}: {}", parent.display(), e))
        })?;
    }

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_path_priority() {
        let dir = std::env::temp_dir().join(format!("omniprice-path-{}", std::process::id()));
        let from_cli = dir.join("cli.db");
        let from_env = dir.join("env.db");
        let config = ConfigState {
            database_path: Some(from_env.clone()),
            ..ConfigState::default()
        };

        assert_eq!(get_database_path(Some(&from_cli), &config).unwrap(), from_cli);
        assert_eq!(get_database_path(None, &config).unwrap(), from_env);
        assert!(dir.is_dir());

        let _ = std::fs::remove_dir_all(dir);
    }
}

//! # roomctl
//!
//! Command-line front end for a persisted room layout.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       roomctl Startup                                   │
//! │                                                                         │
//! │  1. Initialize Logging ───────────────────────────────────────────────► │
//! │     • tracing-subscriber with env filter, written to stderr             │
//! │     • Default: info,roomplan=debug,sqlx=warn (override with RUST_LOG)   │
//! │                                                                         │
//! │  2. Resolve Configuration ────────────────────────────────────────────► │
//! │     • --db / ROOMPLAN_DB_PATH / platform data directory                 │
//! │     • --key / ROOMPLAN_STORAGE_KEY / "room"                             │
//! │                                                                         │
//! │  3. Connect to Database ──────────────────────────────────────────────► │
//! │     • SQLite with WAL mode                                              │
//! │     • Run pending migrations                                            │
//! │                                                                         │
//! │  4. Open the Store ───────────────────────────────────────────────────► │
//! │     • Stored room, or defaults when the record is unreadable            │
//! │                                                                         │
//! │  5. Execute the Command ──────────────────────────────────────────────► │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod commands;
mod config;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use roomplan_db::{Database, DbConfig};
use roomplan_store::RoomStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

use commands::Command;
use config::AppConfig;

#[derive(Debug, Parser)]
#[command(name = "roomctl", version, about = "Edit a persisted room layout")]
struct Cli {
    /// SQLite database file
    #[arg(long, short = 'd', global = true)]
    db: Option<PathBuf>,

    /// Key the room record is stored under
    #[arg(long, short = 'k', global = true)]
    key: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let mut config = AppConfig::from_env();
    if let Some(db_path) = cli.db {
        config.db_path = Some(db_path);
    }
    if let Some(key) = cli.key {
        config.storage_key = key;
    }
    let db_path = config.database_path()?;
    info!(db_path = ?db_path, key = %config.storage_key, "Configuration resolved");

    let db = Database::new(DbConfig::new(&db_path))
        .await
        .with_context(|| format!("could not open {}", db_path.display()))?;

    let mut store = match RoomStore::open(db.room_with_key(config.storage_key.as_str())).await {
        Ok(store) => store,
        Err(e) => {
            db.close().await;
            return Err(e).context("could not load the stored room");
        }
    };

    let mut stdout = std::io::stdout().lock();
    let result = commands::execute(cli.command, &mut store, &mut stdout).await;

    db.close().await;
    result
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so `show` output stays pipeable.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=roomplan=trace` - Show trace for roomplan crates only
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,roomplan=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

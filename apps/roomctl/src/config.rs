//! # Configuration
//!
//! Where the room lives, resolved once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command-line flags (`--db`, `--key`)
//! 2. Environment variables (`ROOMPLAN_*`)
//! 3. Defaults (this file)

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use roomplan_core::ROOM_STORAGE_KEY;

/// Overrides the database file.
pub const DB_PATH_VAR: &str = "ROOMPLAN_DB_PATH";

/// Overrides the key the room is stored under.
pub const STORAGE_KEY_VAR: &str = "ROOMPLAN_STORAGE_KEY";

/// Runtime configuration for one invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// SQLite database file. `None` means the platform default.
    pub db_path: Option<PathBuf>,

    /// Key of the room record in `kv_store`.
    /// Default: "room"
    pub storage_key: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            db_path: None,
            storage_key: ROOM_STORAGE_KEY.to_string(),
        }
    }
}

impl AppConfig {
    /// Reads the configuration from the process environment.
    ///
    /// ## Environment Variables
    /// - `ROOMPLAN_DB_PATH`: database file
    /// - `ROOMPLAN_STORAGE_KEY`: record key
    pub fn from_env() -> Self {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from any variable source.
    ///
    /// Blank values count as unset.
    pub fn from_vars<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |name: &str| var(name).filter(|value| !value.trim().is_empty());
        let mut config = AppConfig::default();

        if let Some(path) = lookup(DB_PATH_VAR) {
            config.db_path = Some(PathBuf::from(path));
        }

        if let Some(key) = lookup(STORAGE_KEY_VAR) {
            config.storage_key = key;
        }

        config
    }

    /// The database file to open, falling back to the platform default.
    pub fn database_path(&self) -> Result<PathBuf> {
        match &self.db_path {
            Some(path) => Ok(path.clone()),
            None => default_database_path(),
        }
    }
}

/// Determines the database file path based on the platform.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/com.roomplan.roomplan/roomplan.db`
/// - **Windows**: `%APPDATA%\roomplan\roomplan\data\roomplan.db`
/// - **Linux**: `~/.local/share/roomplan/roomplan.db`
pub fn default_database_path() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("com", "roomplan", "roomplan")
        .ok_or_else(|| anyhow!("could not determine the app data directory"))?;

    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("could not create {}", data_dir.display()))?;

    Ok(data_dir.join("roomplan.db"))
}

//! Configuration loader
//!
//! Environment variables take precedence; a JSON or TOML file is the
//! fallback.
//!
//! ## Environment Variables
//! - `CARDLEDGER_DB_PATH`: Database file path (required)
//! - `CARDLEDGER_DB_POOL_SIZE`: Connection pool size
//! - `CARDLEDGER_HOST`: Listener host
//! - `CARDLEDGER_PORT` (or `PORT`): Listener port
//!
//! ## File Locations
//! Probed in order, first match wins:
//! 1. `./cardledger.json`, `./cardledger.toml`
//! 2. `./config.json`, `./config.toml`
//! 3. The same names next to the executable

use std::path::{Path, PathBuf};

use cardledger_domain::constants::{DEFAULT_HOST, DEFAULT_POOL_SIZE, DEFAULT_PORT};
use cardledger_domain::{CardLedgerError, Config, DatabaseConfig, Result, ServerConfig};

const CONFIG_FILE_NAMES: [&str; 4] =
    ["cardledger.json", "cardledger.toml", "config.json", "config.toml"];

/// Load configuration, trying the environment before any config file
///
/// # Errors
/// Returns `CardLedgerError::Config` if neither source yields a usable
/// configuration.
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// Only `CARDLEDGER_DB_PATH` is required; everything else falls back to
/// the defaults in `cardledger_domain::constants`.
///
/// # Errors
/// Returns `CardLedgerError::Config` if the database path is missing or a
/// numeric variable does not parse.
pub fn load_from_env() -> Result<Config> {
    let db_path = env_var("CARDLEDGER_DB_PATH")?;
    let pool_size = env_parse::<u32>("CARDLEDGER_DB_POOL_SIZE", "pool size")?
        .unwrap_or(DEFAULT_POOL_SIZE);

    let host = std::env::var("CARDLEDGER_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
    let port = match env_parse::<u16>("CARDLEDGER_PORT", "port")? {
        Some(port) => port,
        None => env_parse::<u16>("PORT", "port")?.unwrap_or(DEFAULT_PORT),
    };

    Ok(Config {
        database: DatabaseConfig { path: db_path, pool_size },
        server: ServerConfig { host, port },
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, [`probe_config_paths`] picks the file.
///
/// # Errors
/// Returns `CardLedgerError::Config` if the file is missing, unreadable,
/// or not valid JSON/TOML for [`Config`].
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(CardLedgerError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            CardLedgerError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| CardLedgerError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration, choosing the format from the file extension
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| CardLedgerError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| CardLedgerError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(CardLedgerError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// First existing config file in the working directory or next to the
/// executable
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut dirs = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd);
    }
    if let Some(exe_dir) =
        std::env::current_exe().ok().and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        dirs.push(exe_dir);
    }

    dirs.iter()
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.exists())
}

fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        CardLedgerError::Config(format!("Missing required environment variable: {}", key))
    })
}

/// Parse an optional variable; unset is `None`, unparseable is an error.
fn env_parse<T>(key: &str, label: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| CardLedgerError::Config(format!("Invalid {} in {}: {}", label, key, e))),
        Err(_) => Ok(None),
    }
}

//! Configuration loader
//!
//! Loads the provider configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! Whatever the source, the result is validated before it is returned.
//!
//! ## Environment Variables
//! Required:
//! - `WIKIAUTH_CONSUMER_KEY`: OAuth consumer key
//! - `WIKIAUTH_CALLBACK_URL`: OAuth callback URL
//!
//! Optional:
//! - `WIKIAUTH_ENABLED`: Whether the provider is enabled (default true)
//! - `WIKIAUTH_CONSUMER_SECRET`: OAuth consumer secret
//! - `WIKIAUTH_SITE`: Provider base URL
//! - `WIKIAUTH_ALWAYS_SYNC_IDENTIFIER`: Rename accounts on login (default
//!   true)
//! - `WIKIAUTH_GATE_MODE`: `full` or `legacy`
//! - `WIKIAUTH_ALLOW_LINK_EXISTING`: Link to existing local accounts
//! - `WIKIAUTH_MAX_IDENTIFIER_LENGTH`: Longest identifier the suggester emits
//! - `WIKIAUTH_DB_PATH`, `WIKIAUTH_DB_POOL_SIZE`: Linked-account store
//! - `WIKIAUTH_LOG_FILTER`, `WIKIAUTH_LOG_FORMAT`: Logging
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./wikiauth.json` or `./wikiauth.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. Relative to executable location

use std::path::{Path, PathBuf};
use std::str::FromStr;

use wikiauth_domain::{
    AuthConfig, Config, DatabaseConfig, GateMode, LogFormat, LoggingConfig, Result,
    WikiAuthError,
};

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `WikiAuthError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - Validation fails
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
/// # Errors
/// Returns `WikiAuthError::Config` if required variables are missing,
/// have invalid values, or the result fails validation.
pub fn load_from_env() -> Result<Config> {
    let defaults = AuthConfig::default();

    let auth = AuthConfig {
        enabled: env_bool("WIKIAUTH_ENABLED", true),
        always_sync_identifier: env_bool(
            "WIKIAUTH_ALWAYS_SYNC_IDENTIFIER",
            defaults.always_sync_identifier,
        ),
        gate_mode: env_parse::<GateMode>("WIKIAUTH_GATE_MODE")?.unwrap_or(defaults.gate_mode),
        allow_link_existing: env_bool("WIKIAUTH_ALLOW_LINK_EXISTING", defaults.allow_link_existing),
        consumer_key: env_var("WIKIAUTH_CONSUMER_KEY")?,
        consumer_secret: std::env::var("WIKIAUTH_CONSUMER_SECRET").unwrap_or_default(),
        site: std::env::var("WIKIAUTH_SITE").unwrap_or(defaults.site),
        callback_url: env_var("WIKIAUTH_CALLBACK_URL")?,
        max_identifier_length: env_parse::<usize>("WIKIAUTH_MAX_IDENTIFIER_LENGTH")?
            .unwrap_or(defaults.max_identifier_length),
    };

    let db_defaults = DatabaseConfig::default();
    let database = DatabaseConfig {
        path: std::env::var("WIKIAUTH_DB_PATH").unwrap_or(db_defaults.path),
        pool_size: env_parse::<u32>("WIKIAUTH_DB_POOL_SIZE")?.unwrap_or(db_defaults.pool_size),
    };

    let log_defaults = LoggingConfig::default();
    let logging = LoggingConfig {
        filter: std::env::var("WIKIAUTH_LOG_FILTER").unwrap_or(log_defaults.filter),
        format: env_parse::<LogFormat>("WIKIAUTH_LOG_FORMAT")?.unwrap_or(log_defaults.format),
    };

    let config = Config { auth, database, logging };
    config.auth.validate()?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `WikiAuthError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Validation fails
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(WikiAuthError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            WikiAuthError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| WikiAuthError::Config(format!("Failed to read config file: {e}")))?;

    let config = parse_config(&contents, &config_path)?;
    config.auth.validate()?;
    Ok(config)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| WikiAuthError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| WikiAuthError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(WikiAuthError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    const NAMES: [&str; 4] = ["config.json", "config.toml", "wikiauth.json", "wikiauth.toml"];

    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(NAMES.iter().map(|name| cwd.join(name)));
        candidates.extend(NAMES.iter().map(|name| cwd.join("..").join(name)));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(NAMES.iter().map(|name| exe_dir.join(name)));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    std::env::var(key)
        .map_err(|_| WikiAuthError::Config(format!("Missing required environment variable: {key}")))
}

/// Parse an optional environment variable; unset yields `None`.
fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| WikiAuthError::Config(format!("Invalid value for {key}: {e}"))),
        Err(_) => Ok(None),
    }
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}

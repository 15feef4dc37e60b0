//! Configuration structures
//!
//! Configuration is read once per process (or per request by the host) and
//! passed into each component at construction time. Nothing in the crate
//! family looks settings up through a global.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::constants::DEFAULT_MAX_IDENTIFIER_LENGTH;
use crate::errors::{Result, WikiAuthError};
use crate::impl_domain_label_conversions;

const DEFAULT_SITE: &str = "https://meta.wikimedia.org";
const DEFAULT_DB_PATH: &str = "wikiauth.db";
const DEFAULT_POOL_SIZE: u32 = 4;
const DEFAULT_LOG_FILTER: &str = "info";

/// Which variant of the authentication gate runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GateMode {
    /// Collision detection, identifier sync and optional account linking.
    #[default]
    Full,
    /// Verification check only; never links to an existing account.
    Legacy,
}

impl_domain_label_conversions!(GateMode {
    Full => "full",
    Legacy => "legacy",
});

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl_domain_label_conversions!(LogFormat {
    Pretty => "pretty",
    Json => "json",
});

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Provider login settings.
///
/// The transport fields (`consumer_key`, `consumer_secret`, `site`,
/// `callback_url`) are opaque to the reconciliation logic and only handed to
/// the OAuth strategy.
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub enabled: bool,
    /// Force the local identifier back to the provider-derived form on every
    /// login.
    #[serde(default = "default_true")]
    pub always_sync_identifier: bool,
    #[serde(default)]
    pub gate_mode: GateMode,
    /// Allow resolution to link the remote identity to a pre-existing local
    /// account. Ignored in legacy mode.
    #[serde(default)]
    pub allow_link_existing: bool,
    #[serde(default)]
    pub consumer_key: String,
    #[serde(default)]
    pub consumer_secret: String,
    #[serde(default = "default_site")]
    pub site: String,
    #[serde(default)]
    pub callback_url: String,
    #[serde(default = "default_max_identifier_length")]
    pub max_identifier_length: usize,
}

impl AuthConfig {
    /// Check that an enabled provider has usable transport settings.
    ///
    /// A disabled provider is always valid; its settings are never used.
    ///
    /// # Errors
    /// Returns `WikiAuthError::Config` for a missing consumer key, an
    /// unparsable site or callback URL, or a zero identifier length.
    pub fn validate(&self) -> Result<()> {
        if self.max_identifier_length == 0 {
            return Err(WikiAuthError::Config("max_identifier_length must be positive".into()));
        }

        if !self.enabled {
            return Ok(());
        }

        if self.consumer_key.trim().is_empty() {
            return Err(WikiAuthError::Config("consumer_key is required".into()));
        }

        Url::parse(&self.site)
            .map_err(|e| WikiAuthError::Config(format!("Invalid site URL: {e}")))?;
        Url::parse(&self.callback_url)
            .map_err(|e| WikiAuthError::Config(format!("Invalid callback URL: {e}")))?;

        Ok(())
    }

    /// Whether resolution may link to an existing local account in the
    /// configured mode.
    pub fn link_existing_allowed(&self) -> bool {
        self.gate_mode == GateMode::Full && self.allow_link_existing
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            always_sync_identifier: true,
            gate_mode: GateMode::Full,
            allow_link_existing: false,
            consumer_key: String::new(),
            consumer_secret: String::new(),
            site: default_site(),
            callback_url: String::new(),
            max_identifier_length: DEFAULT_MAX_IDENTIFIER_LENGTH,
        }
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("enabled", &self.enabled)
            .field("always_sync_identifier", &self.always_sync_identifier)
            .field("gate_mode", &self.gate_mode)
            .field("allow_link_existing", &self.allow_link_existing)
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"[REDACTED]")
            .field("site", &self.site)
            .field("callback_url", &self.callback_url)
            .field("max_identifier_length", &self.max_identifier_length)
            .finish()
    }
}

/// Linked-account store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: String,
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self { path: default_db_path(), pool_size: default_pool_size() }
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info,wikiauth_core=debug`
    #[serde(default = "default_log_filter")]
    pub filter: String,
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { filter: default_log_filter(), format: LogFormat::default() }
    }
}

const fn default_true() -> bool {
    true
}

fn default_site() -> String {
    DEFAULT_SITE.to_string()
}

const fn default_max_identifier_length() -> usize {
    DEFAULT_MAX_IDENTIFIER_LENGTH
}

fn default_db_path() -> String {
    DEFAULT_DB_PATH.to_string()
}

const fn default_pool_size() -> u32 {
    DEFAULT_POOL_SIZE
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

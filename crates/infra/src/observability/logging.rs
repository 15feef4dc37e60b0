//! Tracing subscriber setup

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};
use wikiauth_domain::{LogFormat, LoggingConfig, Result, WikiAuthError};

/// Filter from `RUST_LOG` when set, otherwise from the configured directive.
///
/// # Errors
/// Returns `WikiAuthError::Config` when the configured directive is invalid.
pub fn build_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    EnvFilter::try_from_default_env().or_else(|_| {
        EnvFilter::try_new(&config.filter)
            .map_err(|e| WikiAuthError::Config(format!("Invalid log filter '{}': {e}", config.filter)))
    })
}

/// Install the global subscriber.
///
/// # Errors
/// `WikiAuthError::Config` for an invalid filter, `WikiAuthError::Internal`
/// when a global subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let registry = tracing_subscriber::registry().with(build_filter(config)?);

    let installed = match config.format {
        LogFormat::Json => registry.with(fmt::layer().json().with_target(true)).try_init(),
        LogFormat::Pretty => registry.with(fmt::layer().with_target(true)).try_init(),
    };

    installed.map_err(|e| WikiAuthError::Internal(format!("tracing already initialised: {e}")))?;
    tracing::debug!(filter = %config.filter, format = %config.format, "tracing initialised");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_initialisation_is_an_error() {
        let config = LoggingConfig { filter: "wikiauth_core=debug".into(), format: LogFormat::Json };

        init_tracing(&config).expect("first install");
        let err = init_tracing(&config).expect_err("already installed");
        assert!(matches!(err, WikiAuthError::Internal(_)));
    }

    #[test]
    fn configured_directive_builds_filter() {
        let config = LoggingConfig::default();
        assert!(build_filter(&config).is_ok());
    }
}

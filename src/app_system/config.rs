use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

const DEFAULT_CHANNEL_CAPACITY: usize = 32;
const DEFAULT_LOG_FILTER: &str = "info";
const CONFIG_FILE: &str = "config/order-store";
const ENV_PREFIX: &str = "ORDER_STORE";

#[derive(Debug, Error)]
pub enum AppConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] ConfigError),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Runtime settings for [`super::OrderSystem`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AppConfig {
    /// Request queue depth of each collection actor.
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
    /// Fallback `tracing` filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_channel_capacity() -> usize {
    DEFAULT_CHANNEL_CAPACITY
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), AppConfigError> {
        if self.channel_capacity == 0 {
            return Err(AppConfigError::Invalid(
                "channel_capacity must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Load settings from built-in defaults, an optional `config/order-store.*`
/// file, then `ORDER_STORE__*` environment variables (highest precedence).
pub fn load_config() -> Result<AppConfig, AppConfigError> {
    let builder = with_defaults(Config::builder())?
        .add_source(File::with_name(CONFIG_FILE).required(false))
        .add_source(Environment::with_prefix(ENV_PREFIX).separator("__").try_parsing(true));

    let app_config = build_config(builder)?;

    info!(channel_capacity = app_config.channel_capacity, "Configuration loaded");
    Ok(app_config)
}

fn with_defaults(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    builder
        .set_default("channel_capacity", DEFAULT_CHANNEL_CAPACITY as i64)?
        .set_default("log_filter", DEFAULT_LOG_FILTER)
}

fn build_config(builder: ConfigBuilder<DefaultState>) -> Result<AppConfig, AppConfigError> {
    let app_config: AppConfig = builder.build()?.try_deserialize()?;
    app_config.validate()?;
    Ok(app_config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_sources() {
        let builder = with_defaults(Config::builder()).unwrap();
        assert_eq!(build_config(builder).unwrap(), AppConfig::default());
    }

    #[test]
    fn test_overrides_win_over_defaults() {
        let builder = with_defaults(Config::builder())
            .unwrap()
            .set_override("channel_capacity", 0_i64)
            .unwrap();
        assert!(matches!(build_config(builder), Err(AppConfigError::Invalid(_))));
    }

    #[test]
    fn test_zero_capacity_is_rejected() {
        let config = AppConfig {
            channel_capacity: 0,
            ..AppConfig::default()
        };
        assert!(matches!(config.validate(), Err(AppConfigError::Invalid(_))));
    }

    #[test]
    fn test_partial_document_uses_field_defaults() {
        let config: AppConfig = serde_json::from_str(r#"{"log_filter": "debug"}"#).unwrap();
        assert_eq!(config.channel_capacity, DEFAULT_CHANNEL_CAPACITY);
        assert_eq!(config.log_filter, "debug");
    }
}

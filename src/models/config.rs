use std::path::PathBuf;
use std::time::Duration;

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use thiserror::Error;
use validator::Validate;

use crate::domain::store::PricingConfig;
use crate::sources::browserless::BrowserlessSettings;

const DEFAULTS: &str = include_str!("../../config/default.yaml");

/// Optional override file looked up in the working directory.
pub const CONFIG_FILE: &str = "laopu-intel";
pub const ENV_PREFIX: &str = "LAOPU";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("invalid configuration: {0}")]
    Invalid(#[from] validator::ValidationErrors),
}

/// Settings of a dashboard generation run.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AppConfig {
    /// Directory receiving `index.html` and `data.json`.
    pub output_dir: PathBuf,
    /// Search keyword for news and social sources.
    #[validate(length(min = 1))]
    pub keyword: String,
    #[validate(length(min = 1))]
    pub xhs_fallback_query: String,
    /// Upper bound of items requested from each social source.
    #[validate(range(min = 1))]
    pub social_max_items: usize,
    /// Title prefix length used as duplicate key.
    #[validate(range(min = 1))]
    pub dedupe_key_len: usize,
    #[validate(range(min = 1))]
    pub http_timeout_secs: u64,
    #[validate(nested)]
    pub pricing: PricingConfig,
    #[serde(default)]
    pub browserless: BrowserlessSettings,
}

impl AppConfig {
    /// Loads embedded defaults, then `laopu-intel.yaml` if present, then
    /// `LAOPU_*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from_str(DEFAULTS, FileFormat::Yaml))
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        Self::from_config(settings)
    }

    /// Deserializes and validates an already assembled configuration.
    pub fn from_config(settings: Config) -> Result<Self, ConfigError> {
        let app: AppConfig = settings.try_deserialize()?;
        app.validate()?;
        Ok(app)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_yaml(extra: &str) -> Result<AppConfig, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from_str(DEFAULTS, FileFormat::Yaml))
            .add_source(File::from_str(extra, FileFormat::Yaml))
            .build()?;
        AppConfig::from_config(settings)
    }

    #[test]
    fn embedded_defaults_are_valid() {
        let app = from_yaml("").unwrap();

        assert_eq!(app.keyword, "老铺黄金");
        assert_eq!(app.dedupe_key_len, 20);
        assert_eq!(app.pricing, PricingConfig::default());
        assert_eq!(app.http_timeout(), Duration::from_secs(12));
        assert!(app.browserless.base_url.is_none());
        assert_eq!(app.browserless.settle_ms, 3_000);
    }

    #[test]
    fn overrides_take_precedence() {
        let app = from_yaml(
            "output_dir: /tmp/out\nbrowserless:\n  base_url: http://localhost:3000\n",
        )
        .unwrap();

        assert_eq!(app.output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(app.browserless.base_url.as_deref(), Some("http://localhost:3000"));
        assert_eq!(app.browserless.navigation_timeout_ms, 25_000);
    }

    #[test]
    fn rejects_zero_key_length() {
        let err = from_yaml("dedupe_key_len: 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_non_positive_price() {
        let err = from_yaml("pricing:\n  price_per_gram: 0.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}

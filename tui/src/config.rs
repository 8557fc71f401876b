//! Configuration loading.
//!
//! Loads `~/.config/catalog-tui/config.toml` (or the `--config` path). A
//! missing file is not an error: defaults are used. CLI flags are applied on
//! top through [`ConfigOverrides`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use catalog_client::{DEFAULT_BASE_URL, DEFAULT_LIST_TIMEOUT};
use serde::Deserialize;
use thiserror::Error;
use url::Url;

pub const DEFAULT_CONFIG_FILENAME: &str = "config.toml";
pub const DEFAULT_CURRENCY_SYMBOL: &str = "₱";
const APP_DIR: &str = "catalog-tui";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    /// Base URL of the catalog REST API, without the `/products` suffix.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Timeout for the product list request.
    #[serde(default = "default_list_timeout_secs")]
    pub list_timeout_secs: u64,

    /// Prefix for rendered prices.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Directory for the log file. Defaults to `~/.catalog-tui/log`.
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

fn default_api_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_list_timeout_secs() -> u64 {
    DEFAULT_LIST_TIMEOUT.as_secs()
}

fn default_currency_symbol() -> String {
    DEFAULT_CURRENCY_SYMBOL.to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            list_timeout_secs: default_list_timeout_secs(),
            currency_symbol: default_currency_symbol(),
            log_dir: None,
        }
    }
}

/// Values from the command line that win over the file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub api_base_url: Option<String>,
    pub list_timeout_secs: Option<u64>,
    pub currency_symbol: Option<String>,
}

impl CatalogConfig {
    /// Load from `path`, or from the default location when `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::default_config_path(),
        };

        if !path.exists() {
            tracing::info!(path = %path.display(), "config not found, using defaults");
            return Ok(Self::default());
        }

        Self::load_from_path(&path)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg = Self::parse(&contents)?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(cfg)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(contents: &str) -> Result<Self> {
        let cfg: CatalogConfig = toml::from_str(contents)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Apply CLI overrides and re-validate.
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Result<Self> {
        if let Some(url) = overrides.api_base_url {
            self.api_base_url = url;
        }
        if let Some(secs) = overrides.list_timeout_secs {
            self.list_timeout_secs = secs;
        }
        if let Some(symbol) = overrides.currency_symbol {
            self.currency_symbol = symbol;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn list_timeout(&self) -> Duration {
        Duration::from_secs(self.list_timeout_secs)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.log_dir.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .map(|h| h.join(format!(".{APP_DIR}")).join("log"))
                .unwrap_or_else(|| PathBuf::from("log"))
        })
    }

    fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .map(|h| h.join(".config").join(APP_DIR).join(DEFAULT_CONFIG_FILENAME))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILENAME))
    }

    fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.api_base_url).map_err(|e| {
            ConfigError::Invalid(format!("api_base_url {:?}: {e}", self.api_base_url))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid(format!(
                "api_base_url must use http or https, got {}",
                url.scheme()
            )));
        }

        if self.list_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "list_timeout_secs must be greater than zero".to_string(),
            ));
        }

        if self.currency_symbol.is_empty() {
            tracing::warn!("currency_symbol is empty; prices will render without a prefix");
        }

        Ok(())
    }
}

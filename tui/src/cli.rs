use std::path::PathBuf;

use clap::Parser;

use crate::config::ConfigOverrides;

/// Terminal admin for a product catalog REST API.
#[derive(Parser, Debug, Default)]
#[command(version)]
pub struct Cli {
    /// Base URL of the catalog API, e.g. http://localhost:8000/api.
    #[arg(long = "base-url", value_name = "URL")]
    pub base_url: Option<String>,

    /// Path to the config file. Defaults to ~/.config/catalog-tui/config.toml.
    #[arg(long = "config", short = 'c', value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Seconds to wait for the product list before giving up.
    #[arg(long = "list-timeout-secs", value_name = "SECS")]
    pub list_timeout_secs: Option<u64>,

    /// Symbol printed before prices.
    #[arg(long = "currency", value_name = "SYMBOL")]
    pub currency: Option<String>,
}

impl Cli {
    pub fn config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            api_base_url: self.base_url.clone(),
            list_timeout_secs: self.list_timeout_secs,
            currency_symbol: self.currency.clone(),
        }
    }
}

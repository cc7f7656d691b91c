//! API Config

use std::time::Duration;

use clap::Args;
use reptitrack::pricing::currency_from_code;
use reptitrack_app::api::ApiConfig;
use rusty_money::iso::Currency;

/// Backend connection settings.
#[derive(Debug, Args)]
pub(crate) struct ApiArgs {
    /// Backend API base address
    #[arg(long = "api-url", env = "API_URL")]
    pub url: String,

    /// Bearer token for an existing session
    #[arg(long = "api-token", env = "API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Request timeout in seconds
    #[arg(long = "api-timeout-seconds", env = "API_TIMEOUT_SECONDS", default_value_t = 30_u64)]
    pub timeout_seconds: u64,

    /// Catalog currency (MXN, USD, EUR, GBP)
    #[arg(long, env = "CURRENCY", default_value = "MXN", value_parser = parse_currency)]
    pub currency: &'static Currency,
}

impl ApiArgs {
    pub(crate) fn api_config(&self) -> ApiConfig {
        ApiConfig {
            base_url: self.url.clone(),
            timeout: Duration::from_secs(self.timeout_seconds),
        }
    }
}

fn parse_currency(code: &str) -> Result<&'static Currency, String> {
    currency_from_code(code).ok_or_else(|| format!("unsupported currency `{code}`"))
}

//! CLI configuration

use std::time::Duration;

use clap::Args;
use reptitrack_app::{cart::CartSettings, context::ContextSettings};

use crate::config::{api::ApiArgs, cart::CartArgs, logging::LoggingConfig};

pub(crate) mod api;
pub(crate) mod cart;
pub(crate) mod logging;

/// Settings shared by every subcommand.
#[derive(Debug, Args)]
pub(crate) struct AppConfig {
    /// Backend API settings.
    #[command(flatten)]
    pub api: ApiArgs,

    /// Cart and checkout settings.
    #[command(flatten)]
    pub cart: CartArgs,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Context wiring for these settings.
    pub(crate) fn context_settings(&self) -> ContextSettings {
        let mut settings = ContextSettings::new(self.api.api_config());

        settings.currency = self.api.currency;
        settings.token.clone_from(&self.api.token);
        settings.payment_delay = Duration::from_millis(self.cart.payment_delay_ms);
        settings.cart = CartSettings {
            error_ttl: Duration::from_millis(self.cart.error_ttl_ms),
            success_ttl: Duration::from_millis(self.cart.success_ttl_ms),
            retain_failed_only: self.cart.retain_failed_only,
        };

        settings
    }
}

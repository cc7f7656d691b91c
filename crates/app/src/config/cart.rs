//! Cart Config

use clap::Args;

/// Cart notice and checkout timing settings.
#[derive(Debug, Args)]
pub(crate) struct CartArgs {
    /// Simulated payment processing time in milliseconds
    #[arg(long, env = "PAYMENT_DELAY_MS", default_value_t = 2_000_u64)]
    pub payment_delay_ms: u64,

    /// How long error notices stay up, in milliseconds
    #[arg(long = "cart-error-ttl-ms", env = "CART_ERROR_TTL_MS", default_value_t = 5_000_u64)]
    pub error_ttl_ms: u64,

    /// How long success notices stay up, in milliseconds
    #[arg(long = "cart-success-ttl-ms", env = "CART_SUCCESS_TTL_MS", default_value_t = 3_000_u64)]
    pub success_ttl_ms: u64,

    /// After a partial failure keep only the lines that were not recorded
    #[arg(long = "cart-retain-failed-only", env = "CART_RETAIN_FAILED_ONLY", default_value_t = false)]
    pub retain_failed_only: bool,
}

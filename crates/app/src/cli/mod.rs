#![expect(clippy::print_stdout, reason = "commands print their results")]

use clap::{Parser, Subcommand};
use reptitrack_app::context::AppContext;

use crate::config::{AppConfig, logging::LoggingConfig};

mod account;
mod checkout;
mod products;
mod render;
mod sales;

#[derive(Debug, Parser)]
#[command(name = "reptitrack", about = "ReptiTrack storefront CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    config: AppConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Sign in and print the session token
    Login(account::LoginArgs),

    /// Show the signed-in account
    Account,

    Products(products::ProductsCommand),

    Sales(sales::SalesCommand),

    /// Buy products with a card payment
    Checkout(checkout::CheckoutArgs),
}

impl Cli {
    /// Parse arguments, with `.env` values as environment fallbacks.
    pub(crate) fn load() -> Result<Self, clap::Error> {
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    pub(crate) fn logging(&self) -> &LoggingConfig {
        &self.config.logging
    }

    pub(crate) async fn run(self) -> Result<(), String> {
        let ctx = AppContext::from_settings(self.config.context_settings())
            .map_err(|error| format!("failed to initialise: {error}"))?;

        match self.command {
            Commands::Login(args) => account::login(&ctx, args).await,
            Commands::Account => account::show(&ctx).await,
            Commands::Products(command) => products::run(&ctx, command).await,
            Commands::Sales(command) => sales::run(&ctx, command).await,
            Commands::Checkout(args) => checkout::run(&ctx, args).await,
        }
    }
}

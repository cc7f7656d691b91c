//! App Context

use std::{sync::Arc, time::Duration};

use rusty_money::iso::{self, Currency};
use thiserror::Error;

use crate::{
    api::{ApiClient, ApiConfig, ApiError},
    auth::{AuthService, HttpAuthService, Session},
    cart::{CartSettings, CartStore},
    checkout::{CheckoutFlow, DEFAULT_PAYMENT_DELAY, SystemClock},
    domain::{
        products::{HttpProductsService, ProductsService},
        sales::{HttpSalesService, SalesService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to build api client")]
    Api(#[source] ApiError),
}

/// Everything needed to wire an [`AppContext`].
#[derive(Debug, Clone)]
pub struct ContextSettings {
    pub api: ApiConfig,
    pub currency: &'static Currency,
    pub cart: CartSettings,
    pub payment_delay: Duration,

    /// Bearer token to start the session with.
    pub token: Option<String>,
}

impl ContextSettings {
    #[must_use]
    pub fn new(api: ApiConfig) -> Self {
        Self {
            api,
            currency: iso::MXN,
            cart: CartSettings::default(),
            payment_delay: DEFAULT_PAYMENT_DELAY,
            token: None,
        }
    }
}

#[derive(Clone)]
pub struct AppContext {
    pub session: Arc<Session>,
    pub auth: Arc<dyn AuthService>,
    pub products: Arc<dyn ProductsService>,
    pub sales: Arc<dyn SalesService>,
    pub cart: Arc<CartStore>,
    pub checkout: Arc<CheckoutFlow>,
}

impl AppContext {
    /// Build application context talking to the configured backend.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built.
    pub fn from_settings(settings: ContextSettings) -> Result<Self, AppInitError> {
        let session = Arc::new(
            settings
                .token
                .map_or_else(Session::new, Session::with_token),
        );

        let api = ApiClient::new(settings.api, Arc::clone(&session)).map_err(AppInitError::Api)?;

        let sales: Arc<dyn SalesService> = Arc::new(HttpSalesService::new(api.clone()));

        let cart = Arc::new(CartStore::new(
            Arc::clone(&sales),
            session.clone(),
            settings.currency,
            settings.cart,
        ));

        let checkout = Arc::new(CheckoutFlow::new(
            Arc::clone(&cart),
            Arc::new(SystemClock),
            settings.payment_delay,
        ));

        Ok(Self {
            auth: Arc::new(HttpAuthService::new(api.clone(), Arc::clone(&session))),
            products: Arc::new(HttpProductsService::new(api, settings.currency)),
            sales,
            cart,
            checkout,
            session,
        })
    }
}

#[cfg(test)]
mod tests {
    use reptitrack::checkout::CheckoutState;
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn context_starts_with_empty_cart_and_given_token() -> TestResult {
        let mut settings = ContextSettings::new(ApiConfig::new("http://localhost:5000/api"));
        settings.token = Some("abc".to_string());
        settings.currency = iso::USD;

        let ctx = AppContext::from_settings(settings)?;

        assert_eq!(ctx.session.token().as_deref(), Some("abc"));
        assert!(ctx.cart.snapshot().is_empty());
        assert_eq!(ctx.cart.snapshot().currency(), iso::USD);
        assert_eq!(ctx.checkout.state(), CheckoutState::Idle);

        Ok(())
    }
}

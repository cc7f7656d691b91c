//! Auth service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::{info, warn};

use crate::{
    api::ApiClient,
    auth::{AccountDetail, AuthError, AuthResponse, LoginRequest, Session},
};

#[derive(Debug, Clone)]
pub struct HttpAuthService {
    api: ApiClient,
    session: Arc<Session>,
}

impl HttpAuthService {
    #[must_use]
    pub fn new(api: ApiClient, session: Arc<Session>) -> Self {
        Self { api, session }
    }
}

#[async_trait]
impl AuthService for HttpAuthService {
    async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, AuthError> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let response: AuthResponse = self.api.post_json("Account/login", &request).await?;

        if !response.is_success {
            warn!(email, "login rejected");

            return Ok(response);
        }

        let Some(token) = response.token.as_deref() else {
            return Err(AuthError::Rejected(
                "login succeeded without a token".to_string(),
            ));
        };

        self.session.set_token(token);
        info!(email, "logged in");

        Ok(response)
    }

    async fn account_detail(&self) -> Result<AccountDetail, AuthError> {
        Ok(self.api.get_json("Account/detail").await?)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Sign in, storing the issued token in the session on success.
    async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, AuthError>;

    /// Account of the signed-in user, as the backend sees it.
    async fn account_detail(&self) -> Result<AccountDetail, AuthError>;
}

//! Client session.

use std::sync::{PoisonError, RwLock};

use jiff::Timestamp;
use mockall::automock;
use tracing::{debug, warn};
use zeroize::Zeroize;

use crate::auth::{UserDetail, token_expiry};

/// Holds the bearer token of the signed-in user, if any.
#[derive(Debug, Default)]
pub struct Session {
    token: RwLock<Option<String>>,
}

impl Session {
    /// Anonymous session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Session signed in with `token`.
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }

    /// Current bearer token.
    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the bearer token.
    pub fn set_token(&self, token: impl Into<String>) {
        let mut guard = self.token.write().unwrap_or_else(PoisonError::into_inner);

        if let Some(mut previous) = guard.replace(token.into()) {
            previous.zeroize();
        }
    }

    /// Forget the bearer token.
    pub fn logout(&self) {
        let mut guard = self.token.write().unwrap_or_else(PoisonError::into_inner);

        if let Some(mut token) = guard.take() {
            token.zeroize();
            debug!("session cleared");
        }
    }

    /// Whether a token is held and has not expired at `now`.
    ///
    /// An expired or undecodable token is dropped from the session.
    pub fn is_logged_in(&self, now: Timestamp) -> bool {
        let Some(token) = self.token() else {
            return false;
        };

        match token_expiry(&token) {
            Ok(Some(expires_at)) if expires_at <= now => {
                debug!(%expires_at, "session token expired");
                self.logout();

                false
            }
            Ok(_) => true,
            Err(error) => {
                warn!(%error, "discarding unreadable session token");
                self.logout();

                false
            }
        }
    }

    /// Signed-in user, decoded from the current token.
    pub fn user(&self) -> Option<UserDetail> {
        let token = self.token()?;

        UserDetail::from_token(&token)
            .inspect_err(|error| warn!(%error, "session token has no usable user"))
            .ok()
    }
}

/// Source of the signed-in user's identity.
#[automock]
pub trait Identity: Send + Sync {
    /// The signed-in user, if any.
    fn current_user(&self) -> Option<UserDetail>;
}

impl Identity for Session {
    fn current_user(&self) -> Option<UserDetail> {
        self.user()
    }
}

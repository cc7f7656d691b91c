//! Auth errors.

use thiserror::Error;

use crate::api::ApiError;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid session token")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("session token is missing the `{0}` claim")]
    MissingClaim(&'static str),

    #[error("session token has an invalid expiry")]
    InvalidExpiry(#[source] jiff::Error),

    #[error("login rejected: {0}")]
    Rejected(String),

    #[error("api error")]
    Api(#[from] ApiError),
}

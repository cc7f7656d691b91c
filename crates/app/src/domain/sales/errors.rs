//! Sales service errors.

use thiserror::Error;

use crate::api::ApiError;

#[derive(Debug, Error)]
pub enum SalesServiceError {
    #[error("sale not found")]
    NotFound,

    #[error("sale rejected: {0}")]
    Rejected(String),

    #[error("api error")]
    Api(#[source] ApiError),
}

impl SalesServiceError {
    /// Reason suitable for per-line purchase reports.
    #[must_use]
    pub fn reason(&self) -> String {
        match self {
            Self::Api(ApiError::UnexpectedResponse { status, body }) if !body.is_empty() => {
                format!("{status}: {body}")
            }
            Self::Api(ApiError::UnexpectedResponse { status, .. }) => status.to_string(),
            other => other.to_string(),
        }
    }
}

impl From<ApiError> for SalesServiceError {
    fn from(error: ApiError) -> Self {
        if error.is_not_found() {
            return Self::NotFound;
        }

        Self::Api(error)
    }
}

//! Products service errors.

use reptitrack::products::ProductError;
use thiserror::Error;

use crate::api::ApiError;

#[derive(Debug, Error)]
pub enum ProductsServiceError {
    #[error("product not found")]
    NotFound,

    #[error("invalid product data")]
    InvalidData(#[from] ProductError),

    #[error("api error")]
    Api(#[source] ApiError),
}

impl From<ApiError> for ProductsServiceError {
    fn from(error: ApiError) -> Self {
        if error.is_not_found() {
            return Self::NotFound;
        }

        Self::Api(error)
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use super::*;

    #[test]
    fn not_found_status_maps_to_not_found() {
        let error = ProductsServiceError::from(ApiError::UnexpectedResponse {
            status: StatusCode::NOT_FOUND,
            body: String::new(),
        });

        assert!(
            matches!(error, ProductsServiceError::NotFound),
            "expected NotFound, got {error:?}"
        );
    }

    #[test]
    fn other_statuses_stay_api_errors() {
        let error = ProductsServiceError::from(ApiError::UnexpectedResponse {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: "boom".to_string(),
        });

        assert!(
            matches!(error, ProductsServiceError::Api(_)),
            "expected Api, got {error:?}"
        );
    }
}

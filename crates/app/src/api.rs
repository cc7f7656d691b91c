//! Backend REST API client.

use std::{sync::Arc, time::Duration};

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::debug;

use crate::auth::Session;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for connecting to the backend API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// API base address, e.g. `"https://api.example.com/api"`.
    pub base_url: String,

    /// Per-request timeout.
    pub timeout: Duration,
}

impl ApiConfig {
    /// Configuration for `base_url` with the default timeout.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// HTTP client for the backend, attaching the session bearer token when present.
#[derive(Debug, Clone)]
pub struct ApiClient {
    config: ApiConfig,
    http: Client,
    session: Arc<Session>,
}

impl ApiClient {
    /// Create a new client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying HTTP client cannot be built.
    pub fn new(config: ApiConfig, session: Arc<Session>) -> Result<Self, ApiError> {
        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            config,
            http,
            session,
        })
    }

    /// Absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// `GET path`, decoding a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error on HTTP failure, a non-2xx status or an unexpected body.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send(self.http.get(self.url(path))).await?;

        Ok(response.json().await?)
    }

    /// `POST path` with a JSON body, decoding a JSON response.
    ///
    /// # Errors
    ///
    /// Returns an error on HTTP failure, a non-2xx status or an unexpected body.
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let response = self.send(self.http.post(self.url(path)).json(body)).await?;

        Ok(response.json().await?)
    }

    /// `POST path` with a JSON body, returning the raw response body.
    ///
    /// Any 2xx status succeeds, whatever the body holds.
    ///
    /// # Errors
    ///
    /// Returns an error on HTTP failure or a non-2xx status.
    pub async fn post<B>(&self, path: &str, body: &B) -> Result<String, ApiError>
    where
        B: Serialize + ?Sized + Sync,
    {
        let response = self.send(self.http.post(self.url(path)).json(body)).await?;

        Ok(response.text().await?)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let request = match self.session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await?;
        let status = response.status();

        debug!(url = %response.url(), %status, "api response");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();

            return Err(ApiError::UnexpectedResponse { status, body });
        }

        Ok(response)
    }
}

/// Errors that can occur when talking to the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status.
    #[error("request failed with status {status}: {body}")]
    UnexpectedResponse {
        /// Response status
        status: StatusCode,

        /// Response body, possibly empty
        body: String,
    },
}

impl ApiError {
    /// Response status, when the backend answered.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Http(error) => error.status(),
            Self::UnexpectedResponse { status, .. } => Some(*status),
        }
    }

    /// Whether the backend answered `404 Not Found`.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}

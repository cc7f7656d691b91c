//! Sales service.

use async_trait::async_trait;
use mockall::automock;
use reptitrack::sales::{Sale, SaleRequest};
use serde::Deserialize;
use tracing::debug;

use crate::{api::ApiClient, domain::sales::errors::SalesServiceError};

/// Acknowledgement some backends return from sale mutations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct HttpSalesService {
    api: ApiClient,
}

impl MessageResponse {
    /// Read the acknowledgement from a response body, which may be empty or
    /// not JSON at all.
    pub fn from_body(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }
}

impl HttpSalesService {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl SalesService for HttpSalesService {
    async fn create_sale(&self, sale: SaleRequest) -> Result<(), SalesServiceError> {
        let response = MessageResponse::from_body(&self.api.post("Sales", &sale).await?);

        debug!(
            product_id = %sale.product_id,
            quantity = sale.quantity,
            message = response.message.as_deref().unwrap_or_default(),
            "sale recorded"
        );

        Ok(())
    }

    async fn list_sales(&self) -> Result<Vec<Sale>, SalesServiceError> {
        Ok(self.api.get_json("Sales").await?)
    }

    async fn list_my_sales(&self) -> Result<Vec<Sale>, SalesServiceError> {
        Ok(self.api.get_json("Sales/my").await?)
    }

    async fn get_sale(&self, id: i64) -> Result<Sale, SalesServiceError> {
        Ok(self.api.get_json(&format!("Sales/{id}")).await?)
    }
}

#[automock]
#[async_trait]
pub trait SalesService: Send + Sync {
    /// Records the sale of one cart line.
    async fn create_sale(&self, sale: SaleRequest) -> Result<(), SalesServiceError>;

    /// Retrieves every sale.
    async fn list_sales(&self) -> Result<Vec<Sale>, SalesServiceError>;

    /// Retrieves the signed-in client's sales.
    async fn list_my_sales(&self) -> Result<Vec<Sale>, SalesServiceError>;

    /// Retrieve a single sale.
    async fn get_sale(&self, id: i64) -> Result<Sale, SalesServiceError>;
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use jiff::Timestamp;
    use reptitrack::cart::Cart;
    use rusty_money::iso;
    use testresult::TestResult;

    use super::*;
    use crate::{
        api::ApiConfig,
        auth::Session,
        test::helpers::{product, serve_once},
    };

    fn sale() -> TestResult<SaleRequest> {
        let mut cart = Cart::new(iso::MXN);
        cart.add(product(1, "Heat lamp", 25_00), 2)?;

        let line = cart.lines().first().ok_or("cart line missing")?;

        Ok(SaleRequest::for_line("client-1", line, Timestamp::UNIX_EPOCH))
    }

    async fn service_answering(response: &'static str) -> TestResult<HttpSalesService> {
        let url = serve_once(response).await?;
        let api = ApiClient::new(ApiConfig::new(url), Arc::new(Session::new()))?;

        Ok(HttpSalesService::new(api))
    }

    #[tokio::test]
    async fn created_without_body_is_recorded() -> TestResult {
        let sales =
            service_answering("HTTP/1.1 201 Created\r\nContent-Length: 0\r\n\r\n").await?;

        sales.create_sale(sale()?).await?;

        Ok(())
    }

    #[tokio::test]
    async fn plain_text_acknowledgement_is_recorded() -> TestResult {
        let sales = service_answering(
            "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 7\r\n\r\nCreated",
        )
        .await?;

        sales.create_sale(sale()?).await?;

        Ok(())
    }

    #[tokio::test]
    async fn rejected_sale_keeps_backend_reason() -> TestResult {
        let sales = service_answering(
            "HTTP/1.1 409 Conflict\r\nContent-Length: 12\r\n\r\nout of stock",
        )
        .await?;

        let result = sales.create_sale(sale()?).await;

        let Err(error) = result else {
            return Err("a 409 should not record the sale".into());
        };

        assert_eq!(error.reason(), "409 Conflict: out of stock");

        Ok(())
    }

    #[test]
    fn acknowledgement_message_is_read_when_present() {
        let response = MessageResponse::from_body(r#"{"message":"Sale created"}"#);

        assert_eq!(response.message.as_deref(), Some("Sale created"));
        assert_eq!(MessageResponse::from_body(""), MessageResponse::default());
    }

    #[test]
    fn message_response_allows_empty_body_object() -> TestResult {
        let response: MessageResponse = serde_json::from_str("{}")?;

        assert_eq!(response, MessageResponse::default());

        Ok(())
    }
}

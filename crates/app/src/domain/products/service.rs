//! Products service.

use async_trait::async_trait;
use mockall::automock;
use reptitrack::products::{Product, ProductId, ProductRecord};
use rusty_money::iso::Currency;
use tracing::debug;

use crate::{api::ApiClient, domain::products::errors::ProductsServiceError};

/// Catalog backed by the `Products` endpoints.
#[derive(Debug, Clone)]
pub struct HttpProductsService {
    api: ApiClient,
    currency: &'static Currency,
}

impl HttpProductsService {
    #[must_use]
    pub fn new(api: ApiClient, currency: &'static Currency) -> Self {
        Self { api, currency }
    }
}

#[async_trait]
impl ProductsService for HttpProductsService {
    async fn list_products(&self) -> Result<Vec<Product>, ProductsServiceError> {
        let records: Vec<ProductRecord> = self.api.get_json("Products").await?;

        debug!(count = records.len(), "fetched products");

        records
            .into_iter()
            .map(|record| {
                record
                    .into_product(self.currency)
                    .map_err(ProductsServiceError::from)
            })
            .collect()
    }

    async fn get_product(&self, product: ProductId) -> Result<Product, ProductsServiceError> {
        let record: ProductRecord = self.api.get_json(&format!("Products/{product}")).await?;

        Ok(record.into_product(self.currency)?)
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves all products.
    async fn list_products(&self) -> Result<Vec<Product>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductId) -> Result<Product, ProductsServiceError>;
}

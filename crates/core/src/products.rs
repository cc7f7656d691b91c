//! Products

use std::fmt::{Display, Formatter, Result as FmtResult};

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pricing::minor_units_from_decimal;

/// Errors raised while turning backend product data into catalog products.
#[derive(Debug, Error, PartialEq)]
pub enum ProductError {
    /// The sale price is negative or cannot be represented in minor units (product id, price).
    #[error("product {0} has an invalid sale price: {1}")]
    InvalidPrice(ProductId, Decimal),
}

/// Product identifier, as assigned by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(i64);

impl ProductId {
    /// Wrap a raw backend identifier.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw backend identifier.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for ProductId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

/// Product lifecycle status code.
///
/// The backend owns the list of general statuses; only `1` (active) and `0`
/// (inactive) carry meaning on this side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductStatus(i32);

impl ProductStatus {
    /// Active product.
    pub const ACTIVE: Self = Self(1);

    /// Inactive product.
    pub const INACTIVE: Self = Self(0);

    /// Wrap a raw status code.
    pub const fn new(code: i32) -> Self {
        Self(code)
    }

    /// Raw status code.
    pub const fn code(self) -> i32 {
        self.0
    }

    /// Whether the status is the active status.
    pub const fn is_active(self) -> bool {
        self.0 == Self::ACTIVE.0
    }
}

/// Immutable catalog snapshot of a product.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Product identifier
    pub id: ProductId,

    /// Display name
    pub name: String,

    /// Optional long description
    pub description: Option<String>,

    /// Unit sale price
    pub price: Money<'static, Currency>,

    /// Stock count at fetch time
    pub stock: u32,

    /// Lifecycle status
    pub status: ProductStatus,
}

impl Product {
    /// Whether the product is active and has stock left.
    pub fn is_purchasable(&self) -> bool {
        self.status.is_active() && self.stock > 0
    }
}

/// Product as returned by the backend listing endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    /// Product identifier
    pub product_id: ProductId,

    /// Display name
    pub name: String,

    /// Optional long description
    #[serde(default)]
    pub description: Option<String>,

    /// Unit sale price as a decimal amount
    #[serde(with = "rust_decimal::serde::float")]
    pub sale_price: Decimal,

    /// Stock count
    #[serde(default)]
    pub stock: u32,

    /// Lifecycle status
    pub status: ProductStatus,
}

impl ProductRecord {
    /// Convert into a catalog product priced in `currency`.
    ///
    /// # Errors
    ///
    /// Returns [`ProductError::InvalidPrice`] when the sale price is negative
    /// or does not fit into minor units.
    pub fn into_product(self, currency: &'static Currency) -> Result<Product, ProductError> {
        let minor_units = minor_units_from_decimal(self.sale_price, currency)
            .filter(|units| *units >= 0)
            .ok_or(ProductError::InvalidPrice(self.product_id, self.sale_price))?;

        Ok(Product {
            id: self.product_id,
            name: self.name,
            description: self.description,
            price: Money::from_minor(minor_units, currency),
            stock: self.stock,
            status: self.status,
        })
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso;
    use testresult::TestResult;

    use super::*;

    fn record(price: Decimal) -> ProductRecord {
        ProductRecord {
            product_id: ProductId::new(7),
            name: "Terrarium Hygrometer".to_string(),
            description: None,
            sale_price: price,
            stock: 3,
            status: ProductStatus::ACTIVE,
        }
    }

    #[test]
    fn deserializes_backend_shape() -> TestResult {
        let json = r#"{
            "productId": 12,
            "name": "Heat Lamp Controller",
            "description": "Thermostat",
            "salePrice": 349.5,
            "stock": 8,
            "status": 1
        }"#;

        let record: ProductRecord = serde_json::from_str(json)?;

        assert_eq!(record.product_id, ProductId::new(12));
        assert_eq!(record.sale_price, Decimal::new(3495, 1));
        assert_eq!(record.stock, 8);
        assert!(record.status.is_active());

        Ok(())
    }

    #[test]
    fn into_product_converts_price_to_minor_units() -> TestResult {
        let product = record(Decimal::new(1999, 2)).into_product(iso::MXN)?;

        assert_eq!(product.price, Money::from_minor(1999, iso::MXN));
        assert_eq!(product.id, ProductId::new(7));

        Ok(())
    }

    #[test]
    fn into_product_rejects_negative_price() {
        let result = record(Decimal::new(-1, 0)).into_product(iso::MXN);

        assert_eq!(
            result,
            Err(ProductError::InvalidPrice(
                ProductId::new(7),
                Decimal::new(-1, 0)
            ))
        );
    }

    #[test]
    fn inactive_or_out_of_stock_is_not_purchasable() -> TestResult {
        let mut product = record(Decimal::new(10, 0)).into_product(iso::MXN)?;

        assert!(product.is_purchasable());

        product.stock = 0;
        assert!(!product.is_purchasable());

        product.stock = 1;
        product.status = ProductStatus::INACTIVE;
        assert!(!product.is_purchasable());

        Ok(())
    }
}

//! Sales

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{cart::LineItem, pricing::decimal_from_money, products::ProductId};

/// Request body recording the sale of one cart line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRequest {
    /// Buyer identifier (the `nameid` claim of the session token)
    pub client_id: String,

    /// Product sold
    pub product_id: ProductId,

    /// Units sold
    pub quantity: u32,

    /// Time of sale
    pub sale_date: Timestamp,

    /// Unit price times quantity for this line only
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,

    /// Copied from the product's status code at checkout
    pub status: i32,
}

impl SaleRequest {
    /// Build the sale request for `line`, sold to `client_id` at `at`.
    pub fn for_line(client_id: &str, line: &LineItem, at: Timestamp) -> Self {
        let product = line.product();

        Self {
            client_id: client_id.to_string(),
            product_id: product.id,
            quantity: line.quantity(),
            sale_date: at,
            total: decimal_from_money(&line.line_total()),
            status: product.status.code(),
        }
    }
}

/// Buyer summary embedded in sale listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleClient {
    /// User identifier
    pub id: String,

    /// Login name
    #[serde(default)]
    pub user_name: Option<String>,

    /// Email address
    #[serde(default)]
    pub email: Option<String>,

    /// Full name
    #[serde(default)]
    pub full_name: Option<String>,
}

/// Product summary embedded in sale listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleProduct {
    /// Product identifier
    pub product_id: ProductId,

    /// Display name
    pub name: String,

    /// Unit sale price
    #[serde(with = "rust_decimal::serde::float")]
    pub sale_price: Decimal,
}

/// Recorded sale, as returned by the sales listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    /// Sale identifier
    pub id: i64,

    /// Buyer identifier
    pub client_id: String,

    /// Product sold
    pub product_id: ProductId,

    /// Units sold
    pub quantity: u32,

    /// Time of sale, verbatim from the backend
    pub sale_date: String,

    /// Line total
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,

    /// Status code
    pub status: i32,

    /// Buyer details, when included
    #[serde(default)]
    pub client: Option<SaleClient>,

    /// Product details, when included
    #[serde(default)]
    pub product: Option<SaleProduct>,
}

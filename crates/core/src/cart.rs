//! Cart

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    pricing::{line_total, total_price},
    products::{Product, ProductId},
};

/// Errors related to cart mutations.
#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    /// Quantities must be at least one.
    #[error("quantity must be at least 1, got {0}")]
    InvalidQuantity(i64),

    /// The product currency differs from the cart currency (product, product currency, cart currency).
    #[error("product {0} is priced in {1}, but cart uses {2}")]
    CurrencyMismatch(ProductId, &'static str, &'static str),
}

/// Result of [`Cart::update_quantity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityUpdate {
    /// The line quantity was replaced.
    Updated,

    /// The requested quantity was below one, so the line was removed.
    Removed,

    /// No line exists for the product.
    NotInCart,
}

/// One product and its quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    product: Product,
    quantity: u32,
}

impl LineItem {
    /// Product snapshot used for display and pricing.
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// Quantity, always at least one.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price times quantity.
    pub fn line_total(&self) -> Money<'static, Currency> {
        line_total(&self.product.price, self.quantity)
    }
}

/// In-session cart: an ordered list of line items with at most one line per product.
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    lines: Vec<LineItem>,
    currency: &'static Currency,
}

impl Cart {
    /// Create an empty cart priced in `currency`.
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            lines: Vec::new(),
            currency,
        }
    }

    /// Add `quantity` units of `product`, merging into an existing line for the same product.
    ///
    /// Returns the resulting line quantity.
    ///
    /// # Errors
    ///
    /// - [`CartError::InvalidQuantity`]: `quantity` is below one.
    /// - [`CartError::CurrencyMismatch`]: the product is priced in another currency.
    pub fn add(&mut self, product: Product, quantity: u32) -> Result<u32, CartError> {
        if quantity < 1 {
            return Err(CartError::InvalidQuantity(i64::from(quantity)));
        }

        let product_currency = product.price.currency();

        if product_currency != self.currency {
            return Err(CartError::CurrencyMismatch(
                product.id,
                product_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product.id == product.id)
        {
            line.quantity = line.quantity.saturating_add(quantity);

            return Ok(line.quantity);
        }

        self.lines.push(LineItem { product, quantity });

        Ok(quantity)
    }

    /// Remove the line for `product_id`, returning it when present.
    pub fn remove(&mut self, product_id: ProductId) -> Option<LineItem> {
        let index = self.position(product_id)?;

        Some(self.lines.remove(index))
    }

    /// Replace the quantity of the line for `product_id`.
    ///
    /// A quantity below one removes the line.
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: i64) -> QuantityUpdate {
        let Some(index) = self.position(product_id) else {
            return QuantityUpdate::NotInCart;
        };

        if quantity < 1 {
            self.lines.remove(index);

            return QuantityUpdate::Removed;
        }

        if let Some(line) = self.lines.get_mut(index) {
            line.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        }

        QuantityUpdate::Updated
    }

    /// Take `quantity` units of the product out of the cart.
    ///
    /// The line is removed once nothing is left of it. Returns how the line
    /// changed.
    pub fn deduct(&mut self, product_id: ProductId, quantity: u32) -> QuantityUpdate {
        let Some(index) = self.position(product_id) else {
            return QuantityUpdate::NotInCart;
        };

        let Some(line) = self.lines.get_mut(index) else {
            return QuantityUpdate::NotInCart;
        };

        line.quantity = line.quantity.saturating_sub(quantity);

        if line.quantity == 0 {
            self.lines.remove(index);

            return QuantityUpdate::Removed;
        }

        QuantityUpdate::Updated
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Line for `product_id`, if any.
    pub fn line(&self, product_id: ProductId) -> Option<&LineItem> {
        self.lines.iter().find(|line| line.product.id == product_id)
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    /// Sum of all line quantities.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Sum of all line totals, recomputed on every call.
    pub fn total(&self) -> Money<'static, Currency> {
        total_price(self.currency, self.lines.iter().map(LineItem::line_total))
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Currency every line is priced in.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    fn position(&self, product_id: ProductId) -> Option<usize> {
        self.lines
            .iter()
            .position(|line| line.product.id == product_id)
    }
}

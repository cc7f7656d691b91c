//! ReptiTrack prelude

pub use crate::{
    cart::{Cart, CartError, LineItem, QuantityUpdate},
    checkout::{CheckoutError, CheckoutEvent, CheckoutState},
    payment::{CardDetails, PaymentErrors, PaymentField, PaymentFieldError, validate},
    pricing::{line_total, total_price},
    products::{Product, ProductError, ProductId, ProductRecord, ProductStatus},
    sales::{Sale, SaleRequest},
};

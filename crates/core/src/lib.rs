//! ReptiTrack
//!
//! Storefront domain for reptile-habitat monitoring products: catalog
//! snapshots, the in-session cart, payment form validation, sale payloads and
//! the checkout state machine.

pub mod cart;
pub mod checkout;
pub mod payment;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod sales;

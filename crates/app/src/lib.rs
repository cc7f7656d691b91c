//! ReptiTrack storefront client: backend services, session handling, the
//! observable cart store and the checkout flow.

pub mod api;
pub mod auth;
pub mod cart;
pub mod checkout;
pub mod context;
pub mod domain;

#[cfg(test)]
mod test;

//! Checkout

mod flow;

pub use flow::*;

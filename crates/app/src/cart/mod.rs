//! Observable cart

mod notice;
pub mod report;
pub mod store;

pub use report::{LineOutcome, LineResult, PurchaseError, PurchaseOutcome, PurchaseReport};
pub use store::*;

//! Sales

pub mod errors;
pub mod service;

pub use errors::SalesServiceError;
pub use service::*;

//! Authentication

mod claims;
mod errors;
mod models;
mod service;
mod session;

pub use claims::{UserDetail, token_expiry};
pub use errors::*;
pub use models::*;
pub use service::*;
pub use session::*;

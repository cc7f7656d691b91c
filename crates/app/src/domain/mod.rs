//! Backend-facing services

pub mod products;
pub mod sales;

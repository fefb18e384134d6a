//! Prices

pub mod data;
pub mod errors;
pub mod records;
mod repository;
pub mod service;

pub use errors::PricesServiceError;
pub use service::*;

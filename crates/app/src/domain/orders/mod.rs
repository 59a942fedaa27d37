//! Orders
//!
//! Placing orders, the status lifecycle and who may drive it.

pub mod data;
pub mod errors;
pub mod records;
pub(crate) mod repository;
pub mod sanitize;
pub mod service;
pub mod status;

pub use errors::OrdersServiceError;
pub use service::*;

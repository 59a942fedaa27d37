//! Orders service errors.

use sqlx::Error;
use thiserror::Error;

use crate::domain::orders::status::{InvalidTransition, OrderStatus};

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("No items provided")]
    EmptyOrder,

    #[error("Invalid total")]
    InvalidTotal,

    #[error("{0}")]
    InvalidInput(&'static str),

    #[error("Invalid status")]
    InvalidStatus,

    #[error("Cannot cancel an order with status '{current}'")]
    InvalidTransition { current: OrderStatus },

    /// Missing, or owned by somebody else. Callers cannot tell which.
    #[error("Order not found")]
    NotFound,

    #[error("estimated delivery is out of range")]
    Timestamp(#[source] jiff::Error),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        match error {
            Error::RowNotFound => Self::NotFound,
            other => Self::Sql(other),
        }
    }
}

impl From<InvalidTransition> for OrdersServiceError {
    fn from(error: InvalidTransition) -> Self {
        Self::InvalidTransition {
            current: error.current,
        }
    }
}

//! Order Errors

use tracing::error;

use bazaar_app::domain::orders::OrdersServiceError;

use crate::errors::ApiError;

/// Message used for unknown, foreign and unparsable order ids alike.
pub(crate) const ORDER_NOT_FOUND: &str = "Order not found";

pub(crate) fn into_api_error(error: OrdersServiceError) -> ApiError {
    match error {
        OrdersServiceError::EmptyOrder
        | OrdersServiceError::InvalidTotal
        | OrdersServiceError::InvalidStatus
        | OrdersServiceError::InvalidTransition { .. } => ApiError::bad_request(error.to_string()),
        OrdersServiceError::InvalidInput(message) => ApiError::bad_request(message),
        OrdersServiceError::NotFound => ApiError::not_found(ORDER_NOT_FOUND),
        OrdersServiceError::Timestamp(source) => {
            error!("failed to compute delivery estimate: {source}");

            ApiError::internal()
        }
        OrdersServiceError::Sql(source) => {
            error!("order storage failure: {source}");

            ApiError::internal()
        }
    }
}

#[cfg(test)]
mod tests {
    use bazaar_app::domain::orders::status::OrderStatus;
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn validation_failures_keep_their_messages() {
        for (error, message) in [
            (OrdersServiceError::EmptyOrder, "No items provided"),
            (OrdersServiceError::InvalidTotal, "Invalid total"),
            (OrdersServiceError::InvalidStatus, "Invalid status"),
            (
                OrdersServiceError::InvalidTransition {
                    current: OrderStatus::Completed,
                },
                "Cannot cancel an order with status 'Completed'",
            ),
        ] {
            let error = into_api_error(error);

            assert_eq!(error.status(), StatusCode::BAD_REQUEST);
            assert_eq!(error.message(), message);
        }
    }

    #[test]
    fn missing_orders_are_not_found() {
        let error = into_api_error(OrdersServiceError::NotFound);

        assert_eq!(error.status(), StatusCode::NOT_FOUND);
        assert_eq!(error.message(), ORDER_NOT_FOUND);
    }
}

//! Cancel Order Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use tracing::info;

use bazaar_app::domain::orders::status::OrderStatus;

use crate::{
    errors::ApiError,
    extensions::*,
    observability::{StatusChangeActor, record_order_status_change},
    orders::{errors::into_api_error, handlers::parse_order_id, models::OrderMessageResponse},
    state::State,
};

/// Cancel Order Handler
///
/// Cancels one of the caller's own orders while it is still `Pending` or `Processing`.
/// Orders belonging to other accounts are reported as not found.
#[endpoint(
    tags("orders"),
    summary = "Cancel Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order cancelled"),
        (status_code = StatusCode::BAD_REQUEST, description = "Order can no longer be cancelled"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<OrderMessageResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let account = depot.account_or_401()?.uuid;
    let order = parse_order_id(&id.into_inner())?;

    let cancelled = state
        .app
        .orders
        .cancel_order(account, order)
        .await
        .map_err(into_api_error)?;

    info!(%account, %order, "order cancelled by owner");

    record_order_status_change(OrderStatus::Cancelled, StatusChangeActor::Owner);

    Ok(Json(OrderMessageResponse {
        message: "Order cancelled".to_string(),
        order: cancelled.into(),
    }))
}

#[cfg(test)]
mod tests {
    use bazaar_app::domain::orders::{MockOrdersService, OrdersServiceError};
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::{
        errors::ErrorResponse,
        orders::models::tests::make_order,
        test_helpers::{TEST_USER_UUID, state_with_orders, user_service},
    };

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        user_service(
            state_with_orders(orders),
            Router::with_path("orders/{id}/cancel").put(handler),
        )
    }

    #[tokio::test]
    async fn test_cancel_order_success() -> TestResult {
        let order = make_order(TEST_USER_UUID, OrderStatus::Cancelled);
        let uuid = order.uuid;

        let mut orders = MockOrdersService::new();

        orders
            .expect_cancel_order()
            .once()
            .withf(move |account, id| *account == TEST_USER_UUID && *id == uuid)
            .return_once(move |_, _| Ok(order));

        let mut res = TestClient::put(format!("http://example.com/orders/{uuid}/cancel"))
            .send(&make_service(orders))
            .await;

        let body: OrderMessageResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.message, "Order cancelled");
        assert_eq!(body.order.status, "Cancelled");

        Ok(())
    }

    #[tokio::test]
    async fn test_cancel_terminal_order_returns_400() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_cancel_order().once().return_once(|_, _| {
            Err(OrdersServiceError::InvalidTransition {
                current: OrderStatus::Completed,
            })
        });

        let mut res = TestClient::put(format!(
            "http://example.com/orders/{}/cancel",
            uuid::Uuid::now_v7()
        ))
        .send(&make_service(orders))
        .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.message, "Cannot cancel an order with status 'Completed'");

        Ok(())
    }

    #[tokio::test]
    async fn test_cancel_foreign_order_returns_404() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_cancel_order()
            .once()
            .return_once(|_, _| Err(OrdersServiceError::NotFound));

        let mut res = TestClient::put(format!(
            "http://example.com/orders/{}/cancel",
            uuid::Uuid::now_v7()
        ))
        .send(&make_service(orders))
        .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
        assert_eq!(body.message, "Order not found");

        Ok(())
    }

    #[tokio::test]
    async fn test_cancel_malformed_id_returns_404_without_calling_service() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_cancel_order().never();

        let res = TestClient::put("http://example.com/orders/not-an-id/cancel")
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}

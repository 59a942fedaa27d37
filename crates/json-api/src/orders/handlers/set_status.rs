//! Set Order Status Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    errors::ApiError,
    extensions::*,
    observability::{StatusChangeActor, record_order_status_change},
    orders::{errors::into_api_error, handlers::parse_order_id, models::OrderMessageResponse},
    state::State,
};

/// Set Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SetStatusRequest {
    /// One of `Pending`, `Processing`, `Completed` or `Declined`
    #[serde(default)]
    pub status: String,
}

/// Set Order Status Handler
///
/// Admins may move any order to any of the four admin statuses regardless of its current one.
#[endpoint(
    tags("admin"),
    summary = "Set Order Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order status updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid status"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin access required"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<String>,
    json: JsonBody<SetStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderMessageResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let admin = depot.account_or_401()?.uuid;
    let order = parse_order_id(&id.into_inner())?;

    let updated = state
        .app
        .orders
        .set_order_status(order, &json.into_inner().status)
        .await
        .map_err(into_api_error)?;

    info!(%admin, %order, status = %updated.status, "order status set by admin");

    record_order_status_change(updated.status, StatusChangeActor::Admin);

    Ok(Json(OrderMessageResponse {
        message: "Order status updated".to_string(),
        order: updated.into(),
    }))
}

#[cfg(test)]
mod tests {
    use bazaar_app::domain::orders::{MockOrdersService, OrdersServiceError, status::OrderStatus};
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::{
        errors::ErrorResponse,
        orders::models::tests::make_order,
        test_helpers::{TEST_USER_UUID, admin_service, state_with_orders},
    };

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        admin_service(
            state_with_orders(orders),
            Router::with_path("admin/orders/{id}/status").put(handler),
        )
    }

    #[tokio::test]
    async fn test_set_status_success() -> TestResult {
        let order = make_order(TEST_USER_UUID, OrderStatus::Completed);
        let uuid = order.uuid;

        let mut orders = MockOrdersService::new();

        orders
            .expect_set_order_status()
            .once()
            .withf(move |id, status| *id == uuid && status == "Completed")
            .return_once(move |_, _| Ok(order));

        let mut res = TestClient::put(format!("http://example.com/admin/orders/{uuid}/status"))
            .json(&json!({ "status": "Completed" }))
            .send(&make_service(orders))
            .await;

        let body: OrderMessageResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.message, "Order status updated");
        assert_eq!(body.order.status, "Completed");

        Ok(())
    }

    #[tokio::test]
    async fn test_set_unknown_status_returns_400() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_set_order_status()
            .once()
            .withf(|_, status| status == "Cancelled")
            .return_once(|_, _| Err(OrdersServiceError::InvalidStatus));

        let mut res = TestClient::put(format!(
            "http://example.com/admin/orders/{}/status",
            uuid::Uuid::now_v7()
        ))
        .json(&json!({ "status": "Cancelled" }))
        .send(&make_service(orders))
        .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.message, "Invalid status");

        Ok(())
    }

    #[tokio::test]
    async fn test_set_status_for_unknown_order_returns_404() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_set_order_status()
            .once()
            .return_once(|_, _| Err(OrdersServiceError::NotFound));

        let res = TestClient::put(format!(
            "http://example.com/admin/orders/{}/status",
            uuid::Uuid::now_v7()
        ))
        .json(&json!({ "status": "Declined" }))
        .send(&make_service(orders))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}

//! Order Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    errors::ApiError,
    extensions::*,
    orders::{errors::into_api_error, models::OrdersResponse},
    state::State,
};

/// Order Index Handler
///
/// Returns the caller's own orders, newest first.
#[endpoint(
    tags("orders"),
    summary = "List Orders",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<OrdersResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let account = depot.account_or_401()?.uuid;

    let orders = state
        .app
        .orders
        .list_orders(account)
        .await
        .map_err(into_api_error)?;

    Ok(Json(OrdersResponse {
        orders: orders.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use bazaar_app::domain::orders::{MockOrdersService, status::OrderStatus};
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::{
        orders::models::tests::make_order,
        test_helpers::{TEST_USER_UUID, state_with_orders, user_service},
    };

    use super::*;

    #[tokio::test]
    async fn test_list_orders_returns_callers_orders_in_service_order() -> TestResult {
        let newer = make_order(TEST_USER_UUID, OrderStatus::Pending);
        let older = make_order(TEST_USER_UUID, OrderStatus::Completed);
        let expected = vec![newer.uuid.into_uuid(), older.uuid.into_uuid()];

        let mut orders = MockOrdersService::new();

        orders
            .expect_list_orders()
            .once()
            .withf(|account| *account == TEST_USER_UUID)
            .return_once(move |_| Ok(vec![newer, older]));

        let mut res = TestClient::get("http://example.com/orders")
            .send(&user_service(
                state_with_orders(orders),
                Router::with_path("orders").get(handler),
            ))
            .await;

        let body: OrdersResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(
            body.orders.iter().map(|order| order.uuid).collect::<Vec<_>>(),
            expected
        );

        Ok(())
    }
}

//! Admin Order Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    errors::ApiError,
    extensions::*,
    orders::{errors::into_api_error, models::AdminOrderResponse},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AdminOrdersResponse {
    /// Every order, newest first
    pub orders: Vec<AdminOrderResponse>,
}

/// Admin Order Index Handler
///
/// Returns every order with the name and email of the account that placed it.
#[endpoint(
    tags("admin"),
    summary = "List All Orders",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "All orders"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin access required"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<AdminOrdersResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let orders = state
        .app
        .orders
        .list_all_orders()
        .await
        .map_err(into_api_error)?;

    Ok(Json(AdminOrdersResponse {
        orders: orders.into_iter().map(Into::into).collect(),
    }))
}

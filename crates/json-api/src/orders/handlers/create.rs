//! Place Order Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use bazaar_app::domain::orders::data::{NewOrder, RawPaymentDetails};

use crate::{
    errors::ApiError,
    extensions::*,
    observability::record_order_placed,
    orders::{
        errors::into_api_error,
        models::{OrderMessageResponse, ShippingAddressBody},
    },
    state::State,
};

/// Place Order Request
///
/// Items and the total are loosely typed: numeric strings are accepted and coerced.
/// Nested keys may be sent in camelCase.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PlaceOrderRequest {
    /// Line items: `name`, `price`, `quantity` (or `qty`) and `image`
    #[serde(default)]
    #[salvo(schema(value_type = Vec<Object>))]
    pub items: Vec<Value>,

    /// Must be numeric and greater than zero
    #[serde(default)]
    #[salvo(schema(value_type = Option<f64>))]
    pub total: Option<Value>,

    #[serde(default, alias = "shippingAddress")]
    pub shipping_address: Option<ShippingAddressBody>,

    /// One of `cod`, `card` or `upi`
    #[serde(default, alias = "paymentMethod")]
    pub payment_method: Option<String>,

    #[serde(default, alias = "paymentDetails")]
    pub payment_details: Option<PaymentDetailsRequest>,
}

/// Payment details as submitted. Only the last four digits of a card number are kept.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct PaymentDetailsRequest {
    #[serde(alias = "upiId")]
    pub upi_id: Option<String>,

    #[serde(alias = "cardName")]
    pub card_name: Option<String>,

    #[serde(alias = "cardNumber")]
    pub card_number: Option<String>,

    #[serde(alias = "cardExpiry")]
    pub card_expiry: Option<String>,
}

impl From<PaymentDetailsRequest> for RawPaymentDetails {
    fn from(request: PaymentDetailsRequest) -> Self {
        RawPaymentDetails {
            upi_id: request.upi_id,
            card_name: request.card_name,
            card_number: request.card_number,
            card_expiry: request.card_expiry,
        }
    }
}

impl From<PlaceOrderRequest> for NewOrder {
    fn from(request: PlaceOrderRequest) -> Self {
        NewOrder {
            items: request.items,
            total: request.total,
            shipping_address: request.shipping_address.map(Into::into),
            payment_method: request.payment_method,
            payment_details: request.payment_details.map(Into::into),
        }
    }
}

/// Place Order Handler
#[endpoint(
    tags("orders"),
    summary = "Place Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::BAD_REQUEST, description = "No items, invalid total or payment method"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Missing or invalid token"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<PlaceOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderMessageResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let account = depot.account_or_401()?.uuid;

    let order = state
        .app
        .orders
        .place_order(account, json.into_inner().into())
        .await
        .map_err(into_api_error)?;

    info!(%account, order = %order.uuid, total = %order.total, "order placed");

    record_order_placed();

    res.status_code(StatusCode::CREATED);

    Ok(Json(OrderMessageResponse {
        message: "Order placed successfully".to_string(),
        order: order.into(),
    }))
}

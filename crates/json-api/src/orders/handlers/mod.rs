//! Order Handlers

pub(crate) mod admin_index;
pub(crate) mod cancel;
pub(crate) mod create;
pub(crate) mod index;
pub(crate) mod set_status;

use bazaar_app::domain::orders::records::OrderUuid;

use crate::{errors::ApiError, orders::errors::ORDER_NOT_FOUND};

/// An id that cannot name an order is reported the same way as a missing order.
fn parse_order_id(raw: &str) -> Result<OrderUuid, ApiError> {
    raw.parse()
        .map_err(|_malformed| ApiError::not_found(ORDER_NOT_FOUND))
}

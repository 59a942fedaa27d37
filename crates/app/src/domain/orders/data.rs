//! Order Data

use serde_json::Value;

use crate::domain::orders::records::ShippingAddress;

/// An order as submitted by a client, before any validation.
///
/// Items and the total are kept as raw JSON values because clients send loosely typed data
/// (numeric strings, `qty` instead of `quantity`) that [`sanitize`](super::sanitize) coerces.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewOrder {
    pub items: Vec<Value>,
    pub total: Option<Value>,
    pub shipping_address: Option<ShippingAddress>,
    pub payment_method: Option<String>,
    pub payment_details: Option<RawPaymentDetails>,
}

/// Payment details as submitted. Which fields matter depends on the payment method.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawPaymentDetails {
    pub upi_id: Option<String>,
    pub card_name: Option<String>,
    pub card_number: Option<String>,
    pub card_expiry: Option<String>,
}

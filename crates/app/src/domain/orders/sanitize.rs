//! Order input sanitization.
//!
//! Turns a loosely typed [`NewOrder`] into values that are safe to store. Checks run in a
//! fixed order so the first failure reported is stable: items, then total, then payment.

use jiff::{SignedDuration, Timestamp};
use rust_decimal::{Decimal, prelude::ToPrimitive};
use serde_json::Value;
use tracing::warn;

use crate::domain::orders::{
    data::{NewOrder, RawPaymentDetails},
    errors::OrdersServiceError,
    records::{OrderItem, PaymentDetails, PaymentMethod, ShippingAddress},
};

/// How long after placement an order is expected to arrive.
pub const DELIVERY_ESTIMATE: SignedDuration = SignedDuration::from_hours(5 * 24);

/// An order that passed validation, ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct SanitizedOrder {
    pub items: Vec<OrderItem>,
    pub total: Decimal,
    pub shipping_address: ShippingAddress,
    pub payment_method: PaymentMethod,
    pub payment_details: Option<PaymentDetails>,
}

pub fn sanitize_order(order: NewOrder) -> Result<SanitizedOrder, OrdersServiceError> {
    let items: Vec<OrderItem> = order.items.iter().map(sanitize_item).collect();

    if items.is_empty() {
        return Err(OrdersServiceError::EmptyOrder);
    }

    let total = sanitize_total(order.total.as_ref())?;

    let item_sum = items.iter().try_fold(Decimal::ZERO, |sum, item| {
        item.line_total().and_then(|line| sum.checked_add(line))
    });

    match item_sum {
        Some(item_sum) if item_sum != total => {
            warn!(%total, %item_sum, "order total does not match its items");
        }
        Some(_) => {}
        None => warn!(%total, "order item sum is too large to compare with its total"),
    }

    let payment_method = order
        .payment_method
        .as_deref()
        .and_then(|method| method.parse::<PaymentMethod>().ok())
        .ok_or(OrdersServiceError::InvalidInput(
            "Payment method must be one of cod, card or upi",
        ))?;

    Ok(SanitizedOrder {
        items,
        total,
        shipping_address: order.shipping_address.unwrap_or_default(),
        payment_method,
        payment_details: sanitize_payment_details(payment_method, order.payment_details),
    })
}

/// Normalize one submitted line item. Never fails; unusable fields fall back to defaults.
#[must_use]
pub fn sanitize_item(raw: &Value) -> OrderItem {
    let name = match raw.get("name") {
        Some(Value::String(name)) => name.clone(),
        Some(Value::Number(number)) => number.to_string(),
        _ => String::new(),
    };

    let price = raw.get("price").and_then(coerce_number).unwrap_or_default();

    let quantity = [raw.get("quantity"), raw.get("qty")]
        .into_iter()
        .flatten()
        .find(|value| is_truthy(value))
        .and_then(coerce_number)
        .map(|quantity| quantity.trunc())
        .filter(|quantity| *quantity >= Decimal::ONE)
        .map_or(1, |quantity| quantity.to_u32().unwrap_or(u32::MAX));

    let image = match raw.get("image") {
        Some(Value::String(image)) => image.clone(),
        _ => String::new(),
    };

    OrderItem {
        name,
        price,
        quantity,
        image,
    }
}

/// The client-supplied total must be present, numeric and greater than zero.
pub fn sanitize_total(raw: Option<&Value>) -> Result<Decimal, OrdersServiceError> {
    raw.filter(|value| is_truthy(value))
        .and_then(coerce_number)
        .filter(|total| total.is_sign_positive() && !total.is_zero())
        .ok_or(OrdersServiceError::InvalidTotal)
}

/// Keep only the payment details relevant to `method`, dropping anything sensitive.
#[must_use]
pub fn sanitize_payment_details(
    method: PaymentMethod,
    raw: Option<RawPaymentDetails>,
) -> Option<PaymentDetails> {
    let raw = raw.unwrap_or_default();

    match method {
        PaymentMethod::Cod => None,
        PaymentMethod::Upi => {
            let upi_id = trimmed(raw.upi_id);

            (!upi_id.is_empty()).then_some(PaymentDetails::Upi { upi_id })
        }
        PaymentMethod::Card => {
            let digits: String = raw
                .card_number
                .unwrap_or_default()
                .chars()
                .filter(char::is_ascii_digit)
                .collect();

            let card_last4: String = digits
                .chars()
                .skip(digits.len().saturating_sub(4))
                .collect();

            (!card_last4.is_empty()).then(|| PaymentDetails::Card {
                card_name: trimmed(raw.card_name),
                card_last4,
                card_expiry: trimmed(raw.card_expiry),
            })
        }
    }
}

/// When an order placed at `created_at` is expected to arrive.
pub fn estimated_delivery(created_at: Timestamp) -> Result<Timestamp, OrdersServiceError> {
    created_at
        .checked_add(DELIVERY_ESTIMATE)
        .map_err(OrdersServiceError::Timestamp)
}

fn trimmed(value: Option<String>) -> String {
    value.map(|value| value.trim().to_string()).unwrap_or_default()
}

/// Numeric reading of a loosely typed value. Blank strings and `null` read as zero; anything
/// that is not a number or numeric string has no reading.
fn coerce_number(value: &Value) -> Option<Decimal> {
    match value {
        Value::Null => Some(Decimal::ZERO),
        Value::Number(number) => parse_decimal(&number.to_string()),
        Value::String(text) if text.trim().is_empty() => Some(Decimal::ZERO),
        Value::String(text) => parse_decimal(text.trim()),
        Value::Bool(_) | Value::Array(_) | Value::Object(_) => None,
    }
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    text.parse::<Decimal>()
        .ok()
        .or_else(|| Decimal::from_scientific(text).ok())
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => false,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Bool(true) | Value::Array(_) | Value::Object(_) => true,
    }
}

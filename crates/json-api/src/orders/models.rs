//! Order Models

use rust_decimal::Decimal;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Deserializer, Serialize, de::Error as _};
use serde_json::Value;
use uuid::Uuid;

use bazaar_app::domain::orders::records::{
    AdminOrderRecord, OrderItem, OrderOwner, OrderRecord, PaymentDetails, ShippingAddress,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    pub name: String,

    /// Unit price
    #[serde(with = "rust_decimal::serde::float")]
    #[salvo(schema(value_type = f64))]
    pub price: Decimal,

    /// Always at least 1
    pub quantity: u32,

    pub image: String,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(item: OrderItem) -> Self {
        OrderItemResponse {
            name: item.name,
            price: item.price,
            quantity: item.quantity,
            image: item.image,
        }
    }
}

/// Delivery details. Used for both requests and responses; omitted fields are empty and
/// numeric values such as a pincode are read as their decimal text.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct ShippingAddressBody {
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub email: String,
    #[serde(deserialize_with = "lenient_string")]
    pub phone: String,
    #[serde(deserialize_with = "lenient_string")]
    pub address: String,
    #[serde(deserialize_with = "lenient_string")]
    pub state: String,
    #[serde(deserialize_with = "lenient_string")]
    pub pincode: String,
    #[serde(deserialize_with = "lenient_string")]
    pub landmark: String,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(text),
        Value::Number(number) => Ok(number.to_string()),
        Value::Bool(flag) => Ok(flag.to_string()),
        Value::Null => Ok(String::new()),
        Value::Array(_) | Value::Object(_) => Err(D::Error::custom("expected a string or number")),
    }
}

impl From<ShippingAddress> for ShippingAddressBody {
    fn from(address: ShippingAddress) -> Self {
        ShippingAddressBody {
            name: address.name,
            email: address.email,
            phone: address.phone,
            address: address.address,
            state: address.state,
            pincode: address.pincode,
            landmark: address.landmark,
        }
    }
}

impl From<ShippingAddressBody> for ShippingAddress {
    fn from(body: ShippingAddressBody) -> Self {
        ShippingAddress {
            name: body.name,
            email: body.email,
            phone: body.phone,
            address: body.address,
            state: body.state,
            pincode: body.pincode,
            landmark: body.landmark,
        }
    }
}

/// Stored payment details. A full card number is never returned because it is never kept.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct PaymentDetailsResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upi_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_last4: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_expiry: Option<String>,
}

impl From<PaymentDetails> for PaymentDetailsResponse {
    fn from(details: PaymentDetails) -> Self {
        match details {
            PaymentDetails::Upi { upi_id } => PaymentDetailsResponse {
                upi_id: Some(upi_id),
                ..PaymentDetailsResponse::default()
            },
            PaymentDetails::Card {
                card_name,
                card_last4,
                card_expiry,
            } => PaymentDetailsResponse {
                card_name: Some(card_name),
                card_last4: Some(card_last4),
                card_expiry: Some(card_expiry),
                ..PaymentDetailsResponse::default()
            },
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    /// The unique identifier of the order
    pub uuid: Uuid,

    /// The account that placed the order
    pub account_uuid: Uuid,

    pub items: Vec<OrderItemResponse>,

    /// Order total as submitted by the customer
    #[serde(with = "rust_decimal::serde::float")]
    #[salvo(schema(value_type = f64))]
    pub total: Decimal,

    /// One of `Pending`, `Processing`, `Completed`, `Declined` or `Cancelled`
    pub status: String,

    pub shipping_address: ShippingAddressBody,

    /// One of `cod`, `card` or `upi`
    pub payment_method: String,

    pub payment_details: Option<PaymentDetailsResponse>,

    /// Five days after the order was placed
    pub estimated_delivery: String,

    pub created_at: String,

    pub updated_at: String,
}

impl From<OrderRecord> for OrderResponse {
    fn from(order: OrderRecord) -> Self {
        OrderResponse {
            uuid: order.uuid.into(),
            account_uuid: order.account_uuid.into(),
            items: order.items.into_iter().map(Into::into).collect(),
            total: order.total,
            status: order.status.to_string(),
            shipping_address: order.shipping_address.into(),
            payment_method: order.payment_method.as_str().to_string(),
            payment_details: order.payment_details.map(Into::into),
            estimated_delivery: order.estimated_delivery.to_string(),
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OwnerResponse {
    pub uuid: Uuid,
    pub name: String,
    pub email: String,
}

impl From<OrderOwner> for OwnerResponse {
    fn from(owner: OrderOwner) -> Self {
        OwnerResponse {
            uuid: owner.uuid.into(),
            name: owner.name,
            email: owner.email,
        }
    }
}

/// An order with the account that placed it.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AdminOrderResponse {
    #[serde(flatten)]
    pub order: OrderResponse,

    pub owner: OwnerResponse,
}

impl From<AdminOrderRecord> for AdminOrderResponse {
    fn from(record: AdminOrderRecord) -> Self {
        AdminOrderResponse {
            order: record.order.into(),
            owner: record.owner.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrdersResponse {
    /// Newest first
    pub orders: Vec<OrderResponse>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderMessageResponse {
    pub message: String,
    pub order: OrderResponse,
}

#[cfg(test)]
pub(crate) mod tests {
    use jiff::Timestamp;
    use serde_json::json;

    use bazaar_app::domain::{
        accounts::records::AccountUuid,
        orders::{
            records::{OrderUuid, PaymentMethod},
            status::OrderStatus,
        },
    };

    use testresult::TestResult;

    use super::*;

    #[test]
    fn shipping_fields_accept_numbers() -> TestResult {
        let body: ShippingAddressBody = serde_json::from_value(json!({
            "name": "Alice",
            "phone": 9876543210_u64,
            "pincode": 560001,
            "landmark": null,
        }))?;

        assert_eq!(body.phone, "9876543210");
        assert_eq!(body.pincode, "560001");
        assert_eq!(body.landmark, "");
        assert_eq!(body.address, "");

        Ok(())
    }

    #[test]
    fn shipping_fields_reject_nested_values() {
        let body = serde_json::from_value::<ShippingAddressBody>(json!({ "pincode": [1, 2] }));

        assert!(body.is_err(), "a list is not a pincode");
    }

    pub(crate) fn make_order(account: AccountUuid, status: OrderStatus) -> OrderRecord {
        OrderRecord {
            uuid: OrderUuid::new(),
            account_uuid: account,
            items: vec![OrderItem {
                name: "Shoe".to_string(),
                price: Decimal::new(100, 0),
                quantity: 2,
                image: String::new(),
            }],
            total: Decimal::new(200, 0),
            status,
            shipping_address: ShippingAddress::default(),
            payment_method: PaymentMethod::Card,
            payment_details: Some(PaymentDetails::Card {
                card_name: "Alice".to_string(),
                card_last4: "1234".to_string(),
                card_expiry: "12/30".to_string(),
            }),
            estimated_delivery: Timestamp::UNIX_EPOCH,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn money_renders_as_json_numbers() -> TestResult {
        let order = make_order(AccountUuid::new(), OrderStatus::Pending);
        let rendered = serde_json::to_value(OrderResponse::from(order))?;

        assert_eq!(rendered.pointer("/total"), Some(&json!(200.0)));
        assert_eq!(rendered.pointer("/items/0/price"), Some(&json!(100.0)));
        assert_eq!(rendered.pointer("/status"), Some(&json!("Pending")));
        assert_eq!(
            rendered.pointer("/payment_details"),
            Some(&json!({ "card_name": "Alice", "card_last4": "1234", "card_expiry": "12/30" }))
        );

        Ok(())
    }
}

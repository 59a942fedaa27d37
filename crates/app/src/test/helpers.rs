//! Test Helpers

use serde_json::{Value, json};

use crate::{
    domain::{
        accounts::{
            AccountsService, AccountsServiceError,
            data::NewAccount,
            records::{AccountRecord, AccountUuid},
        },
        orders::{
            OrdersService, OrdersServiceError,
            data::{NewOrder, RawPaymentDetails},
            records::OrderRecord,
        },
    },
    test::TestContext,
};

pub(crate) async fn register(
    ctx: &TestContext,
    name: &str,
    email: &str,
    password: &str,
) -> Result<AccountRecord, AccountsServiceError> {
    ctx.accounts
        .register(NewAccount {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        })
        .await
}

/// A cash-on-delivery order with the given items and total.
pub(crate) fn cod_order(items: Vec<Value>, total: Value) -> NewOrder {
    NewOrder {
        items,
        total: Some(total),
        payment_method: Some("cod".to_string()),
        ..NewOrder::default()
    }
}

pub(crate) async fn place_shoe_order(
    ctx: &TestContext,
    account: AccountUuid,
) -> Result<OrderRecord, OrdersServiceError> {
    ctx.orders
        .place_order(
            account,
            cod_order(
                vec![json!({ "name": "Shoe", "price": 100, "quantity": 2 })],
                json!(200),
            ),
        )
        .await
}

pub(crate) fn card_payment(number: &str) -> RawPaymentDetails {
    RawPaymentDetails {
        card_name: Some("Alice".to_string()),
        card_number: Some(number.to_string()),
        card_expiry: Some("12/30".to_string()),
        upi_id: None,
    }
}

//! Orders Repository

use std::error::Error;

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, types::Json};

use crate::domain::{
    accounts::records::AccountUuid,
    orders::{
        records::{
            AdminOrderRecord, OrderItem, OrderOwner, OrderRecord, OrderUuid, PaymentDetails,
            PaymentMethod, ShippingAddress,
        },
        status::OrderStatus,
    },
};

const INSERT_ORDER_SQL: &str = include_str!("sql/insert_order.sql");
const LIST_ACCOUNT_ORDERS_SQL: &str = include_str!("sql/list_account_orders.sql");
const LOCK_ACCOUNT_ORDER_SQL: &str = include_str!("sql/lock_account_order.sql");
const UPDATE_ORDER_STATUS_SQL: &str = include_str!("sql/update_order_status.sql");
const LIST_ALL_ORDERS_SQL: &str = include_str!("sql/list_all_orders.sql");

/// Columns for a new `orders` row. Status always starts as `Pending`.
#[derive(Debug)]
pub(crate) struct NewOrderRow<'a> {
    pub(crate) uuid: OrderUuid,
    pub(crate) account: AccountUuid,
    pub(crate) items: &'a [OrderItem],
    pub(crate) total: Decimal,
    pub(crate) shipping_address: &'a ShippingAddress,
    pub(crate) payment_method: PaymentMethod,
    pub(crate) payment_details: Option<&'a PaymentDetails>,
    pub(crate) estimated_delivery: Timestamp,
    pub(crate) created_at: Timestamp,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn insert_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: &NewOrderRow<'_>,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(INSERT_ORDER_SQL)
            .bind(order.uuid.into_uuid())
            .bind(order.account.into_uuid())
            .bind(Json(order.items))
            .bind(order.total)
            .bind(Json(order.shipping_address))
            .bind(order.payment_method.as_str())
            .bind(order.payment_details.map(Json))
            .bind(SqlxTimestamp::from(order.estimated_delivery))
            .bind(SqlxTimestamp::from(order.created_at))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_account_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        account: AccountUuid,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LIST_ACCOUNT_ORDERS_SQL)
            .bind(account.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Fetch an order owned by `account` and hold a row lock on it until `tx` ends.
    pub(crate) async fn lock_account_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        account: AccountUuid,
    ) -> Result<Option<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LOCK_ACCOUNT_ORDER_SQL)
            .bind(order.into_uuid())
            .bind(account.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn update_order_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<Option<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(UPDATE_ORDER_STATUS_SQL)
            .bind(order.into_uuid())
            .bind(status.as_str())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn list_all_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<AdminOrderRecord>, sqlx::Error> {
        query_as::<Postgres, AdminOrderRecord>(LIST_ALL_ORDERS_SQL)
            .fetch_all(&mut **tx)
            .await
    }
}

fn decode_error(column: &str, source: impl Error + Send + Sync + 'static) -> sqlx::Error {
    sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(source),
    }
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status = row
            .try_get::<String, _>("status")?
            .parse::<OrderStatus>()
            .map_err(|e| decode_error("status", e))?;

        let payment_method = row
            .try_get::<String, _>("payment_method")?
            .parse::<PaymentMethod>()
            .map_err(|e| decode_error("payment_method", e))?;

        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            account_uuid: AccountUuid::from_uuid(row.try_get("account_uuid")?),
            items: row.try_get::<Json<Vec<OrderItem>>, _>("items")?.0,
            total: row.try_get("total")?,
            status,
            shipping_address: row
                .try_get::<Json<ShippingAddress>, _>("shipping_address")?
                .0,
            payment_method,
            payment_details: row
                .try_get::<Option<Json<PaymentDetails>>, _>("payment_details")?
                .map(|details| details.0),
            estimated_delivery: row
                .try_get::<SqlxTimestamp, _>("estimated_delivery")?
                .to_jiff(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for AdminOrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let order = OrderRecord::from_row(row)?;

        Ok(Self {
            owner: OrderOwner {
                uuid: order.account_uuid,
                name: row.try_get("owner_name")?,
                email: row.try_get("owner_email")?,
            },
            order,
        })
    }
}

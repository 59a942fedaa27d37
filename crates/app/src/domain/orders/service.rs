//! Orders service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        accounts::records::AccountUuid,
        orders::{
            data::NewOrder,
            errors::OrdersServiceError,
            records::{AdminOrderRecord, OrderRecord, OrderUuid},
            repository::{NewOrderRow, PgOrdersRepository},
            sanitize::{estimated_delivery, sanitize_order},
            status::{AdminStatus, OrderTransition},
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    repository: PgOrdersRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgOrdersRepository::new(),
        }
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn place_order(
        &self,
        account: AccountUuid,
        order: NewOrder,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let order = sanitize_order(order)?;

        let created_at = Timestamp::now();

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .insert_order(
                &mut tx,
                &NewOrderRow {
                    uuid: OrderUuid::new(),
                    account,
                    items: &order.items,
                    total: order.total,
                    shipping_address: &order.shipping_address,
                    payment_method: order.payment_method,
                    payment_details: order.payment_details.as_ref(),
                    estimated_delivery: estimated_delivery(created_at)?,
                    created_at,
                },
            )
            .await?;

        tx.commit().await?;

        info!(
            order_uuid = %created.uuid,
            account_uuid = %account,
            total = %created.total,
            items = created.items.len(),
            payment_method = %created.payment_method,
            "placed order"
        );

        Ok(created)
    }

    async fn list_orders(
        &self,
        account: AccountUuid,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let orders = self.repository.list_account_orders(&mut tx, account).await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn cancel_order(
        &self,
        account: AccountUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self
            .repository
            .lock_account_order(&mut tx, order, account)
            .await?
            .ok_or(OrdersServiceError::NotFound)?;

        let next = current.status.apply(OrderTransition::Cancel)?;

        let cancelled = self
            .repository
            .update_order_status(&mut tx, order, next)
            .await?
            .ok_or(OrdersServiceError::NotFound)?;

        tx.commit().await?;

        info!(
            order_uuid = %order,
            account_uuid = %account,
            from = %current.status,
            "cancelled order"
        );

        Ok(cancelled)
    }

    async fn set_order_status(
        &self,
        order: OrderUuid,
        status: &str,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let target = status
            .parse::<AdminStatus>()
            .map_err(|_unknown| OrdersServiceError::InvalidStatus)?;

        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_order_status(&mut tx, order, target.into())
            .await?
            .ok_or(OrdersServiceError::NotFound)?;

        tx.commit().await?;

        info!(order_uuid = %order, status = %updated.status, "set order status");

        Ok(updated)
    }

    async fn list_all_orders(&self) -> Result<Vec<AdminOrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let orders = self.repository.list_all_orders(&mut tx).await?;

        tx.commit().await?;

        Ok(orders)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Validate, sanitize and store a new order for `account`. Orders start as `Pending`.
    async fn place_order(
        &self,
        account: AccountUuid,
        order: NewOrder,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Orders placed by `account`, newest first.
    async fn list_orders(&self, account: AccountUuid)
    -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// Cancel an open order on behalf of its owner.
    async fn cancel_order(
        &self,
        account: AccountUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Assign a status by name. Callers must have passed the admin gate.
    async fn set_order_status(
        &self,
        order: OrderUuid,
        status: &str,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Every order with its owner, newest first. Callers must have passed the admin gate.
    async fn list_all_orders(&self) -> Result<Vec<AdminOrderRecord>, OrdersServiceError>;
}

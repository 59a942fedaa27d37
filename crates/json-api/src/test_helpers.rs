//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use bazaar_app::{
    auth::MockAuthService,
    context::AppContext,
    domain::{
        accounts::{
            MockAccountsService,
            records::{AccountRecord, AccountUuid, Role},
        },
        orders::MockOrdersService,
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER_UUID: AccountUuid = AccountUuid::from_uuid(Uuid::from_u128(1));
pub(crate) const TEST_ADMIN_UUID: AccountUuid = AccountUuid::from_uuid(Uuid::from_u128(2));

pub(crate) fn make_user() -> AccountRecord {
    AccountRecord {
        uuid: TEST_USER_UUID,
        name: "Alice".to_string(),
        email: "alice@x.com".to_string(),
        role: Role::User,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_admin() -> AccountRecord {
    AccountRecord {
        uuid: TEST_ADMIN_UUID,
        name: "Root".to_string(),
        email: "root@x.com".to_string(),
        role: Role::Admin,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

#[salvo::handler]
pub(crate) async fn inject_user(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_account(make_user());
    ctrl.call_next(req, depot, res).await;
}

#[salvo::handler]
pub(crate) async fn inject_admin(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_account(make_admin());
    ctrl.call_next(req, depot, res).await;
}

pub(crate) fn strict_accounts_mock() -> MockAccountsService {
    let mut accounts = MockAccountsService::new();

    accounts.expect_register().never();
    accounts.expect_find_by_email().never();
    accounts.expect_find_by_id().never();
    accounts.expect_update_profile().never();
    accounts.expect_list_accounts().never();

    accounts
}

pub(crate) fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_login().never();
    auth.expect_authenticate_bearer().never();

    auth
}

pub(crate) fn strict_orders_mock() -> MockOrdersService {
    let mut orders = MockOrdersService::new();

    orders.expect_place_order().never();
    orders.expect_list_orders().never();
    orders.expect_cancel_order().never();
    orders.expect_set_order_status().never();
    orders.expect_list_all_orders().never();

    orders
}

fn make_state(
    accounts: MockAccountsService,
    auth: MockAuthService,
    orders: MockOrdersService,
) -> Arc<State> {
    State::from_app_context(AppContext {
        accounts: Arc::new(accounts),
        auth: Arc::new(auth),
        orders: Arc::new(orders),
    })
}

pub(crate) fn state_with_accounts(accounts: MockAccountsService) -> Arc<State> {
    make_state(accounts, strict_auth_mock(), strict_orders_mock())
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    make_state(strict_accounts_mock(), auth, strict_orders_mock())
}

pub(crate) fn state_with_orders(orders: MockOrdersService) -> Arc<State> {
    make_state(strict_accounts_mock(), strict_auth_mock(), orders)
}

/// A service with no acting account, as seen by public routes.
pub(crate) fn public_service(state: Arc<State>, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(state)).push(route))
}

/// A service acting as the regular test user.
pub(crate) fn user_service(state: Arc<State>, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state))
            .hoop(inject_user)
            .push(route),
    )
}

/// A service acting as the test admin.
pub(crate) fn admin_service(state: Arc<State>, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state))
            .hoop(inject_admin)
            .push(route),
    )
}

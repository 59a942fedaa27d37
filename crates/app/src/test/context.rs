//! Test context for service-level integration tests.

use crate::{
    auth::{PgAuthService, TokenSigner, TokenSigningKey},
    database::Db,
    domain::{accounts::PgAccountsService, orders::PgOrdersService},
};

use super::db::TestDb;

const TEST_TOKEN_SECRET: &str = "service-test-signing-secret-0123456789abcdef";

pub(crate) struct TestContext {
    pub(crate) db: TestDb,
    pub(crate) signer: TokenSigner,
    pub(crate) accounts: PgAccountsService,
    pub(crate) auth: PgAuthService,
    pub(crate) orders: PgOrdersService,
}

impl TestContext {
    pub(crate) async fn new() -> Self {
        let test_db = TestDb::new().await;
        let db = Db::new(test_db.pool().clone());

        let signer = TokenSigner::new(
            TokenSigningKey::from_secret(TEST_TOKEN_SECRET).expect("test secret is long enough"),
        );

        Self {
            accounts: PgAccountsService::new(db.clone()),
            auth: PgAuthService::new(db.clone(), signer.clone()),
            orders: PgOrdersService::new(db),
            signer,
            db: test_db,
        }
    }
}

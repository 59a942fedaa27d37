//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::{AuthService, PgAuthService, TokenSigner, TokenSigningKey},
    database::{self, Db},
    domain::{
        accounts::{AccountsService, PgAccountsService},
        orders::{OrdersService, PgOrdersService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply database migrations")]
    Migrate(#[source] sqlx::migrate::MigrateError),
}

#[derive(Clone)]
pub struct AppContext {
    pub accounts: Arc<dyn AccountsService>,
    pub auth: Arc<dyn AuthService>,
    pub orders: Arc<dyn OrdersService>,
}

impl AppContext {
    /// Build application context from a database URL, optionally applying pending migrations.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection or migrating fails.
    pub async fn from_database_url(
        url: &str,
        run_migrations: bool,
        signing_key: TokenSigningKey,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        if run_migrations {
            database::migrate(&pool)
                .await
                .map_err(AppInitError::Migrate)?;
        }

        Ok(Self::from_db(Db::new(pool), TokenSigner::new(signing_key)))
    }

    #[must_use]
    pub fn from_db(db: Db, signer: TokenSigner) -> Self {
        Self {
            accounts: Arc::new(PgAccountsService::new(db.clone())),
            auth: Arc::new(PgAuthService::new(db.clone(), signer)),
            orders: Arc::new(PgOrdersService::new(db)),
        }
    }
}

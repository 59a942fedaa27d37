//! Depot helper extensions.

use std::any::Any;

use bazaar_app::domain::accounts::records::AccountRecord;
use salvo::prelude::Depot;

use crate::errors::ApiError;

/// Helpers for reading request-scoped values with HTTP error mapping.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, ApiError>;

    /// Record the account the request is acting as.
    fn insert_account(&mut self, account: AccountRecord);

    fn account_or_401(&self) -> Result<&AccountRecord, ApiError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, ApiError> {
        self.obtain::<T>()
            .map_err(|_ignored| ApiError::internal())
    }

    fn insert_account(&mut self, account: AccountRecord) {
        self.inject(account);
    }

    fn account_or_401(&self) -> Result<&AccountRecord, ApiError> {
        self.obtain::<AccountRecord>()
            .map_err(|_ignored| ApiError::unauthenticated())
    }
}

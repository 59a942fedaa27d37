//! Accounts Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};
use uuid::Uuid;

use crate::domain::accounts::{
    data::NormalizedEmail,
    records::{AccountCredentials, AccountRecord, AccountUuid, Role},
};

const CREATE_ACCOUNT_SQL: &str = include_str!("sql/create_account.sql");
const CLAIM_ADMIN_SQL: &str = include_str!("sql/claim_admin.sql");
const SET_ROLE_SQL: &str = include_str!("sql/set_role.sql");
const FIND_ACCOUNT_SQL: &str = include_str!("sql/find_account.sql");
const FIND_ACCOUNT_BY_EMAIL_SQL: &str = include_str!("sql/find_account_by_email.sql");
const FIND_CREDENTIALS_BY_EMAIL_SQL: &str = include_str!("sql/find_credentials_by_email.sql");
const UPDATE_PROFILE_SQL: &str = include_str!("sql/update_profile.sql");
const LIST_ACCOUNTS_SQL: &str = include_str!("sql/list_accounts.sql");

/// Columns for a new `accounts` row. The role always starts as `user`.
#[derive(Debug)]
pub(crate) struct NewAccountRow<'a> {
    pub(crate) uuid: AccountUuid,
    pub(crate) name: &'a str,
    pub(crate) email: &'a NormalizedEmail,
    pub(crate) password_hash: &'a str,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgAccountsRepository;

impl PgAccountsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_account(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        account: &NewAccountRow<'_>,
    ) -> Result<AccountRecord, sqlx::Error> {
        query_as::<Postgres, AccountRecord>(CREATE_ACCOUNT_SQL)
            .bind(account.uuid.into_uuid())
            .bind(account.name)
            .bind(account.email.as_str())
            .bind(account.password_hash)
            .fetch_one(&mut **tx)
            .await
    }

    /// Record `account` as the holder of the admin slot. Returns `false` when the slot
    /// was already taken; the insert is a no-op in that case.
    pub(crate) async fn claim_admin(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        account: AccountUuid,
    ) -> Result<bool, sqlx::Error> {
        let claimed: Option<Uuid> = query_scalar(CLAIM_ADMIN_SQL)
            .bind(account.into_uuid())
            .fetch_optional(&mut **tx)
            .await?;

        Ok(claimed.is_some())
    }

    pub(crate) async fn set_role(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        account: AccountUuid,
        role: Role,
    ) -> Result<AccountRecord, sqlx::Error> {
        query_as::<Postgres, AccountRecord>(SET_ROLE_SQL)
            .bind(account.into_uuid())
            .bind(role.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_account(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        account: AccountUuid,
    ) -> Result<Option<AccountRecord>, sqlx::Error> {
        query_as::<Postgres, AccountRecord>(FIND_ACCOUNT_SQL)
            .bind(account.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn find_account_by_email(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        email: &NormalizedEmail,
    ) -> Result<Option<AccountRecord>, sqlx::Error> {
        query_as::<Postgres, AccountRecord>(FIND_ACCOUNT_BY_EMAIL_SQL)
            .bind(email.as_str())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn find_credentials_by_email(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        email: &NormalizedEmail,
    ) -> Result<Option<AccountCredentials>, sqlx::Error> {
        query_as::<Postgres, AccountCredentials>(FIND_CREDENTIALS_BY_EMAIL_SQL)
            .bind(email.as_str())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn update_profile(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        account: AccountUuid,
        name: Option<&str>,
        password_hash: Option<&str>,
    ) -> Result<Option<AccountRecord>, sqlx::Error> {
        query_as::<Postgres, AccountRecord>(UPDATE_PROFILE_SQL)
            .bind(account.into_uuid())
            .bind(name)
            .bind(password_hash)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn list_accounts(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<AccountRecord>, sqlx::Error> {
        query_as::<Postgres, AccountRecord>(LIST_ACCOUNTS_SQL)
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for AccountRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let role = row
            .try_get::<String, _>("role")?
            .parse::<Role>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "role".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            uuid: AccountUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            role,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for AccountCredentials {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            account: AccountRecord::from_row(row)?,
            password_hash: row.try_get("password_hash")?,
        })
    }
}

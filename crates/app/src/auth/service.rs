//! Auth service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::debug;

use crate::{
    auth::{AuthServiceError, TokenSigner, password},
    database::Db,
    domain::accounts::{
        data::NormalizedEmail,
        records::{AccountRecord, Role},
        repository::PgAccountsRepository,
    },
};

/// A successful login.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub expires_at: Timestamp,
    pub account: AccountRecord,
}

#[derive(Debug, Clone)]
pub struct PgAuthService {
    db: Db,
    accounts: PgAccountsRepository,
    signer: TokenSigner,
}

impl PgAuthService {
    #[must_use]
    pub fn new(db: Db, signer: TokenSigner) -> Self {
        Self {
            db,
            accounts: PgAccountsRepository::new(),
            signer,
        }
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn login(&self, email: &str, password: &str) -> Result<Session, AuthServiceError> {
        let email = NormalizedEmail::parse(email).ok_or(AuthServiceError::InvalidCredentials)?;

        let mut tx = self.db.begin().await?;

        let credentials = self
            .accounts
            .find_credentials_by_email(&mut tx, &email)
            .await?;

        tx.commit().await?;

        let Some(credentials) = credentials else {
            password::verify_missing_account(password.to_string()).await?;

            return Err(AuthServiceError::InvalidCredentials);
        };

        let verified =
            password::verify_password(password.to_string(), credentials.password_hash).await?;

        if !verified {
            return Err(AuthServiceError::InvalidCredentials);
        }

        let issued = self
            .signer
            .issue(credentials.account.uuid, Timestamp::now())?;

        Ok(Session {
            token: issued.token,
            expires_at: issued.expires_at,
            account: credentials.account,
        })
    }

    async fn authenticate_bearer(
        &self,
        bearer_token: &str,
    ) -> Result<AccountRecord, AuthServiceError> {
        let account = self
            .signer
            .verify(bearer_token, Timestamp::now())
            .map_err(|error| {
                debug!(reason = %error, "rejected session token");

                AuthServiceError::Unauthenticated
            })?;

        let mut tx = self.db.begin().await?;

        let account = self.accounts.find_account(&mut tx, account).await?;

        tx.commit().await?;

        account.ok_or(AuthServiceError::Unauthenticated)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Exchange an email and password for a session token.
    async fn login(&self, email: &str, password: &str) -> Result<Session, AuthServiceError>;

    /// Resolve the account a bearer token was issued for.
    async fn authenticate_bearer(&self, bearer_token: &str)
    -> Result<AccountRecord, AuthServiceError>;
}

/// Gate for admin-only operations. Always applied after [`AuthService::authenticate_bearer`].
pub fn require_admin(account: &AccountRecord) -> Result<(), AuthServiceError> {
    match account.role {
        Role::Admin => Ok(()),
        Role::User => Err(AuthServiceError::Forbidden),
    }
}

//! Accounts service.

use async_trait::async_trait;
use mockall::automock;
use tracing::{debug, info};

use crate::{
    auth::password,
    database::Db,
    domain::accounts::{
        data::{NewAccount, NormalizedEmail, ProfileUpdate},
        errors::AccountsServiceError,
        records::{AccountRecord, AccountUuid, Role},
        repository::{NewAccountRow, PgAccountsRepository},
    },
};

const MISSING_FIELDS: &str = "Name, email and password are required";

#[derive(Debug, Clone)]
pub struct PgAccountsService {
    db: Db,
    repository: PgAccountsRepository,
}

impl PgAccountsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgAccountsRepository::new(),
        }
    }
}

#[async_trait]
impl AccountsService for PgAccountsService {
    async fn register(&self, account: NewAccount) -> Result<AccountRecord, AccountsServiceError> {
        let name = account.name.trim();

        let email = NormalizedEmail::parse(&account.email)
            .ok_or(AccountsServiceError::InvalidInput(MISSING_FIELDS))?;

        if name.is_empty() || account.password.is_empty() {
            return Err(AccountsServiceError::InvalidInput(MISSING_FIELDS));
        }

        // Skips the hashing cost for the common duplicate case; the unique index still
        // decides a concurrent race.
        if self.find_by_email(&email).await?.is_some() {
            return Err(AccountsServiceError::DuplicateEmail);
        }

        let password_hash = password::hash_password(account.password).await?;

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_account(
                &mut tx,
                &NewAccountRow {
                    uuid: AccountUuid::new(),
                    name,
                    email: &email,
                    password_hash: &password_hash,
                },
            )
            .await?;

        let created = if self.repository.claim_admin(&mut tx, created.uuid).await? {
            self.repository
                .set_role(&mut tx, created.uuid, Role::Admin)
                .await?
        } else {
            created
        };

        tx.commit().await?;

        info!(account_uuid = %created.uuid, role = %created.role, "registered account");

        Ok(created)
    }

    async fn find_by_email(
        &self,
        email: &NormalizedEmail,
    ) -> Result<Option<AccountRecord>, AccountsServiceError> {
        let mut tx = self.db.begin().await?;

        let account = self.repository.find_account_by_email(&mut tx, email).await?;

        tx.commit().await?;

        Ok(account)
    }

    async fn find_by_id(
        &self,
        account: AccountUuid,
    ) -> Result<Option<AccountRecord>, AccountsServiceError> {
        let mut tx = self.db.begin().await?;

        let account = self.repository.find_account(&mut tx, account).await?;

        tx.commit().await?;

        Ok(account)
    }

    async fn update_profile(
        &self,
        account: AccountUuid,
        update: ProfileUpdate,
    ) -> Result<AccountRecord, AccountsServiceError> {
        let update = update.normalized();

        let password_hash = match update.password {
            Some(password) => Some(password::hash_password(password).await?),
            None => None,
        };

        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_profile(
                &mut tx,
                account,
                update.name.as_deref(),
                password_hash.as_deref(),
            )
            .await?
            .ok_or(AccountsServiceError::NotFound)?;

        tx.commit().await?;

        debug!(
            account_uuid = %account,
            password_changed = password_hash.is_some(),
            "updated profile"
        );

        Ok(updated)
    }

    async fn list_accounts(&self) -> Result<Vec<AccountRecord>, AccountsServiceError> {
        let mut tx = self.db.begin().await?;

        let accounts = self.repository.list_accounts(&mut tx).await?;

        tx.commit().await?;

        Ok(accounts)
    }
}

#[automock]
#[async_trait]
pub trait AccountsService: Send + Sync {
    /// Register a new account. The first account ever registered becomes the admin.
    async fn register(&self, account: NewAccount) -> Result<AccountRecord, AccountsServiceError>;

    /// Look up an account by its normalized email.
    async fn find_by_email(
        &self,
        email: &NormalizedEmail,
    ) -> Result<Option<AccountRecord>, AccountsServiceError>;

    /// Look up an account by its identifier.
    async fn find_by_id(
        &self,
        account: AccountUuid,
    ) -> Result<Option<AccountRecord>, AccountsServiceError>;

    /// Apply the supplied profile fields, re-hashing the password when one is given.
    async fn update_profile(
        &self,
        account: AccountUuid,
        update: ProfileUpdate,
    ) -> Result<AccountRecord, AccountsServiceError>;

    /// All accounts, newest first.
    async fn list_accounts(&self) -> Result<Vec<AccountRecord>, AccountsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;
    use crate::test::{TestContext, helpers::register};

    #[tokio::test]
    async fn first_account_becomes_admin_and_later_ones_do_not() -> TestResult {
        let ctx = TestContext::new().await;

        let first = register(&ctx, "Ada", "ada@example.com", "pw").await?;
        let second = register(&ctx, "Bob", "bob@example.com", "pw").await?;

        assert_eq!(first.role, Role::Admin);
        assert_eq!(second.role, Role::User);

        Ok(())
    }

    #[tokio::test]
    async fn concurrent_registrations_produce_exactly_one_admin() -> TestResult {
        let ctx = TestContext::new().await;

        let registrations = (0..8).map(|i| {
            let accounts = ctx.accounts.clone();

            tokio::spawn(async move {
                accounts
                    .register(NewAccount {
                        name: format!("User {i}"),
                        email: format!("user{i}@example.com"),
                        password: "pw".to_string(),
                    })
                    .await
            })
        });

        let mut admins = 0;

        for handle in registrations.collect::<Vec<_>>() {
            if handle.await??.role.is_admin() {
                admins += 1;
            }
        }

        assert_eq!(admins, 1, "exactly one registrant should hold the admin role");

        Ok(())
    }

    #[tokio::test]
    async fn email_is_normalized_and_duplicates_rejected() -> TestResult {
        let ctx = TestContext::new().await;

        let created = register(&ctx, "Ada", "  Ada@Example.COM ", "pw").await?;

        assert_eq!(created.email, "ada@example.com");

        let duplicate = register(&ctx, "Imposter", "ADA@example.com", "other").await;

        assert!(
            matches!(duplicate, Err(AccountsServiceError::DuplicateEmail)),
            "expected DuplicateEmail, got {duplicate:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn blank_fields_are_rejected() {
        let ctx = TestContext::new().await;

        for (name, email, password) in [
            ("", "a@example.com", "pw"),
            ("Ada", "  ", "pw"),
            ("Ada", "a@example.com", ""),
        ] {
            let result = register(&ctx, name, email, password).await;

            assert!(
                matches!(result, Err(AccountsServiceError::InvalidInput(_))),
                "expected InvalidInput for ({name:?}, {email:?}), got {result:?}"
            );
        }
    }

    #[tokio::test]
    async fn find_by_email_and_id_return_the_same_account() -> TestResult {
        let ctx = TestContext::new().await;

        let created = register(&ctx, "Ada", "ada@example.com", "pw").await?;

        let email = NormalizedEmail::parse("ADA@example.com").ok_or("email should parse")?;
        let by_email = ctx.accounts.find_by_email(&email).await?;
        let by_id = ctx.accounts.find_by_id(created.uuid).await?;

        assert_eq!(by_email.as_ref(), Some(&created));
        assert_eq!(by_id.as_ref(), Some(&created));

        assert!(ctx.accounts.find_by_id(AccountUuid::new()).await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn update_profile_changes_only_supplied_fields() -> TestResult {
        let ctx = TestContext::new().await;

        let created = register(&ctx, "Ada", "ada@example.com", "pw").await?;

        let renamed = ctx
            .accounts
            .update_profile(
                created.uuid,
                ProfileUpdate {
                    name: Some("Ada Lovelace".to_string()),
                    password: None,
                },
            )
            .await?;

        assert_eq!(renamed.name, "Ada Lovelace");
        assert_eq!(renamed.email, created.email);
        assert_eq!(renamed.role, created.role);

        let unchanged = ctx
            .accounts
            .update_profile(created.uuid, ProfileUpdate::default())
            .await?;

        assert_eq!(unchanged.name, "Ada Lovelace");

        Ok(())
    }

    #[tokio::test]
    async fn update_profile_for_unknown_account_is_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .accounts
            .update_profile(
                AccountUuid::new(),
                ProfileUpdate {
                    name: Some("Ghost".to_string()),
                    password: None,
                },
            )
            .await;

        assert!(
            matches!(result, Err(AccountsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }
}

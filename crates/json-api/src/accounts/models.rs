//! Account Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bazaar_app::domain::accounts::records::AccountRecord;

/// An account as shown to its owner.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserResponse {
    /// The unique identifier of the account
    pub uuid: Uuid,

    pub name: String,

    /// Normalized (trimmed, lower-cased) email
    pub email: String,

    /// Either `user` or `admin`
    pub role: String,
}

impl From<AccountRecord> for UserResponse {
    fn from(account: AccountRecord) -> Self {
        UserResponse {
            uuid: account.uuid.into(),
            name: account.name,
            email: account.email,
            role: account.role.to_string(),
        }
    }
}

/// Profile fields returned after an update.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProfileResponse {
    pub uuid: Uuid,
    pub name: String,
    pub email: String,
}

impl From<AccountRecord> for ProfileResponse {
    fn from(account: AccountRecord) -> Self {
        ProfileResponse {
            uuid: account.uuid.into(),
            name: account.name,
            email: account.email,
        }
    }
}

/// An account as listed on the debug endpoint.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ListedUserResponse {
    pub uuid: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,

    /// The date and time the account was registered
    pub created_at: String,
}

impl From<AccountRecord> for ListedUserResponse {
    fn from(account: AccountRecord) -> Self {
        ListedUserResponse {
            uuid: account.uuid.into(),
            name: account.name,
            email: account.email,
            role: account.role.to_string(),
            created_at: account.created_at.to_string(),
        }
    }
}

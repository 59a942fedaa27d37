//! Account Errors

use tracing::error;

use bazaar_app::domain::accounts::AccountsServiceError;

use crate::errors::ApiError;

pub(crate) fn into_api_error(error: AccountsServiceError) -> ApiError {
    match error {
        AccountsServiceError::InvalidInput(message) => ApiError::bad_request(message),
        AccountsServiceError::DuplicateEmail => ApiError::bad_request("User already exists"),
        AccountsServiceError::NotFound => ApiError::not_found("User not found"),
        AccountsServiceError::Password(source) => {
            error!("failed to hash password: {source}");

            ApiError::internal()
        }
        AccountsServiceError::Sql(source) => {
            error!("account storage failure: {source}");

            ApiError::internal()
        }
    }
}

//! Register Account Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use bazaar_app::domain::accounts::data::NewAccount;

use crate::{
    accounts::{errors::into_api_error, models::UserResponse},
    errors::ApiError,
    extensions::*,
    observability::record_registration,
    state::State,
};

/// Register Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RegisterRequest {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub password: String,
}

impl From<RegisterRequest> for NewAccount {
    fn from(request: RegisterRequest) -> Self {
        NewAccount {
            name: request.name,
            email: request.email,
            password: request.password,
        }
    }
}

/// Registered Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RegisteredResponse {
    pub message: String,
    pub user: UserResponse,
}

/// Register Handler
///
/// Creates an account. The first account ever registered becomes the admin.
#[endpoint(
    tags("accounts"),
    summary = "Register",
    responses(
        (status_code = StatusCode::CREATED, description = "Account created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing fields or user already exists"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<RegisterRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<RegisteredResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let account = state
        .app
        .accounts
        .register(json.into_inner().into())
        .await
        .map_err(into_api_error)?;

    info!(account = %account.uuid, role = %account.role, "account registered");

    record_registration(account.role);

    res.status_code(StatusCode::CREATED);

    Ok(Json(RegisteredResponse {
        message: "User registered successfully".to_string(),
        user: account.into(),
    }))
}

#[cfg(test)]
mod tests {
    use bazaar_app::domain::accounts::{AccountsServiceError, MockAccountsService};
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::{
        errors::ErrorResponse,
        test_helpers::{TEST_ADMIN_UUID, make_admin, public_service, state_with_accounts},
    };

    use super::*;

    fn make_service(accounts: MockAccountsService) -> Service {
        public_service(
            state_with_accounts(accounts),
            Router::with_path("register").post(handler),
        )
    }

    fn alice() -> NewAccount {
        NewAccount {
            name: "Alice".to_string(),
            email: "Alice@X.com".to_string(),
            password: "pw123456".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_success_returns_201() -> TestResult {
        let mut accounts = MockAccountsService::new();

        accounts
            .expect_register()
            .once()
            .withf(|new| *new == alice())
            .return_once(|_| Ok(make_admin()));

        let mut res = TestClient::post("http://example.com/register")
            .json(&json!({ "name": "Alice", "email": "Alice@X.com", "password": "pw123456" }))
            .send(&make_service(accounts))
            .await;

        let body: RegisteredResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body.message, "User registered successfully");
        assert_eq!(body.user.uuid, TEST_ADMIN_UUID.into_uuid());
        assert_eq!(body.user.role, "admin");

        Ok(())
    }

    #[tokio::test]
    async fn test_register_duplicate_email_returns_400() -> TestResult {
        let mut accounts = MockAccountsService::new();

        accounts
            .expect_register()
            .once()
            .return_once(|_| Err(AccountsServiceError::DuplicateEmail));

        let mut res = TestClient::post("http://example.com/register")
            .json(&json!({ "name": "Alice", "email": "Alice@X.com", "password": "pw123456" }))
            .send(&make_service(accounts))
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.message, "User already exists");

        Ok(())
    }

    #[tokio::test]
    async fn test_register_missing_fields_reach_the_service_as_blank() -> TestResult {
        let mut accounts = MockAccountsService::new();

        accounts
            .expect_register()
            .once()
            .withf(|new| new.email.is_empty() && new.password.is_empty())
            .return_once(|_| {
                Err(AccountsServiceError::InvalidInput(
                    "Name, email and password are required",
                ))
            });

        let mut res = TestClient::post("http://example.com/register")
            .json(&json!({ "name": "Alice" }))
            .send(&make_service(accounts))
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.message, "Name, email and password are required");

        Ok(())
    }
}

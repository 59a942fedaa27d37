//! Login Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    accounts::models::UserResponse, auth::errors::into_api_error, errors::ApiError,
    extensions::*, state::State,
};

/// Login Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginRequest {
    /// Matched case-insensitively
    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub password: String,
}

/// Login Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginResponse {
    /// Bearer token for the `Authorization` header
    pub token: String,

    /// When the token stops being accepted
    pub expires_at: String,

    pub user: UserResponse,
}

/// Login Handler
///
/// Exchanges an email and password for a session token valid for 24 hours.
#[endpoint(
    tags("auth"),
    summary = "Login",
    responses(
        (status_code = StatusCode::OK, description = "Logged in"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid credentials"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<LoginRequest>,
    depot: &mut Depot,
) -> Result<Json<LoginResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let session = state
        .app
        .auth
        .login(&request.email, &request.password)
        .await
        .map_err(into_api_error)?;

    info!(account = %session.account.uuid, "session issued");

    Ok(Json(LoginResponse {
        token: session.token,
        expires_at: session.expires_at.to_string(),
        user: session.account.into(),
    }))
}

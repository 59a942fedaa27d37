//! Update Profile Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use bazaar_app::domain::accounts::data::ProfileUpdate;

use crate::{
    accounts::{errors::into_api_error, models::ProfileResponse},
    errors::ApiError,
    extensions::*,
    state::State,
};

/// Update Profile Request
///
/// Omitted or blank fields are left unchanged.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateProfileRequest {
    pub name: Option<String>,
    pub password: Option<String>,
}

impl From<UpdateProfileRequest> for ProfileUpdate {
    fn from(request: UpdateProfileRequest) -> Self {
        ProfileUpdate {
            name: request.name,
            password: request.password,
        }
    }
}

/// Profile Updated Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProfileUpdatedResponse {
    pub message: String,
    pub user: ProfileResponse,
}

/// Update Profile Handler
#[endpoint(
    tags("accounts"),
    summary = "Update Profile",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Profile updated"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Missing or invalid token"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<UpdateProfileRequest>,
    depot: &mut Depot,
) -> Result<Json<ProfileUpdatedResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let account = depot.account_or_401()?.uuid;

    let updated = state
        .app
        .accounts
        .update_profile(account, json.into_inner().into())
        .await
        .map_err(into_api_error)?;

    info!(%account, "profile updated");

    Ok(Json(ProfileUpdatedResponse {
        message: "Profile updated successfully".to_string(),
        user: updated.into(),
    }))
}

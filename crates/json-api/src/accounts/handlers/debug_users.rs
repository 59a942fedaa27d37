//! Debug Users Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    accounts::models::ListedUserResponse, errors::ApiError, extensions::*, state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UsersResponse {
    /// Every registered account, newest first
    pub users: Vec<ListedUserResponse>,
}

/// Debug Users Handler
///
/// Lists every account without credentials. Only mounted when debug endpoints are enabled.
#[endpoint(tags("debug"), summary = "List Users")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<UsersResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let users = state
        .app
        .accounts
        .list_accounts()
        .await
        .or_500("failed to list accounts")?;

    Ok(Json(UsersResponse {
        users: users.into_iter().map(Into::into).collect(),
    }))
}

//! Auth middleware.

use std::sync::Arc;

use salvo::{http::header::AUTHORIZATION, prelude::*};

use bazaar_app::auth;

use crate::{auth::errors::into_api_error, errors::ApiError, extensions::*, state::State};

/// Resolve the bearer token to an account and record it in the depot.
#[salvo::handler]
pub(crate) async fn authenticate(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(token) = extract_bearer_token(req) else {
        res.render(ApiError::unauthenticated());

        return;
    };

    let state = match depot.obtain_or_500::<Arc<State>>() {
        Ok(state) => state,
        Err(error) => {
            res.render(error);

            return;
        }
    };

    let account = match state.app.auth.authenticate_bearer(token).await {
        Ok(account) => account,
        Err(error) => {
            res.render(into_api_error(error));

            return;
        }
    };

    depot.insert_account(account);

    ctrl.call_next(req, depot, res).await;
}

/// Reject accounts without the admin role. Must run after [`authenticate`].
#[salvo::handler]
pub(crate) async fn require_admin(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let gate = depot
        .account_or_401()
        .and_then(|account| auth::require_admin(account).map_err(into_api_error));

    if let Err(error) = gate {
        res.render(error);

        return;
    }

    ctrl.call_next(req, depot, res).await;
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}

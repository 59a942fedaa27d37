//! Auth Errors

use tracing::error;

use bazaar_app::auth::AuthServiceError;

use crate::errors::ApiError;

pub(crate) fn into_api_error(error: AuthServiceError) -> ApiError {
    match error {
        AuthServiceError::InvalidCredentials => ApiError::bad_request("Invalid credentials"),
        AuthServiceError::Unauthenticated => ApiError::unauthenticated(),
        AuthServiceError::Forbidden => ApiError::forbidden(),
        AuthServiceError::Sql(source) => {
            error!("auth storage failure: {source}");

            ApiError::internal()
        }
        AuthServiceError::Password(source) => {
            error!("password verification failure: {source}");

            ApiError::internal()
        }
        AuthServiceError::Token(source) => {
            error!("session token failure: {source}");

            ApiError::internal()
        }
    }
}

#[cfg(test)]
mod tests {
    use bazaar_app::auth::SessionTokenError;
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn login_failures_are_bad_requests_without_detail() {
        let error = into_api_error(AuthServiceError::InvalidCredentials);

        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error.message(), "Invalid credentials");
    }

    #[test]
    fn gate_failures_map_to_their_status() {
        assert_eq!(
            into_api_error(AuthServiceError::Unauthenticated).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            into_api_error(AuthServiceError::Forbidden).status(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn internal_failures_are_opaque() {
        let error = into_api_error(AuthServiceError::Token(SessionTokenError::Key));

        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.message(), "Internal server error");
    }
}

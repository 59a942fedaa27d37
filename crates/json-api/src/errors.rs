//! JSON error responses.
//!
//! Every failure leaves the server as `{"message": "..."}` with a status that names its class.

use std::borrow::Cow;

use salvo::{
    http::ResBody,
    oapi::{self, Components, EndpointOutRegister, Operation, ToSchema},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ErrorResponse {
    /// Human-readable description of what went wrong
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{status}: {message}")]
pub(crate) struct ApiError {
    status: StatusCode,
    message: Cow<'static, str>,
}

impl ApiError {
    pub(crate) fn new(status: StatusCode, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub(crate) fn bad_request(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub(crate) fn unauthenticated() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Please authenticate")
    }

    pub(crate) fn forbidden() -> Self {
        Self::new(StatusCode::FORBIDDEN, "Admin access required")
    }

    pub(crate) fn not_found(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// The cause must already have been logged; it is never shown to the client.
    pub(crate) fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }

    pub(crate) fn status(&self) -> StatusCode {
        self.status
    }

    pub(crate) fn message(&self) -> &str {
        &self.message
    }
}

impl Scribe for ApiError {
    fn render(self, res: &mut Response) {
        res.status_code(self.status);
        res.render(Json(ErrorResponse {
            message: self.message.into_owned(),
        }));
    }
}

impl EndpointOutRegister for ApiError {
    fn register(_components: &mut Components, operation: &mut Operation) {
        for (status, description) in [
            (StatusCode::BAD_REQUEST, "Bad Request"),
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
        ] {
            operation
                .responses
                .insert(status.as_str(), oapi::Response::new(description));
        }
    }
}

/// Catcher hoop that rewrites framework-generated errors (unknown routes, unparsable bodies)
/// into the same JSON shape as handler errors.
#[handler]
pub(crate) async fn json_catcher(res: &mut Response, ctrl: &mut FlowCtrl) {
    let Some(status) = res
        .status_code
        .filter(|status| status.is_client_error() || status.is_server_error())
    else {
        return;
    };

    if !matches!(res.body, ResBody::None | ResBody::Error(_)) {
        return;
    }

    let message = match &res.body {
        ResBody::Error(error) if !status.is_server_error() => error.brief.clone(),
        _ => status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string(),
    };

    res.render(ApiError::new(status, message));
    ctrl.skip_rest();
}

#[cfg(test)]
mod tests {
    use salvo::{
        catcher::Catcher,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use super::*;

    #[handler]
    async fn fails() -> Result<&'static str, ApiError> {
        Err(ApiError::not_found("Order not found"))
    }

    #[tokio::test]
    async fn api_errors_render_a_message_body() -> TestResult {
        let service = Service::new(Router::new().get(fails));

        let mut res = TestClient::get("http://example.com").send(&service).await;
        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
        assert_eq!(body.message, "Order not found");

        Ok(())
    }

    #[tokio::test]
    async fn unknown_routes_render_a_message_body() -> TestResult {
        let service = Service::new(Router::new().push(Router::with_path("known").get(fails)))
            .catcher(Catcher::default().hoop(json_catcher));

        let mut res = TestClient::get("http://example.com/unknown")
            .send(&service)
            .await;
        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
        assert!(!body.message.is_empty(), "expected a message");

        Ok(())
    }

    #[test]
    fn api_errors_display_their_status_and_message() {
        let error = ApiError::not_found("Order not found");

        assert_eq!(
            error.to_string(),
            "404 Not Found: Order not found",
            "display should carry the status and message"
        );
    }
}

//! Bazaar JSON API Server

use std::process::ExitCode;

use salvo::{
    affix_state::inject,
    catcher::Catcher,
    cors::{AllowHeaders, AllowMethods, AllowOrigin, Cors, CorsHandler},
    http::{
        Method,
        header::{AUTHORIZATION, CONTENT_TYPE, HeaderName, HeaderValue, InvalidHeaderValue},
    },
    oapi::{
        OpenApi,
        security::{Http, HttpAuthScheme, SecurityScheme},
        swagger_ui::SwaggerUi,
    },
    prelude::*,
    trailing_slash::remove_slash,
};
use tracing::{error, info};

use bazaar_app::{auth::TokenSigningKey, context::AppContext};

use crate::{
    config::ServerConfig,
    errors::json_catcher,
    observability::{Observability, request_logging},
    router::{RouteOptions, app_router},
    state::State,
};

mod accounts;
mod auth;
mod config;
mod errors;
mod extensions;
mod healthcheck;
mod observability;
mod orders;
mod router;
mod shutdown;
mod state;
#[cfg(test)]
mod test_helpers;

/// Bazaar JSON API Server entry point
#[tokio::main]
pub async fn main() -> ExitCode {
    let config = match ServerConfig::load() {
        Ok(config) => config,
        Err(error) => {
            // clap renders help, version and usage errors itself
            _ = error.print();

            return if error.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let observability = match Observability::init(&config) {
        Ok(observability) => observability,
        Err(init_error) => {
            #[expect(
                clippy::print_stderr,
                reason = "logging failed to initialise, so eprintln is the only channel left"
            )]
            {
                eprintln!("Observability error: {init_error}");
            }

            return ExitCode::FAILURE;
        }
    };

    let signing_key = match TokenSigningKey::from_secret(&config.auth.token_secret) {
        Ok(key) => key,
        Err(key_error) => {
            error!("invalid TOKEN_SECRET: {key_error}");

            return ExitCode::FAILURE;
        }
    };

    let cors = match cors_handler(&config.server.cors_allowed_origin) {
        Ok(cors) => cors,
        Err(header_error) => {
            error!("invalid CORS_ALLOWED_ORIGIN: {header_error}");

            return ExitCode::FAILURE;
        }
    };

    let app = match AppContext::from_database_url(
        &config.database.database_url,
        config.database.run_migrations,
        signing_key,
    )
    .await
    {
        Ok(app) => app,
        Err(init_error) => {
            error!("failed to initialize app context: {init_error}");

            return ExitCode::FAILURE;
        }
    };

    let options = RouteOptions {
        debug_endpoints_enabled: config.auth.debug_endpoints_enabled,
        metrics_enabled: observability.metrics_enabled(),
    };

    if options.debug_endpoints_enabled {
        info!("debug endpoints are enabled; do not run this configuration in production");
    }

    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(request_logging)
        .hoop(remove_slash())
        .hoop(inject(State::from_app_context(app)))
        .push(app_router(options));

    let doc = OpenApi::new("Bazaar API", env!("CARGO_PKG_VERSION"))
        .add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
        .merge_router(&router);

    let router = router
        .push(doc.into_router("/api-doc/openapi.json"))
        .push(SwaggerUi::new("/api-doc/openapi.json").into_router("docs"));

    let service = Service::new(router)
        .hoop(cors)
        .catcher(Catcher::default().hoop(json_catcher));

    let addr = config.socket_addr();

    info!("Starting server on {addr}");

    let listener = TcpListener::new(addr).bind().await;

    let server = Server::new(listener);

    let handle = server.handle();

    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    server.serve(service).await;

    info!("server stopped");

    ExitCode::SUCCESS
}

fn cors_handler(origin: &str) -> Result<CorsHandler, InvalidHeaderValue> {
    let allow_origin = if origin == "*" {
        AllowOrigin::any()
    } else {
        AllowOrigin::exact(HeaderValue::from_str(origin)?)
    };

    Ok(Cors::new()
        .allow_origin(allow_origin)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            AUTHORIZATION,
            CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ]))
        .into_handler())
}

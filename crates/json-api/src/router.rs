//! App Router

use salvo::Router;

use crate::{accounts, auth, healthcheck, observability::metrics_handler, orders};

/// Routes that are toggled by configuration.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct RouteOptions {
    pub debug_endpoints_enabled: bool,
    pub metrics_enabled: bool,
}

/// Every route served by the API, without state or middleware.
pub(crate) fn app_router(options: RouteOptions) -> Router {
    let mut router = Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(api_router(options));

    if options.metrics_enabled {
        router = router.push(Router::with_path("metrics").get(metrics_handler));
    }

    router
}

fn api_router(options: RouteOptions) -> Router {
    let mut api = Router::with_path("api")
        .push(Router::with_path("register").post(accounts::register::handler))
        .push(Router::with_path("login").post(auth::login::handler))
        .push(
            Router::new()
                .hoop(auth::middleware::authenticate)
                .push(Router::with_path("profile/update").put(accounts::profile::handler))
                .push(
                    Router::with_path("orders")
                        .get(orders::index::handler)
                        .post(orders::create::handler)
                        .push(Router::with_path("{id}/cancel").put(orders::cancel::handler)),
                )
                .push(
                    Router::with_path("admin/orders")
                        .hoop(auth::middleware::require_admin)
                        .get(orders::admin_index::handler)
                        .push(Router::with_path("{id}/status").put(orders::set_status::handler)),
                ),
        );

    if options.debug_endpoints_enabled {
        api = api.push(Router::with_path("debug/users").get(accounts::debug_users::handler));
    }

    api
}

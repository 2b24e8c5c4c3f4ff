//! App Router

use salvo::Router;

use crate::{auth, carts, healthcheck, observability, products, users};

/// Every route the server exposes, without state injection.
pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(observability::metrics_handler))
        .push(Router::with_path("products/{product}").get(products::get::handler))
        .push(authenticated_router())
}

fn authenticated_router() -> Router {
    Router::new()
        .hoop(auth::middleware::handler)
        .push(
            Router::with_path("profile")
                .get(users::get::handler)
                .put(users::update::handler)
                .delete(users::delete::handler),
        )
        .push(
            Router::with_path("cart")
                .get(carts::get::handler)
                .delete(carts::clear::handler)
                .push(
                    Router::with_path("items")
                        .post(carts::items::create::handler)
                        .push(
                            Router::with_path("{item}")
                                .put(carts::items::update::handler)
                                .delete(carts::items::delete::handler),
                        ),
                ),
        )
        .push(admin_router())
}

fn admin_router() -> Router {
    Router::new()
        .hoop(auth::admin::handler)
        .push(
            Router::with_path("products")
                .post(products::create::handler)
                .push(
                    Router::with_path("{product}")
                        .put(products::update::handler)
                        .delete(products::delete::handler),
                ),
        )
}

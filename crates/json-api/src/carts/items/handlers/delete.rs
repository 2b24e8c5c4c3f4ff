//! Remove Cart Item Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use optical_store_app::domain::carts::models::CartItemId;

use crate::{carts::errors::into_status_error, extensions::*, state::State};

/// Remove Cart Item Handler
#[endpoint(
    tags("cart"),
    summary = "Remove Cart Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Cart item removed"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart item not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    )
)]
#[tracing::instrument(
    name = "cart.items.delete",
    skip(item, depot),
    fields(
        user_id = tracing::field::Empty,
        item_id = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    item: PathParam<i64>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_id_or_401()?;
    let item = item.into_inner();

    let span = tracing::Span::current();

    span.record("user_id", user.into_i64());
    span.record("item_id", item);

    state
        .app
        .carts
        .remove_item(user, CartItemId::from_i64(item))
        .await
        .map_err(into_status_error)?;

    tracing::info!("removed cart item");

    Ok(StatusCode::NO_CONTENT)
}

//! Add Cart Item Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};
use serde::{Deserialize, Serialize};

use optical_store_app::domain::{carts::models::AddCartItem, catalog::models::VariantId};

use crate::{
    carts::{errors::into_status_error, responses::CartResponse},
    extensions::*,
    state::State,
};

/// Add Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddCartItemRequest {
    /// Variant to add
    pub product_variant_id: i64,

    /// Quantity to add; merged with any existing line for the variant
    pub quantity: i32,
}

impl From<AddCartItemRequest> for AddCartItem {
    fn from(request: AddCartItemRequest) -> Self {
        Self {
            variant_id: VariantId::from_i64(request.product_variant_id),
            quantity: request.quantity,
        }
    }
}

/// Add Cart Item Handler
///
/// Adds a variant to the caller's active cart and returns the updated cart.
#[endpoint(
    tags("cart"),
    summary = "Add Item to Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Updated cart"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid quantity or variant id"),
        (status_code = StatusCode::NOT_FOUND, description = "Variant not found"),
        (status_code = StatusCode::CONFLICT, description = "Insufficient stock"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "cart.items.create",
    skip(json, depot),
    fields(
        user_id = tracing::field::Empty,
        variant_id = tracing::field::Empty,
        quantity = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<AddCartItemRequest>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_id_or_401()?;
    let request = json.into_inner();

    let span = tracing::Span::current();

    span.record("user_id", user.into_i64());
    span.record("variant_id", request.product_variant_id);
    span.record("quantity", request.quantity);

    let view = state
        .app
        .carts
        .add_item(user, request.into())
        .await
        .map_err(into_status_error)?;

    tracing::info!(total_items = view.total_items, "added item to cart");

    Ok(Json(view.into()))
}

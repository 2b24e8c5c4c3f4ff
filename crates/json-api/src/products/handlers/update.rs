//! Update Product Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};

use optical_store_app::domain::catalog::models::ProductId;

use crate::{
    extensions::*,
    products::{
        errors::into_status_error, requests::ProductRequest, responses::ProductSummaryResponse,
    },
    state::State,
};

/// Update Product Handler
///
/// Replaces a product's name, description, base price and category. Prices
/// already captured on cart lines are unchanged. Admin only.
#[endpoint(
    tags("products"),
    summary = "Update Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Updated product"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid name, price or category"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin role required"),
    ),
)]
#[tracing::instrument(
    name = "products.update",
    skip(product, json, depot),
    fields(product_id = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    product: PathParam<i64>,
    json: JsonBody<ProductRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductSummaryResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let product = product.into_inner();

    tracing::Span::current().record("product_id", product);
    let details = json.into_inner().into_details()?;

    let updated = state
        .app
        .catalog
        .update_product(ProductId::from_i64(product), details)
        .await
        .map_err(into_status_error)?;

    Ok(Json(updated.into()))
}

//! Create Product Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::extract::JsonBody,
    prelude::*,
};

use crate::{
    extensions::*,
    products::{
        errors::into_status_error, requests::ProductRequest, responses::ProductSummaryResponse,
    },
    state::State,
};

/// Create Product Handler
///
/// Adds a product without variants. Admin only.
#[endpoint(
    tags("products"),
    summary = "Create Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid name, price or category"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin role required"),
    ),
)]
#[tracing::instrument(
    name = "products.create",
    skip(json, depot, res),
    fields(product_id = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<ProductRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductSummaryResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let details = json.into_inner().into_details()?;

    let product = state
        .app
        .catalog
        .create_product(details)
        .await
        .map_err(into_status_error)?;

    tracing::Span::current().record("product_id", product.id.into_i64());

    res.add_header(LOCATION, format!("/products/{}", product.id), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(product.into()))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::{Value, json};
    use testresult::TestResult;

    use optical_store_app::domain::catalog::{
        CatalogServiceError, MockCatalogService, models::ProductDetails,
    };

    use crate::test_helpers::{catalog_service, make_product};

    use super::*;

    fn make_service(catalog: MockCatalogService) -> Service {
        catalog_service(catalog, Router::with_path("products").post(handler))
    }

    #[tokio::test]
    async fn test_create_returns_201_with_location() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog
            .expect_create_product()
            .once()
            .withf(|details| {
                *details
                    == ProductDetails {
                        name: "Round".to_string(),
                        description: String::new(),
                        base_price: Decimal::new(8900, 2),
                        category_id: None,
                    }
            })
            .return_once(|_| Ok(make_product(101, Decimal::new(8900, 2))));

        let mut res = TestClient::post("http://example.com/products")
            .json(&json!({ "name": "Round", "base_price": "89.00" }))
            .send(&make_service(catalog))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED), "created");
        assert_eq!(
            res.headers().get(LOCATION).and_then(|value| value.to_str().ok()),
            Some("/products/101"),
            "location of the new product"
        );

        let body: Value = res.take_json().await?;

        assert_eq!(body["id"], 101, "new id");
        assert_eq!(body["base_price"], "89.00", "money string");

        Ok(())
    }

    #[tokio::test]
    async fn test_create_with_unparseable_price_returns_400() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog.expect_create_product().never();

        let res = TestClient::post("http://example.com/products")
            .json(&json!({ "name": "Round", "base_price": "cheap" }))
            .send(&make_service(catalog))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST), "price rejected");

        Ok(())
    }

    #[tokio::test]
    async fn test_create_with_unknown_category_returns_400() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog
            .expect_create_product()
            .once()
            .return_once(|_| Err(CatalogServiceError::InvalidReference));

        let res = TestClient::post("http://example.com/products")
            .json(&json!({ "name": "Round", "base_price": "89.00", "category_id": 999 }))
            .send(&make_service(catalog))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST), "category rejected");

        Ok(())
    }
}

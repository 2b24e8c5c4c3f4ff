//! Catalog service.

use async_trait::async_trait;
use mockall::automock;
use rust_decimal::Decimal;
use tracing::info;

use crate::{
    database::Db,
    domain::catalog::{
        errors::CatalogServiceError,
        models::{
            Product, ProductDetails, ProductId, ProductWithVariants, VariantId, VariantWithProduct,
        },
        repository::PgCatalogRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgCatalogService {
    db: Db,
    repository: PgCatalogRepository,
}

impl PgCatalogService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCatalogRepository::new(),
        }
    }
}

/// Trim the name and reject details the storefront cannot sell.
fn validate(details: ProductDetails) -> Result<ProductDetails, CatalogServiceError> {
    let name = details.name.trim();

    if name.is_empty() {
        return Err(CatalogServiceError::MissingName);
    }

    if details.base_price <= Decimal::ZERO {
        return Err(CatalogServiceError::InvalidPrice);
    }

    Ok(ProductDetails {
        name: name.to_string(),
        ..details
    })
}

#[async_trait]
impl CatalogService for PgCatalogService {
    async fn get_variant(
        &self,
        variant: VariantId,
    ) -> Result<VariantWithProduct, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let variant = self
            .repository
            .find_variant(&mut tx, variant)
            .await?
            .ok_or(CatalogServiceError::NotFound)?;

        tx.commit().await?;

        Ok(variant)
    }

    async fn get_product(
        &self,
        product: ProductId,
    ) -> Result<ProductWithVariants, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let found = self
            .repository
            .find_product(&mut tx, product)
            .await?
            .ok_or(CatalogServiceError::NotFound)?;

        let variants = self
            .repository
            .list_product_variants(&mut tx, product)
            .await?;

        tx.commit().await?;

        Ok(ProductWithVariants {
            product: found,
            variants,
        })
    }

    async fn create_product(
        &self,
        details: ProductDetails,
    ) -> Result<Product, CatalogServiceError> {
        let details = validate(details)?;

        let mut tx = self.db.begin().await?;

        let created = self.repository.create_product(&mut tx, &details).await?;

        tx.commit().await?;

        info!(product_id = %created.id, "created product");

        Ok(created)
    }

    async fn update_product(
        &self,
        product: ProductId,
        details: ProductDetails,
    ) -> Result<Product, CatalogServiceError> {
        let details = validate(details)?;

        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_product(&mut tx, product, &details)
            .await?
            .ok_or(CatalogServiceError::NotFound)?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_product(&self, product: ProductId) -> Result<(), CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .repository
            .delete_product(&mut tx, product)
            .await
            .map_err(CatalogServiceError::from_delete)?;

        if rows_affected == 0 {
            return Err(CatalogServiceError::NotFound);
        }

        tx.commit().await?;

        info!(product_id = %product, "deleted product");

        Ok(())
    }
}

/// Products and their variants.
///
/// Variants are read-only here; stock is maintained outside this service.
#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Retrieve a variant together with its product.
    async fn get_variant(&self, variant: VariantId)
    -> Result<VariantWithProduct, CatalogServiceError>;

    /// Retrieve a product with all of its variants.
    async fn get_product(
        &self,
        product: ProductId,
    ) -> Result<ProductWithVariants, CatalogServiceError>;

    /// Create a product without variants.
    async fn create_product(&self, details: ProductDetails)
    -> Result<Product, CatalogServiceError>;

    /// Replace a product's editable fields. Existing cart lines keep their
    /// captured prices.
    async fn update_product(
        &self,
        product: ProductId,
        details: ProductDetails,
    ) -> Result<Product, CatalogServiceError>;

    /// Delete a product and its variants.
    async fn delete_product(&self, product: ProductId) -> Result<(), CatalogServiceError>;
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::{
        domain::carts::{CartsService, models::AddCartItem},
        test::{TestContext, helpers},
    };

    use super::*;

    fn details(name: &str, base_price: Decimal) -> ProductDetails {
        ProductDetails {
            name: name.to_string(),
            description: "Acetate frame".to_string(),
            base_price,
            category_id: None,
        }
    }

    #[tokio::test]
    async fn get_variant_includes_product() -> TestResult {
        let ctx = TestContext::new().await;

        let product = helpers::seed_product(&ctx, "Aviator", Decimal::new(12000, 2)).await;
        let variant =
            helpers::seed_variant(&ctx, product, "AV-BLK-L", Decimal::new(1500, 2), 4).await;

        let found = ctx.catalog.get_variant(variant).await?;

        assert_eq!(found.variant.id, variant);
        assert_eq!(found.variant.stock_qty, 4);
        assert_eq!(found.product.id, product);
        assert_eq!(found.product.name, "Aviator");
        assert_eq!(found.unit_price(), Decimal::new(13500, 2));

        Ok(())
    }

    #[tokio::test]
    async fn get_variant_unknown_id_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.catalog.get_variant(VariantId::from_i64(9_999)).await;

        assert!(
            matches!(result, Err(CatalogServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn get_product_lists_variants_in_id_order() -> TestResult {
        let ctx = TestContext::new().await;

        let product = helpers::seed_product(&ctx, "Cat Eye", Decimal::new(8000, 2)).await;
        let first = helpers::seed_variant(&ctx, product, "CE-RED-S", Decimal::ZERO, 2).await;
        let second = helpers::seed_variant(&ctx, product, "CE-RED-M", Decimal::ONE, 3).await;

        let found = ctx.catalog.get_product(product).await?;

        let ids: Vec<VariantId> = found.variants.iter().map(|variant| variant.id).collect();

        assert_eq!(found.product.id, product);
        assert_eq!(ids, vec![first, second]);

        Ok(())
    }

    #[tokio::test]
    async fn get_product_unknown_id_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.catalog.get_product(ProductId::from_i64(9_999)).await;

        assert!(
            matches!(result, Err(CatalogServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn create_product_trims_name_and_is_readable() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx
            .catalog
            .create_product(details("  Wayfarer ", Decimal::new(9900, 2)))
            .await?;

        assert_eq!(created.name, "Wayfarer");
        assert_eq!(created.base_price, Decimal::new(9900, 2));

        let found = ctx.catalog.get_product(created.id).await?;

        assert_eq!(found.product, created);
        assert!(found.variants.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn create_product_validates_name_and_price() {
        let ctx = TestContext::new().await;

        let blank = ctx
            .catalog
            .create_product(details("   ", Decimal::new(9900, 2)))
            .await;

        assert!(
            matches!(blank, Err(CatalogServiceError::MissingName)),
            "expected MissingName, got {blank:?}"
        );

        let free = ctx
            .catalog
            .create_product(details("Wayfarer", Decimal::ZERO))
            .await;

        assert!(
            matches!(free, Err(CatalogServiceError::InvalidPrice)),
            "expected InvalidPrice, got {free:?}"
        );
    }

    #[tokio::test]
    async fn create_product_with_unknown_category_is_invalid_reference() {
        let ctx = TestContext::new().await;

        let result = ctx
            .catalog
            .create_product(ProductDetails {
                category_id: Some(9_999),
                ..details("Wayfarer", Decimal::new(9900, 2))
            })
            .await;

        assert!(
            matches!(result, Err(CatalogServiceError::InvalidReference)),
            "expected InvalidReference, got {result:?}"
        );
    }

    #[tokio::test]
    async fn update_product_replaces_fields_but_not_cart_prices() -> TestResult {
        let ctx = TestContext::new().await;

        let product = helpers::seed_product(&ctx, "Aviator", Decimal::new(12000, 2)).await;
        let variant = helpers::seed_variant(&ctx, product, "AV-GLD-M", Decimal::ZERO, 5).await;

        ctx.carts
            .add_item(
                ctx.user_id,
                AddCartItem {
                    variant_id: variant,
                    quantity: 1,
                },
            )
            .await?;

        let updated = ctx
            .catalog
            .update_product(product, details("Aviator II", Decimal::new(15000, 2)))
            .await?;

        assert_eq!(updated.name, "Aviator II");
        assert_eq!(updated.base_price, Decimal::new(15000, 2));

        let cart = ctx.carts.get_cart(ctx.user_id).await?;

        assert_eq!(cart.total_price, Decimal::new(12000, 2));

        Ok(())
    }

    #[tokio::test]
    async fn update_product_unknown_id_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .catalog
            .update_product(ProductId::from_i64(9_999), details("Ghost", Decimal::ONE))
            .await;

        assert!(
            matches!(result, Err(CatalogServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn delete_product_removes_its_variants() -> TestResult {
        let ctx = TestContext::new().await;

        let product = helpers::seed_product(&ctx, "Cat Eye", Decimal::new(8000, 2)).await;
        let variant = helpers::seed_variant(&ctx, product, "CE-BLK-S", Decimal::ZERO, 2).await;

        ctx.catalog.delete_product(product).await?;

        let product_result = ctx.catalog.get_product(product).await;
        let variant_result = ctx.catalog.get_variant(variant).await;

        assert!(
            matches!(product_result, Err(CatalogServiceError::NotFound)),
            "expected NotFound, got {product_result:?}"
        );
        assert!(
            matches!(variant_result, Err(CatalogServiceError::NotFound)),
            "expected NotFound, got {variant_result:?}"
        );

        let again = ctx.catalog.delete_product(product).await;

        assert!(
            matches!(again, Err(CatalogServiceError::NotFound)),
            "expected NotFound, got {again:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_product_held_in_a_cart_is_in_use() -> TestResult {
        let ctx = TestContext::new().await;

        let product = helpers::seed_product(&ctx, "Round Frame", Decimal::new(5000, 2)).await;
        let variant = helpers::seed_variant(&ctx, product, "RF-TOR-M", Decimal::ZERO, 3).await;

        ctx.carts
            .add_item(
                ctx.user_id,
                AddCartItem {
                    variant_id: variant,
                    quantity: 2,
                },
            )
            .await?;

        let result = ctx.catalog.delete_product(product).await;

        assert!(
            matches!(result, Err(CatalogServiceError::InUse)),
            "expected InUse, got {result:?}"
        );

        let still_there = ctx.catalog.get_product(product).await?;

        assert_eq!(still_there.variants.len(), 1);

        Ok(())
    }
}

//! Product response bodies.

use rust_decimal::Decimal;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use optical_store_app::domain::catalog::models::{Product, ProductWithVariants, Variant};

use crate::carts::responses::money;

/// Product Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    pub id: i64,
    pub name: String,
    pub description: String,

    /// Base price before any variant surcharge
    pub base_price: String,

    pub category_id: Option<i64>,
    pub image: String,

    /// Purchasable variants ordered by id
    pub variants: Vec<VariantResponse>,
}

/// Variant Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VariantResponse {
    pub id: i64,
    pub sku: String,
    pub color: String,
    pub size: String,

    /// Surcharge added to the product base price
    pub extra_price: String,

    /// Current unit price (`base_price + extra_price`)
    pub price: String,

    pub stock_qty: i32,
    pub image_url: String,
}

/// Product fields returned by admin writes, without variants.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductSummaryResponse {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub base_price: String,
    pub category_id: Option<i64>,
    pub image: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ProductWithVariants> for ProductResponse {
    fn from(ProductWithVariants { product, variants }: ProductWithVariants) -> Self {
        let base_price = product.base_price;

        Self {
            id: product.id.into_i64(),
            name: product.name,
            description: product.description,
            base_price: money(base_price),
            category_id: product.category_id,
            image: product.image,
            variants: variants
                .into_iter()
                .map(|variant| VariantResponse::new(variant, base_price))
                .collect(),
        }
    }
}

impl VariantResponse {
    fn new(variant: Variant, base_price: Decimal) -> Self {
        Self {
            id: variant.id.into_i64(),
            sku: variant.sku,
            color: variant.color,
            size: variant.size,
            extra_price: money(variant.extra_price),
            price: money(base_price + variant.extra_price),
            stock_qty: variant.stock_qty,
            image_url: variant.image_url,
        }
    }
}

impl From<Product> for ProductSummaryResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.into_i64(),
            name: product.name,
            description: product.description,
            base_price: money(product.base_price),
            category_id: product.category_id,
            image: product.image,
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        }
    }
}

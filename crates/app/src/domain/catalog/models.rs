//! Catalog Models

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::ids::TypedId;

/// Product ID
pub type ProductId = TypedId<Product>;

/// Variant ID
pub type VariantId = TypedId<Variant>;

/// Product Model
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub base_price: Decimal,
    pub category_id: Option<i64>,
    pub image: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Variant Model
///
/// A purchasable configuration (colour, size) of a product with its own stock.
#[derive(Debug, Clone, PartialEq)]
pub struct Variant {
    pub id: VariantId,
    pub product_id: ProductId,
    pub sku: String,
    pub color: String,
    pub size: String,
    pub extra_price: Decimal,
    pub stock_qty: i32,
    pub image_url: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Variant joined with its parent product.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantWithProduct {
    pub variant: Variant,
    pub product: Product,
}

impl VariantWithProduct {
    /// Current unit price: the product base price plus the variant surcharge.
    #[must_use]
    pub fn unit_price(&self) -> Decimal {
        self.product.base_price + self.variant.extra_price
    }
}

/// Editable product fields.
///
/// Updates replace every field; the image is managed elsewhere.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDetails {
    pub name: String,
    pub description: String,
    pub base_price: Decimal,
    pub category_id: Option<i64>,
}

/// Product with all of its variants, ordered by id.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductWithVariants {
    pub product: Product,
    pub variants: Vec<Variant>,
}

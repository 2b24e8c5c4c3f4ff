//! Cart response bodies.
//!
//! Money is rendered as a decimal string with two fraction digits.

use rust_decimal::Decimal;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use optical_store_app::domain::{
    carts::view::{CartItemView, CartView},
    catalog::models::VariantWithProduct,
};

pub(crate) fn money(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2))
}

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// Cart identifier
    pub id: i64,

    /// Owning user
    pub user_id: i64,

    /// Cart status (`active` or `converted`)
    pub status: String,

    /// Cart lines in insertion order
    pub items: Vec<CartItemResponse>,

    /// Sum of line quantities
    pub total_items: i64,

    /// Sum of `unit_price * qty` over all lines
    pub total_price: String,

    /// When the cart was created
    pub created_at: String,

    /// When the cart last changed
    pub updated_at: String,
}

impl From<CartView> for CartResponse {
    fn from(view: CartView) -> Self {
        Self {
            id: view.cart.id.into_i64(),
            user_id: view.cart.user_id.into_i64(),
            status: view.cart.status.to_string(),
            items: view.items.into_iter().map(CartItemResponse::from).collect(),
            total_items: view.total_items,
            total_price: money(view.total_price),
            created_at: view.cart.created_at.to_string(),
            updated_at: view.cart.updated_at.to_string(),
        }
    }
}

/// Cart Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemResponse {
    /// Cart item identifier
    pub id: i64,

    /// Cart the item belongs to
    pub cart_id: i64,

    /// Variant in this line
    pub product_variant_id: i64,

    /// Quantity in the cart
    pub qty: i32,

    /// Unit price captured when the variant was last added
    pub unit_price: String,

    /// `unit_price * qty`
    pub line_total: String,

    /// Current catalog data for the variant
    pub variant: CartVariantResponse,
}

impl From<CartItemView> for CartItemResponse {
    fn from(line: CartItemView) -> Self {
        Self {
            id: line.item.id.into_i64(),
            cart_id: line.item.cart_id.into_i64(),
            product_variant_id: line.item.variant_id.into_i64(),
            qty: line.item.quantity,
            unit_price: money(line.item.unit_price),
            line_total: money(line.line_total),
            variant: line.variant.into(),
        }
    }
}

/// Variant summary embedded in a cart line
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartVariantResponse {
    pub id: i64,
    pub sku: String,
    pub color: String,
    pub size: String,
    pub stock_qty: i32,
    pub extra_price: String,
    pub image_url: String,
    pub product: CartProductResponse,
}

/// Product summary embedded in a cart line
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartProductResponse {
    pub id: i64,
    pub name: String,
    pub image: String,
    pub base_price: String,
}

impl From<VariantWithProduct> for CartVariantResponse {
    fn from(VariantWithProduct { variant, product }: VariantWithProduct) -> Self {
        Self {
            id: variant.id.into_i64(),
            sku: variant.sku,
            color: variant.color,
            size: variant.size,
            stock_qty: variant.stock_qty,
            extra_price: money(variant.extra_price),
            image_url: variant.image_url,
            product: CartProductResponse {
                id: product.id.into_i64(),
                name: product.name,
                image: product.image,
                base_price: money(product.base_price),
            },
        }
    }
}

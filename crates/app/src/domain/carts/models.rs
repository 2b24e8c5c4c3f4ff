//! Cart Models

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    domain::{
        catalog::models::{VariantId, VariantWithProduct},
        users::models::UserId,
    },
    ids::TypedId,
};

/// Cart ID
pub type CartId = TypedId<Cart>;

/// Cart Item ID
pub type CartItemId = TypedId<CartItem>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartStatus {
    Active,
    Converted,
}

impl CartStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Converted => "converted",
        }
    }
}

impl fmt::Display for CartStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown cart status: {0}")]
pub struct UnknownCartStatus(pub String);

impl FromStr for CartStatus {
    type Err = UnknownCartStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "active" => Ok(Self::Active),
            "converted" => Ok(Self::Converted),
            other => Err(UnknownCartStatus(other.to_string())),
        }
    }
}

/// Cart Model
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    pub id: CartId,
    pub user_id: UserId,
    pub status: CartStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// CartItem Model
///
/// `unit_price` is the price captured when the variant was last added and is
/// not affected by later catalog price changes.
#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    pub id: CartItemId,
    pub cart_id: CartId,
    pub variant_id: VariantId,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request to add a quantity of a variant to the caller's active cart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AddCartItem {
    pub variant_id: VariantId,
    pub quantity: i32,
}

/// A cart item joined with the current catalog data of its variant.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub item: CartItem,
    pub variant: VariantWithProduct,
}

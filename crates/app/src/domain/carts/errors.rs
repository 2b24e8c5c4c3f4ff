//! Carts service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("quantity must be greater than zero")]
    NonPositiveQuantity,

    #[error("quantity must not be negative")]
    NegativeQuantity,

    #[error("identifier is not valid")]
    InvalidIdentifier,

    #[error("invalid data")]
    InvalidData,

    #[error("cart not found")]
    CartNotFound,

    #[error("cart item not found")]
    ItemNotFound,

    #[error("product variant not found")]
    VariantNotFound,

    #[error("insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: i64, available: i32 },

    #[error("storage error")]
    Sql(#[source] Error),
}

/// Broad classification of cart failures, used by callers to pick a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartsErrorKind {
    Validation,
    NotFound,
    InsufficientStock,
    Storage,
}

impl CartsServiceError {
    #[must_use]
    pub const fn kind(&self) -> CartsErrorKind {
        match self {
            Self::NonPositiveQuantity
            | Self::NegativeQuantity
            | Self::InvalidIdentifier
            | Self::InvalidData => CartsErrorKind::Validation,
            Self::CartNotFound | Self::ItemNotFound | Self::VariantNotFound => {
                CartsErrorKind::NotFound
            }
            Self::InsufficientStock { .. } => CartsErrorKind::InsufficientStock,
            Self::Sql(_) => CartsErrorKind::Storage,
        }
    }
}

impl From<Error> for CartsServiceError {
    fn from(error: Error) -> Self {
        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

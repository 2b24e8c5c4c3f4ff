//! Catalog service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogServiceError {
    #[error("catalog entry not found")]
    NotFound,

    #[error("product name is required")]
    MissingName,

    #[error("base price must be greater than zero")]
    InvalidPrice,

    #[error("related resource not found")]
    InvalidReference,

    #[error("product has variants held in carts")]
    InUse,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl CatalogServiceError {
    /// Translate a failed product delete, where a foreign key violation means
    /// cart lines still point at one of the product's variants.
    pub(crate) fn from_delete(error: Error) -> Self {
        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::ForeignKeyViolation) => Self::InUse,
            _ => error.into(),
        }
    }
}

impl From<Error> for CatalogServiceError {
    fn from(error: Error) -> Self {
        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::CheckViolation | ErrorKind::NotNullViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

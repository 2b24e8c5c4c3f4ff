//! Product Errors

use salvo::http::StatusError;
use tracing::error;

use optical_store_app::domain::catalog::CatalogServiceError;

pub(crate) fn into_status_error(error: CatalogServiceError) -> StatusError {
    match error {
        CatalogServiceError::NotFound => StatusError::not_found().brief("Product not found"),
        CatalogServiceError::MissingName => StatusError::bad_request().brief("Name is required"),
        CatalogServiceError::InvalidPrice => {
            StatusError::bad_request().brief("base_price must be greater than zero")
        }
        CatalogServiceError::InvalidReference => {
            StatusError::bad_request().brief("Unknown category")
        }
        CatalogServiceError::InvalidData => StatusError::bad_request().brief("Invalid product data"),
        CatalogServiceError::InUse => {
            StatusError::conflict().brief("Product has variants held in carts")
        }
        CatalogServiceError::Sql(source) => {
            error!("catalog storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}

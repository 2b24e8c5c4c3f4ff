//! Cart Errors

use salvo::http::StatusError;
use tracing::error;

use optical_store_app::domain::carts::{CartsErrorKind, CartsServiceError};

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    let brief = error.to_string();

    match error.kind() {
        CartsErrorKind::Validation => StatusError::bad_request().brief(brief),
        CartsErrorKind::NotFound => StatusError::not_found().brief(brief),
        CartsErrorKind::InsufficientStock => StatusError::conflict().brief(brief),
        CartsErrorKind::Storage => {
            error!(error = ?error, "cart storage failure");

            StatusError::internal_server_error()
        }
    }
}

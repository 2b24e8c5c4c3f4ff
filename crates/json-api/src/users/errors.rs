//! User Errors

use salvo::http::StatusError;
use tracing::error;

use optical_store_app::domain::users::UsersServiceError;

pub(crate) fn into_status_error(error: UsersServiceError) -> StatusError {
    match error {
        // The token resolved to a user that no longer exists.
        UsersServiceError::NotFound => StatusError::unauthorized().brief("Unknown user"),
        UsersServiceError::AlreadyExists => {
            StatusError::conflict().brief("Email is already registered")
        }
        UsersServiceError::InvalidEmail => StatusError::bad_request().brief("Invalid email address"),
        UsersServiceError::InvalidData => StatusError::bad_request().brief("Invalid user data"),
        UsersServiceError::Sql(source) => {
            error!("user storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn errors_map_to_statuses() {
        for (error, expected) in [
            (UsersServiceError::NotFound, StatusCode::UNAUTHORIZED),
            (UsersServiceError::AlreadyExists, StatusCode::CONFLICT),
            (UsersServiceError::InvalidEmail, StatusCode::BAD_REQUEST),
            (UsersServiceError::InvalidData, StatusCode::BAD_REQUEST),
            (
                UsersServiceError::Sql(sqlx_pool_timeout()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ] {
            let label = error.to_string();

            assert_eq!(into_status_error(error).code, expected, "{label}");
        }
    }

    fn sqlx_pool_timeout() -> optical_store_app::database::DatabaseError {
        optical_store_app::database::DatabaseError::PoolTimedOut
    }
}

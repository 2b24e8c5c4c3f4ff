//! Delete Profile Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{extensions::*, state::State, users::errors::into_status_error};

/// Delete Profile Handler
///
/// Deletes the authenticated user together with their tokens, carts and
/// addresses. The bearer token stops working immediately.
#[endpoint(
    tags("users"),
    summary = "Delete Profile",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Account deleted"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
    ),
)]
#[tracing::instrument(
    name = "profile.delete",
    skip(depot),
    fields(user_id = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_id_or_401()?;

    tracing::Span::current().record("user_id", user.into_i64());

    state
        .app
        .users
        .delete_user(user)
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}

//! Update Profile Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    state::State,
    users::{errors::into_status_error, responses::UserResponse},
};

/// Update Profile Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateProfileRequest {
    /// New login email; trimmed and checked for uniqueness
    pub email: String,
}

/// Update Profile Handler
///
/// Changes the authenticated user's email.
#[endpoint(
    tags("users"),
    summary = "Update Profile",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Updated user"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid email"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::CONFLICT, description = "Email already registered"),
    ),
)]
#[tracing::instrument(
    name = "profile.update",
    skip(json, depot),
    fields(user_id = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<UpdateProfileRequest>,
    depot: &mut Depot,
) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_id_or_401()?;

    tracing::Span::current().record("user_id", user.into_i64());

    let updated = state
        .app
        .users
        .update_email(user, &json.into_inner().email)
        .await
        .map_err(into_status_error)?;

    Ok(Json(updated.into()))
}

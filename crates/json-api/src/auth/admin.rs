//! Admin-only gate.
//!
//! Runs after the bearer middleware and lets the request through only when the
//! resolved user has the admin role.

use std::sync::Arc;

use salvo::prelude::*;
use tracing::{error, warn};

use optical_store_app::domain::users::{UsersServiceError, models::UserRole};

use crate::{extensions::*, state::State};

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    match require_admin(depot).await {
        Ok(()) => {
            ctrl.call_next(req, depot, res).await;
        }
        Err(status) => {
            res.render(status);
            ctrl.skip_rest();
        }
    }
}

async fn require_admin(depot: &Depot) -> Result<(), StatusError> {
    let user = depot.user_id_or_401()?;
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let found = match state.app.users.get_user(user).await {
        Ok(found) => found,
        Err(UsersServiceError::NotFound) => {
            return Err(StatusError::unauthorized().brief("Unknown user"));
        }
        Err(other) => {
            error!("failed to load user role: {other}");

            return Err(StatusError::internal_server_error());
        }
    };

    if found.role == UserRole::Admin {
        Ok(())
    } else {
        warn!(user_id = %user, "admin route refused");

        Err(StatusError::forbidden().brief("Admin role required"))
    }
}

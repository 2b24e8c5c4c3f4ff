//! Bearer token middleware.
//!
//! Resolves the `Authorization: Bearer <token>` header to a user id and
//! stores it in the depot for downstream handlers.

use std::sync::Arc;

use optical_store_app::auth::AuthServiceError;
use salvo::{http::header::AUTHORIZATION, prelude::*};
use tracing::{Span, error};

use crate::{extensions::*, state::State};

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    match authenticate(req, depot).await {
        Ok(()) => {
            ctrl.call_next(req, depot, res).await;
        }
        Err(status) => {
            res.render(status);
            ctrl.skip_rest();
        }
    }
}

async fn authenticate(req: &Request, depot: &mut Depot) -> Result<(), StatusError> {
    let token = extract_bearer_token(req)
        .ok_or_else(|| StatusError::unauthorized().brief("Missing or invalid Authorization header"))?;

    let state = depot.obtain_or_500::<Arc<State>>()?;

    let user = match state.app.auth.authenticate_bearer(token).await {
        Ok(user) => user,
        Err(AuthServiceError::NotFound | AuthServiceError::Token(_) | AuthServiceError::UnknownUser) => {
            return Err(StatusError::unauthorized().brief("Invalid API token"));
        }
        Err(AuthServiceError::Sql(source)) => {
            error!("failed to validate api token: {source}");

            return Err(StatusError::internal_server_error());
        }
    };

    Span::current().record("user_id", user.into_i64());

    depot.insert_user_id(user);

    Ok(())
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

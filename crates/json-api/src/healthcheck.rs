//! Readiness endpoint

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{extensions::*, state::State};

/// Overall and per-dependency status.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// `ok` when every dependency answers, otherwise `unavailable`
    pub status: String,

    /// `ok` or `unavailable`
    pub database: String,
}

fn label(healthy: bool) -> String {
    let label = if healthy { "ok" } else { "unavailable" };

    label.to_string()
}

/// Healthcheck handler
///
/// Pings the database; 503 when it does not answer.
#[endpoint(
    tags("health"),
    summary = "Health check endpoint",
    responses(
        (status_code = StatusCode::OK, description = "Database reachable"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Database unavailable"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<HealthResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let database = match state.app.check_database().await {
        Ok(()) => true,
        Err(error) => {
            warn!(%error, "healthcheck: database unavailable");
            false
        }
    };

    if !database {
        res.status_code(StatusCode::SERVICE_UNAVAILABLE);
    }

    Ok(Json(HealthResponse {
        status: label(database),
        database: label(database),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::{
        affix_state::inject,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use crate::test_helpers::TestServices;

    use super::*;

    #[tokio::test]
    async fn test_healthcheck_reports_database() -> TestResult {
        let router = Router::new()
            .hoop(inject(TestServices::default().into_state()))
            .push(Router::with_path("healthcheck").get(handler));

        let mut res = TestClient::get("http://example.com/healthcheck")
            .send(&Service::new(router))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK), "healthy");

        let body: HealthResponse = res.take_json().await?;

        assert_eq!(body.status, "ok", "overall status");
        assert_eq!(body.database, "ok", "database status");

        Ok(())
    }

    #[tokio::test]
    async fn test_healthcheck_without_state_is_500() {
        let router = Router::new().push(Router::with_path("healthcheck").get(handler));

        let res = TestClient::get("http://example.com/healthcheck")
            .send(&Service::new(router))
            .await;

        assert_eq!(
            res.status_code,
            Some(StatusCode::INTERNAL_SERVER_ERROR),
            "missing state"
        );
    }

    #[test]
    fn labels_follow_health() {
        assert_eq!(label(true), "ok", "healthy label");
        assert_eq!(label(false), "unavailable", "unhealthy label");
    }
}

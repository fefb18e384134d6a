//! Healthcheck Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, state::State};

/// Healthcheck response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Always `ok` when the server answers
    pub status: String,

    /// Server version
    pub version: String,

    /// Live queries currently following the change feed
    pub live_subscribers: usize,
}

/// Healthcheck handler
///
/// Reports that the server is up and how many live queries are running.
#[endpoint(tags("health"), summary = "Health check endpoint")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<HealthResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    Ok(Json(HealthResponse {
        status: "ok".to_owned(),
        version: env!("CARGO_PKG_VERSION").to_owned(),
        live_subscribers: state.app.feed.subscriber_count(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{idle_state, service};

    use super::*;

    #[tokio::test]
    async fn test_healthcheck_counts_live_subscribers() -> TestResult {
        let state = idle_state();
        let _following = state.app.feed.subscribe();

        let response: HealthResponse = TestClient::get("http://example.com/healthcheck")
            .send(&service(state, Router::with_path("healthcheck").get(handler)))
            .await
            .take_json()
            .await?;

        assert_eq!(response.status, "ok");
        assert_eq!(response.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(response.live_subscribers, 1);

        Ok(())
    }
}

//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: The curated photo API has no key configured
///
/// Upstreams are not contacted; the check reports configuration only, so it
/// stays cheap enough for frequent polling.
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "curated_api": { "status": "ok", "message": "API key configured" },
///     "fallback_chain": { "status": "ok", "message": "scrape -> encyclopedia" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let curated_check = check_curated(&state);
    let chain_check = check_chain(&state);

    let all_healthy = curated_check.status == "ok" && chain_check.status == "ok";

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            curated_api: curated_check,
            fallback_chain: chain_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Checks that the curated photo API can be called at all.
fn check_curated(state: &AppState) -> CheckStatus {
    if state.curated_configured {
        CheckStatus {
            status: "ok".to_string(),
            message: Some("API key configured".to_string()),
        }
    } else {
        CheckStatus {
            status: "error".to_string(),
            message: Some("API key missing".to_string()),
        }
    }
}

/// Reports the fallback chain order.
fn check_chain(state: &AppState) -> CheckStatus {
    let kinds = state.retrieval.chain_kinds();
    if kinds.is_empty() {
        return CheckStatus {
            status: "error".to_string(),
            message: Some("No image sources configured".to_string()),
        };
    }

    let order = kinds
        .iter()
        .map(|kind| kind.as_str())
        .collect::<Vec<_>>()
        .join(" -> ");

    CheckStatus {
        status: "ok".to_string(),
        message: Some(order),
    }
}

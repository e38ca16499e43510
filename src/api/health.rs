use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use tracing::warn;

use crate::controller::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    timestamp: chrono::DateTime<chrono::Utc>,
    checks: HealthChecks,
}

/// Individual health checks
#[derive(Debug, Serialize)]
pub struct HealthChecks {
    models: ComponentHealth,
}

/// Health status of a component
#[derive(Debug, Serialize)]
pub struct ComponentHealth {
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ComponentHealth {
    fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            error: None,
        }
    }

    fn unhealthy(error: String) -> Self {
        Self {
            status: "unhealthy".to_string(),
            error: Some(error),
        }
    }

    fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// Healthy once every target has a loaded estimator.
fn check_models(state: &AppState) -> ComponentHealth {
    match state.models.loaded() {
        Some(store) if store.is_complete() => ComponentHealth::healthy(),
        Some(store) => ComponentHealth::unhealthy(format!(
            "estimators loaded for {:?} only",
            store.targets()
        )),
        None => ComponentHealth::unhealthy("models not loaded".to_string()),
    }
}

/// GET /health - Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let models = check_models(&state);
    let all_healthy = models.is_healthy();

    let response = HealthResponse {
        status: if all_healthy {
            "healthy".to_string()
        } else {
            "degraded".to_string()
        },
        timestamp: chrono::Utc::now(),
        checks: HealthChecks { models },
    };

    let status_code = if all_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}

/// GET /health/ready - Readiness probe
///
/// Returns 200 once the model store is loaded and complete. A store that has
/// not been loaded yet is loaded here, so lazy loading still becomes ready.
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    if state.models.loaded().is_none() {
        if let Err(e) = state.models.get().await {
            warn!(error = %e, "model store not ready");
        }
    }

    if check_models(&state).is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// GET /health/live - Liveness probe
pub async fn liveness_check() -> impl IntoResponse {
    StatusCode::OK
}

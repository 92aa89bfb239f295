//! Liveness and readiness endpoints
//!
//! `/health` runs a smoke calculation through each analytics crate so a
//! broken numeric build shows up as `degraded` rather than `healthy`.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use pricer_core::math::rounding::round_to;
use pricer_core::math::solvers::{NewtonRaphsonSolver, SolverConfig};
use pricer_models::analytical::price_option;
use pricer_models::instruments::{OptionSpec, OptionType};
use serde::{Deserialize, Serialize};

use super::AppState;

/// ATM call S = K = 100, T = 1, σ = 20%, r = 5%
const REFERENCE_CALL_PRICE: f64 = 10.450583572185565;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// "healthy" when every smoke check passes, "degraded" otherwise
    pub status: String,
    /// Server version
    pub version: String,
    /// Seconds since the router was built
    pub uptime_secs: u64,
    /// Smoke check outcome per analytics crate
    pub dependencies: DependencyStatus,
}

/// Result of the per-crate smoke checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyStatus {
    /// Rounding and root finding answer known values
    pub pricer_core: bool,
    /// Reference option reprices to its published value
    pub pricer_models: bool,
}

impl DependencyStatus {
    /// Run every smoke check
    pub fn run_checks() -> Self {
        Self {
            pricer_core: core_answers(),
            pricer_models: models_answer(),
        }
    }

    /// Whether all checks passed
    pub fn all_ok(&self) -> bool {
        self.pricer_core && self.pricer_models
    }
}

fn core_answers() -> bool {
    let solver = NewtonRaphsonSolver::new(SolverConfig::new(1e-12, 50));
    let sqrt2 = solver.find_root_bounded(|x: f64| (x * x - 2.0, 2.0 * x), 1.0, 0.0, 2.0);
    sqrt2.converged() && round_to(sqrt2.root, 4) == 1.4142
}

fn models_answer() -> bool {
    OptionSpec::new(100.0, 100.0, 1.0, 0.2, 0.05, OptionType::Call)
        .map(|spec| (price_option(&spec).price - REFERENCE_CALL_PRICE).abs() < 1e-9)
        .unwrap_or(false)
}

/// Readiness response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadyResponse {
    /// Whether requests are accepted
    pub ready: bool,
}

/// Build the health routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/ready", get(ready_handler))
}

fn health_body(dependencies: DependencyStatus, uptime_secs: u64) -> (StatusCode, HealthResponse) {
    let (status, label) = if dependencies.all_ok() {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    let body = HealthResponse {
        status: label.to_string(),
        version: crate::VERSION.to_string(),
        uptime_secs,
        dependencies,
    };
    (status, body)
}

/// GET /health
async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let dependencies = DependencyStatus::run_checks();
    if !dependencies.all_ok() {
        tracing::error!(?dependencies, "Analytics smoke check failed");
    }

    let (status, body) = health_body(dependencies, state.start_time.elapsed().as_secs());
    (status, Json(body))
}

/// GET /ready
async fn ready_handler() -> Json<ReadyResponse> {
    Json(ReadyResponse { ready: true })
}

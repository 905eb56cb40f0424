//! Liveness and readiness probes.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

use crate::AppState;
use sweetify_db::migrations::migration_status;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: String,
    pub server_time: DateTime<Utc>,
}

impl HealthResponse {
    fn new(status: &'static str, message: impl Into<String>) -> Self {
        HealthResponse {
            status,
            message: message.into(),
            server_time: Utc::now(),
        }
    }
}

/// `GET /`
pub async fn banner() -> &'static str {
    "Sweetify API is running"
}

/// `GET /health`
///
/// The process is up; says nothing about the database.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::new("ok", "Sweetify API is running"))
}

/// `GET /health/ready`
///
/// 503 until the database answers and every migration has been applied.
pub async fn readiness(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let (status, message) = check_database(&state).await;
    let code = if status == "ok" {
        StatusCode::OK
    } else {
        warn!(%message, "Readiness check failed");
        StatusCode::SERVICE_UNAVAILABLE
    };
    (code, Json(HealthResponse::new(status, message)))
}

async fn check_database(state: &AppState) -> (&'static str, String) {
    if !state.db().health_check().await {
        return ("unavailable", "Database unreachable".to_string());
    }

    match migration_status(state.db().pool()).await {
        Ok((total, applied)) if applied >= total => ("ok", "All systems operational".to_string()),
        Ok((total, applied)) => (
            "unavailable",
            format!("Migrations pending: {applied}/{total} applied"),
        ),
        Err(e) => ("unavailable", format!("Database error: {e}")),
    }
}

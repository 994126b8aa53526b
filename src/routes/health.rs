//! Health check endpoint for container orchestration.
//!
//! Provides a liveness probe that returns 200 OK whenever the process can
//! answer HTTP. It reads neither the hostname nor the clock.

use axum::Json;
use serde::Serialize;

use crate::config::HEALTH_STATUS;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
}

/// Health check handler. Always `{"status":"ok"}`.
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: HEALTH_STATUS,
    })
}

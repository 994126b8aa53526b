//! Root endpoint: service status plus host identity and request time.

use axum::{extract::State, Extension, Json};
use serde::Serialize;
use tracing::instrument;

use crate::config::{SERVICE_NAME, SERVICE_STATUS};
use crate::error::{AppErrorResponse, ResultExt};
use crate::middleware::RequestId;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub status: &'static str,
    pub service: &'static str,
    pub hostname: String,
    pub timestamp: String,
}

/// Reports that the service is up, which host answered, and when.
#[instrument(name = "home::index", skip(state, request_id))]
pub async fn index(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> Result<Json<ServiceInfo>, AppErrorResponse> {
    let hostname = state.hostname().with_request_id(&request_id)?;

    Ok(Json(ServiceInfo {
        status: SERVICE_STATUS,
        service: SERVICE_NAME,
        hostname,
        timestamp: state.timestamp(),
    }))
}

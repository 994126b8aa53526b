//! Demo data endpoint: a fixed item list plus host identity and request time.

use axum::{extract::State, Extension, Json};
use serde::Serialize;
use tracing::instrument;

use crate::config::{DATA_ITEMS, DATA_MESSAGE};
use crate::error::{AppErrorResponse, ResultExt};
use crate::middleware::RequestId;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct DataPayload {
    pub message: &'static str,
    pub data: ItemList,
    pub hostname: String,
    pub timestamp: String,
}

/// Items with their count. The count is always derived from the list.
#[derive(Debug, Serialize)]
pub struct ItemList {
    items: Vec<&'static str>,
    count: usize,
}

impl ItemList {
    pub fn new(items: Vec<&'static str>) -> Self {
        let count = items.len();
        Self { items, count }
    }

    pub fn items(&self) -> &[&'static str] {
        &self.items
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

#[instrument(name = "data::get_data", skip(state, request_id))]
pub async fn get_data(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> Result<Json<DataPayload>, AppErrorResponse> {
    let hostname = state.hostname().with_request_id(&request_id)?;

    Ok(Json(DataPayload {
        message: DATA_MESSAGE,
        data: ItemList::new(DATA_ITEMS.to_vec()),
        hostname,
        timestamp: state.timestamp(),
    }))
}

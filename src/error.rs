use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::io;

use crate::middleware::RequestId;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Hostname unavailable: {0}")]
    HostIdentity(#[source] io::Error),
}

/// JSON body for every error response the service produces itself.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub status: u16,
    pub request_id: String,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::HostIdentity(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn into_body(self, request_id: &RequestId) -> (StatusCode, ErrorBody) {
        let status = self.status();
        let message = match &self {
            AppError::NotFound(path) => {
                tracing::debug!(%path, "No route matched");
                "Not found".to_string()
            }
            AppError::HostIdentity(_) => {
                tracing::error!("Internal error: {:?}", self);
                "Internal server error".to_string()
            }
        };

        let body = ErrorBody {
            error: message,
            status: status.as_u16(),
            request_id: request_id.0.to_string(),
        };
        (status, body)
    }
}

/// An `AppError` tagged with the request it occurred in, so the caller can
/// quote the ID back when reporting a failure.
#[derive(Debug)]
pub struct AppErrorResponse {
    pub error: AppError,
    pub request_id: RequestId,
}

impl IntoResponse for AppErrorResponse {
    fn into_response(self) -> Response {
        let (status, body) = self.error.into_body(&self.request_id);
        (status, Json(body)).into_response()
    }
}

/// Attach a request ID to a handler result's error.
pub trait ResultExt<T> {
    fn with_request_id(self, request_id: &RequestId) -> Result<T, AppErrorResponse>;
}

impl<T> ResultExt<T> for Result<T, AppError> {
    fn with_request_id(self, request_id: &RequestId) -> Result<T, AppErrorResponse> {
        self.map_err(|error| AppErrorResponse {
            error,
            request_id: *request_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn request_id() -> RequestId {
        RequestId(Uuid::new_v4())
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::NotFound("/nope".to_string()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::HostIdentity(io::Error::other("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_internal_details_are_not_leaked() {
        let id = request_id();
        let response = AppErrorResponse {
            error: AppError::HostIdentity(io::Error::other("secret detail")),
            request_id: id,
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.headers()["content-type"], "application/json");

        let json = body_json(response).await;
        assert_eq!(
            json,
            serde_json::json!({
                "error": "Internal server error",
                "status": 500,
                "request_id": id.0.to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_with_request_id_tags_error() {
        let id = request_id();
        let result: Result<(), AppError> = Err(AppError::NotFound("/x".to_string()));
        let response = result.with_request_id(&id).unwrap_err().into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let json = body_json(response).await;
        assert_eq!(json["error"], "Not found");
        assert_eq!(json["request_id"], id.0.to_string());
    }
}

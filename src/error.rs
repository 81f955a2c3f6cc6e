use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::vendors::VendorError;

/// Request-level error taxonomy. Every variant maps to one status code
/// and a `{"message": ...}` body, which is what the frontend reads.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Auth(String),

    #[error("{0}")]
    NotFound(String),

    #[error("database error")]
    Persistence(#[from] anyhow::Error),

    #[error("vendor error")]
    Upstream(#[from] VendorError),

    /// Vendor status and raw body forwarded verbatim (STT/TTS only).
    #[error("vendor returned {status}")]
    VendorStatus { status: u16, body: String },
}

impl ApiError {
    /// Speech adapters keep the vendor's own status and error body;
    /// everything else about the failure stays generic.
    pub fn passthrough(e: VendorError) -> Self {
        match e {
            VendorError::Status { status, body } => ApiError::VendorStatus { status, body },
            other => ApiError::Upstream(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Validation(m) => (StatusCode::BAD_REQUEST, m),
            ApiError::Conflict(m) => (StatusCode::CONFLICT, m),
            ApiError::Auth(m) => (StatusCode::UNAUTHORIZED, m),
            ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m),
            ApiError::Persistence(e) => {
                error!(error = %e, "persistence error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A database error occurred".to_string(),
                )
            }
            ApiError::Upstream(e) => {
                error!(error = %e, "vendor call failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "External service request failed".to_string(),
                )
            }
            ApiError::VendorStatus { status, body } => {
                error!(status, "vendor error passthrough");
                let code =
                    StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                return (code, body).into_response();
            }
        };
        (status, Json(json!({ "message": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passthrough_keeps_vendor_status() {
        let err = ApiError::passthrough(VendorError::Status {
            status: 422,
            body: "bad audio".into(),
        });
        assert!(matches!(err, ApiError::VendorStatus { status: 422, .. }));
    }

    #[test]
    fn passthrough_wraps_other_vendor_errors() {
        let err = ApiError::passthrough(VendorError::Request("timeout".into()));
        assert!(matches!(err, ApiError::Upstream(_)));
    }
}

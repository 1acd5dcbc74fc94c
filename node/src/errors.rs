// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use pixelcrush_kernel::KernelError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Kernel error: {0}")]
    Kernel(#[from] KernelError),
    /// Failed admin check. Rendered exactly like an unknown route.
    #[error("Not found")]
    NotFound,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Internal server error")]
    Internal,
}

impl IntoResponse for EngineError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            EngineError::NotFound => return StatusCode::NOT_FOUND.into_response(),
            EngineError::Kernel(k_err) if k_err.is_client_error() => (StatusCode::BAD_REQUEST, k_err.to_string()),
            EngineError::Kernel(k_err) => {
                tracing::error!("Kernel failure: {}", k_err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            EngineError::Io(e) => {
                tracing::error!("IO failure: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            EngineError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

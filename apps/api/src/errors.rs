use std::sync::atomic::{AtomicBool, Ordering};

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::portfolio::store::StoreError;

/// Whether 500 bodies carry the underlying error text. Set once at startup.
static EXPOSE_ERROR_DETAILS: AtomicBool = AtomicBool::new(false);

pub fn set_expose_error_details(expose: bool) {
    EXPOSE_ERROR_DETAILS.store(expose, Ordering::Relaxed);
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

/// Uniform error body: `{ "message": ..., "error"?: ... }`.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Builds the response body. Server faults only carry detail when
    /// `expose_details` is set (development deployments).
    pub fn body(&self, expose_details: bool) -> ErrorBody {
        match self {
            AppError::NotFound(msg) => ErrorBody {
                message: msg.clone(),
                error: None,
            },
            AppError::MethodNotAllowed => ErrorBody {
                message: "Method not allowed".to_string(),
                error: None,
            },
            AppError::Store(e) => ErrorBody {
                message: "Internal server error".to_string(),
                error: expose_details.then(|| e.to_string()),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Store(e) = &self {
            tracing::error!("Storage error: {e}");
        }

        let status = self.status();
        let body = Json(self.body(EXPOSE_ERROR_DETAILS.load(Ordering::Relaxed)));

        let mut response = (status, body).into_response();
        if status == StatusCode::METHOD_NOT_ALLOWED {
            response.headers_mut().insert(
                header::ALLOW,
                HeaderValue::from_static("GET, HEAD, OPTIONS"),
            );
        }
        response
    }
}

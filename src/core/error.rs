use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::features::batch::services::ParseError;
use crate::features::qr::RenderError;
use crate::modules::storage::StorageError;
use crate::shared::types::ErrorResponse;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("CSV parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Validation(_) | AppError::BadRequest(_) | AppError::Parse(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Storage(StorageError::InvalidKey(_)) => StatusCode::BAD_REQUEST,
            AppError::Render(_) | AppError::Storage(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message safe to hand to the client; server-side details stay in the logs
    fn client_message(&self, server_error_message: &str) -> String {
        match self {
            AppError::Validation(msg)
            | AppError::BadRequest(msg)
            | AppError::PayloadTooLarge(msg) => msg.clone(),
            AppError::Parse(e) => format!("Invalid CSV file: {}", e),
            AppError::Storage(StorageError::InvalidKey(msg)) => msg.clone(),
            AppError::Render(_) | AppError::Storage(_) | AppError::Internal(_) => {
                server_error_message.to_string()
            }
        }
    }

    fn log(&self) {
        match self {
            AppError::Render(e) => tracing::error!("Render error: {}", e),
            AppError::Storage(StorageError::InvalidKey(_)) => {}
            AppError::Storage(e) => tracing::error!("Storage error: {:?}", e),
            AppError::Internal(msg) => tracing::error!("Internal error: {}", msg),
            _ => {}
        }
    }

    /// Render the error as a JSON body with a custom message for server errors
    pub fn into_json_response(self, server_error_message: &str) -> Response {
        self.log();
        let status = self.status_code();
        let details = match &self {
            AppError::Validation(msg) => Some(vec![msg.clone()]),
            _ => None,
        };
        let body = ErrorResponse {
            error: self.client_message(server_error_message),
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.into_json_response("Internal server error")
    }
}

/// Wraps an [`AppError`] so it renders as a `text/plain` body instead of JSON.
///
/// The batch upload endpoint answers failures this way.
#[derive(Debug)]
pub struct PlainTextError {
    inner: AppError,
    server_error_message: &'static str,
}

impl PlainTextError {
    pub fn new(inner: AppError, server_error_message: &'static str) -> Self {
        Self {
            inner,
            server_error_message,
        }
    }
}

impl IntoResponse for PlainTextError {
    fn into_response(self) -> Response {
        self.inner.log();
        let status = self.inner.status_code();
        let message = self.inner.client_message(self.server_error_message);

        (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            message,
        )
            .into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

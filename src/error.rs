use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
};
use serde::Serialize;

use crate::api::response;

/// One mismatch between model output and the expected record shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Dotted path to the offending value, e.g. `articles[0].url`. Empty for the document root.
    pub loc: String,
    pub msg: String,
}

impl FieldError {
    pub fn new(loc: impl Into<String>, msg: impl Into<String>) -> Self {
        Self { loc: loc.into(), msg: msg.into() }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Failed to fetch page content: {0}")]
    FetchError(String),

    #[error("LLM processing error: {0}")]
    LlmError(String),

    #[error("Data validation error")]
    ValidationError(Vec<FieldError>),

    #[error("Unparseable model output: {0}")]
    UnparseableOutput(String),

    #[error("'{0}' query parameter is required")]
    MissingParameter(&'static str),

    #[error("Invalid query string: {0}")]
    InvalidQuery(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Request processing timed out")]
    Timeout,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::UnparseableOutput(_)
            | AppError::MissingParameter(_)
            | AppError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            AppError::Timeout => StatusCode::REQUEST_TIMEOUT,
            AppError::FetchError(_)
            | AppError::LlmError(_)
            | AppError::Http(_)
            | AppError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Collapses any error into a plain 500 `{error}` body.
    pub fn into_server_error(self) -> Response {
        response::error(StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            AppError::ValidationError(details) => {
                response::error_with_details(status, "Data validation error", details)
            }
            AppError::UnparseableOutput(msg) => response::error_with_details(
                status,
                "Unparseable model output",
                vec![FieldError::new("", msg)],
            ),
            // Upstream rendering errors stay in the logs.
            AppError::FetchError(_) => response::error(status, "Failed to fetch page content"),
            other => response::error(status, other.to_string()),
        }
        .into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

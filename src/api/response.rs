use serde::Serialize;
use axum::Json;
use axum::http::StatusCode;
use chrono::Utc;

use crate::api::models::HealthResponse;
use crate::error::FieldError;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

pub fn success<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(data))
}

pub fn error(status: StatusCode, message: impl Into<String>) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
            details: None,
        }),
    )
}

pub fn error_with_details(
    status: StatusCode,
    message: impl Into<String>,
    details: Vec<FieldError>,
) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
            details: Some(details),
        }),
    )
}

pub fn health() -> (StatusCode, Json<HealthResponse>) {
    success(HealthResponse {
        status: "healthy",
        timestamp: Utc::now().to_rfc3339(),
    })
}

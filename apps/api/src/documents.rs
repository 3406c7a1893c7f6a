// Plumbing shared by the résumé and cover-letter handlers.

use axum::{
    http::{header, StatusCode},
    response::IntoResponse,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::errors::AppError;

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Accepts content either as a JSON object or as a string holding JSON.
pub fn decode_content<T: DeserializeOwned>(raw: Value) -> Result<T, AppError> {
    let value = match raw {
        Value::Null => return Err(AppError::Validation("content is required".to_string())),
        Value::String(text) => serde_json::from_str(&text)
            .map_err(|e| AppError::Validation(format!("content is not valid JSON: {e}")))?,
        other => other,
    };
    serde_json::from_value(value)
        .map_err(|e| AppError::Validation(format!("content has an invalid shape: {e}")))
}

/// Rehydrates stored content. Rows are validated on the way in, so a failure here
/// means the stored JSON was altered out of band.
pub fn stored_content<T: DeserializeOwned>(raw: Value) -> Result<T, AppError> {
    serde_json::from_value(raw)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("stored content is unreadable: {e}")))
}

pub fn pdf_attachment(filename: String, bytes: Vec<u8>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
}

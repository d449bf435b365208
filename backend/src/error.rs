//! Error handling for the Crop Advisor Platform
//!
//! Every error maps to a stable machine-readable code in the response body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::catalog::CatalogError;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Input resolution errors
    #[error("Unknown soil type: {0}")]
    UnknownSoilType(String),

    #[error("Crop not found: {0}")]
    CropNotFound(i64),

    #[error("No cost data for crop: {0}")]
    NoCostBaseline(i64),

    // Validation errors
    #[error("Validation error: {message}")]
    Validation { field: String, message: String },

    // Reference data errors
    #[error("Reference catalog error: {0}")]
    Catalog(#[from] CatalogError),

    // Database errors
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    // Internal errors
    #[error("Internal server error")]
    InternalError(#[from] anyhow::Error),
}

impl AppError {
    /// Validation failure on a single request field
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = match &self {
            AppError::UnknownSoilType(code) => (
                StatusCode::NOT_FOUND,
                ErrorDetail {
                    code: "UNKNOWN_SOIL_TYPE".to_string(),
                    message: format!("Unknown soil type: {}", code),
                    field: Some("soil_type".to_string()),
                },
            ),
            AppError::CropNotFound(crop_id) => (
                StatusCode::NOT_FOUND,
                ErrorDetail {
                    code: "CROP_NOT_FOUND".to_string(),
                    message: format!("Crop not found: {}", crop_id),
                    field: Some("crop_id".to_string()),
                },
            ),
            AppError::NoCostBaseline(crop_id) => (
                StatusCode::NOT_FOUND,
                ErrorDetail {
                    code: "NO_COST_BASELINE".to_string(),
                    message: format!("No cost data for crop: {}", crop_id),
                    field: Some("crop_id".to_string()),
                },
            ),
            AppError::Validation { field, message } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message: message.clone(),
                    field: Some(field.clone()),
                },
            ),
            AppError::Catalog(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "CATALOG_ERROR".to_string(),
                    message: "Reference data is inconsistent".to_string(),
                    field: None,
                },
            ),
            AppError::DatabaseError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "DATABASE_ERROR".to_string(),
                    message: "A database error occurred".to_string(),
                    field: None,
                },
            ),
            AppError::InternalError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "INTERNAL_ERROR".to_string(),
                    message: "An internal server error occurred".to_string(),
                    field: None,
                },
            ),
        };

        if status.is_server_error() {
            tracing::error!("Error: {:?}", self);
        } else {
            tracing::debug!("Request rejected: {}", self);
        }

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers and services
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_errors_are_not_found() {
        assert_eq!(
            AppError::UnknownSoilType("PEAT".into()).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::CropNotFound(7).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::NoCostBaseline(7).into_response().status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn validation_error_is_bad_request() {
        let err = AppError::validation("land_area_acres", "Land area must be positive");
        assert_eq!(err.to_string(), "Validation error: Land area must be positive");
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}

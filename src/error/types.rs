//! API error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::validation::FieldErrors;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    Validation(FieldErrors),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Body rendered for this error
    pub fn body(&self) -> serde_json::Value {
        let body = match self {
            ApiError::Validation(errors) => serde_json::to_value(ValidationErrorResponse {
                error: ValidationErrorDetail {
                    type_: "invalid_request_error".to_string(),
                    message: errors.clone(),
                },
            }),
            ApiError::Forbidden(msg) => serde_json::to_value(ErrorResponse {
                error: ErrorDetail {
                    type_: "authorization_error".to_string(),
                    message: msg.clone(),
                },
            }),
            ApiError::NotFound(msg) => serde_json::to_value(NotFoundResponse {
                details: msg.clone(),
            }),
            ApiError::Internal(err) => serde_json::to_value(ErrorResponse {
                error: ErrorDetail {
                    type_: "server_error".to_string(),
                    message: err.to_string(),
                },
            }),
        };
        body.unwrap_or_default()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            ApiError::Internal(err) => tracing::error!(error = %err, "Request failed"),
            ApiError::Validation(errors) => {
                tracing::debug!(invalid_fields = errors.len(), "Request rejected")
            }
            _ => {}
        }

        (status, Json(self.body())).into_response()
    }
}

/// 400 body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationErrorResponse {
    pub error: ValidationErrorDetail,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationErrorDetail {
    #[serde(rename = "type")]
    pub type_: String,
    pub message: FieldErrors,
}

/// 403 and 500 body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
    #[serde(rename = "type")]
    pub type_: String,
    pub message: String,
}

/// 404 body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotFoundResponse {
    pub details: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validation_shape() {
        let mut errors = FieldErrors::new();
        errors.add("providers", "This field is required.");
        let err = ApiError::Validation(errors);

        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.body(),
            json!({
                "error": {
                    "type": "invalid_request_error",
                    "message": {"providers": ["This field is required."]}
                }
            })
        );
    }

    #[test]
    fn test_not_found_shape() {
        let err = ApiError::NotFound("Not found.".into());
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.body(), json!({"details": "Not found."}));
    }

    #[test]
    fn test_forbidden_and_internal_shapes() {
        let forbidden: ErrorResponse =
            serde_json::from_value(ApiError::Forbidden("No access".into()).body()).unwrap();
        assert_eq!(forbidden.error.type_, "authorization_error");
        assert_eq!(forbidden.error.message, "No access");

        let internal = ApiError::from(anyhow::anyhow!("boom"));
        assert_eq!(internal.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: ErrorResponse = serde_json::from_value(internal.body()).unwrap();
        assert_eq!(body.error.type_, "server_error");
        assert_eq!(body.error.message, "boom");
    }

    #[test]
    fn test_bodies_match_catalogue_schemas() {
        use crate::catalog::errors;
        use crate::validation::{validate_value, ValidationOptions};

        let strict = ValidationOptions::strict();
        let cases = [
            (ApiError::Validation(FieldErrors::non_field("x")), errors::validation_error()),
            (ApiError::Forbidden("x".into()), errors::forbidden_error()),
            (ApiError::NotFound("x".into()), errors::not_found_error()),
            (ApiError::from(anyhow::anyhow!("x")), errors::server_error()),
        ];
        for (err, schema) in cases {
            assert!(validate_value(&schema, &err.body(), strict).is_ok(), "{:?}", err);
        }
    }
}

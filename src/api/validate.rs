//! Conformance endpoints
//!
//! POST /v1/validate/:feature/:subfeature/request and
//! POST /v1/validate/:feature/:subfeature/response check a body against the
//! catalogue and the typed models. A conforming body gets a 200 summary;
//! anything else gets the regular 400 error shape.

use axum::{
    body::Bytes,
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::operations::lookup;
use crate::catalog::OperationKind;
use crate::error::ApiError;
use crate::server::state::AppState;
use crate::validation::{check_request, check_response, FieldErrors};

/// Body of a successful validation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationSummary {
    pub valid: bool,
    pub operation: String,
    /// Providers named by the body
    pub providers: Vec<String>,
}

/// POST /v1/validate/:feature/:subfeature/request
pub async fn validate_request_body(
    State(state): State<AppState>,
    Path((feature, subfeature)): Path<(String, String)>,
    body: Bytes,
) -> Result<Json<ValidationSummary>, ApiError> {
    let op = lookup(&state, &feature, &subfeature)?;
    let body = parse_json(&body)?;

    let result = check_request(op.kind, &body, state.validation_options());
    log_outcome(op.kind, "request", &result);
    result?;

    let providers = body
        .get("providers")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    Ok(Json(ValidationSummary {
        valid: true,
        operation: op.path(),
        providers,
    }))
}

/// POST /v1/validate/:feature/:subfeature/response
pub async fn validate_response_body(
    State(state): State<AppState>,
    Path((feature, subfeature)): Path<(String, String)>,
    body: Bytes,
) -> Result<Json<ValidationSummary>, ApiError> {
    let op = lookup(&state, &feature, &subfeature)?;
    let body = parse_json(&body)?;

    let result = check_response(op.kind, &body, state.validation_options());
    log_outcome(op.kind, "response", &result);
    result?;

    let providers = match &body {
        Value::Object(map) => map.keys().cloned().collect(),
        Value::Array(items) => items
            .iter()
            .filter_map(|item| item.get("provider").and_then(Value::as_str))
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    };

    Ok(Json(ValidationSummary {
        valid: true,
        operation: op.path(),
        providers,
    }))
}

/// Parse a raw body, reporting syntax errors the way field errors are reported
pub(crate) fn parse_json(body: &[u8]) -> Result<Value, ApiError> {
    serde_json::from_slice(body)
        .map_err(|e| ApiError::Validation(FieldErrors::non_field(format!("JSON parse error: {}", e))))
}

fn log_outcome(kind: OperationKind, direction: &str, result: &Result<(), ApiError>) {
    match result {
        Ok(()) => tracing::debug!(operation = %kind, direction, "Body conforms"),
        Err(ApiError::Validation(errors)) => tracing::warn!(
            operation = %kind,
            direction,
            invalid_fields = errors.len(),
            "Body does not conform"
        ),
        Err(e) => tracing::error!(operation = %kind, direction, error = %e, "Validation failed"),
    }
}

//! Catalogue browsing endpoints
//!
//! GET /v1/operations, GET /v1/operations/:feature/:subfeature and
//! GET /v1/openapi.json.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::catalog::{Operation, OperationKind};
use crate::error::ApiError;
use crate::server::state::AppState;

/// One entry of the operation listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationSummary {
    pub path: String,
    pub name: String,
    pub description: String,
    pub providers: Vec<String>,
}

impl From<&Operation> for OperationSummary {
    fn from(op: &Operation) -> Self {
        Self {
            path: op.path(),
            name: op.name.clone(),
            description: op.description.clone(),
            providers: op.providers.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationList {
    pub object: String,
    pub data: Vec<OperationSummary>,
}

/// Full description of an operation: JSON Schemas for the request and for
/// every documented response status, plus an example request
pub fn operation_descriptor(op: &Operation) -> Value {
    let responses: Map<String, Value> = op
        .responses()
        .into_iter()
        .map(|(status, schema)| (status.to_string(), schema.to_json_schema()))
        .collect();

    json!({
        "path": op.path(),
        "name": op.name,
        "description": op.description,
        "providers": op.providers,
        "request": op.request.to_json_schema(),
        "responses": responses,
        "example_request": op.example_request(),
    })
}

/// Resolve `:feature/:subfeature` to an operation or a 404
pub(crate) fn lookup(
    state: &AppState,
    feature: &str,
    subfeature: &str,
) -> Result<&'static Operation, ApiError> {
    OperationKind::from_parts(feature, subfeature)
        .and_then(|kind| state.catalog.find(kind))
        .ok_or_else(|| ApiError::NotFound(format!("Unknown operation: {}/{}", feature, subfeature)))
}

/// GET /v1/operations
pub async fn list_operations(State(state): State<AppState>) -> Json<OperationList> {
    Json(OperationList {
        object: "list".to_string(),
        data: state.catalog.iter().map(OperationSummary::from).collect(),
    })
}

/// GET /v1/operations/:feature/:subfeature
pub async fn get_operation(
    State(state): State<AppState>,
    Path((feature, subfeature)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
    let op = lookup(&state, &feature, &subfeature)?;
    Ok(Json(operation_descriptor(op)))
}

/// GET /v1/openapi.json
pub async fn openapi(State(state): State<AppState>) -> Json<Value> {
    Json(state.openapi.as_ref().clone())
}

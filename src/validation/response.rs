//! Conformance of 200 response bodies
//!
//! A body is either an object keyed by provider or a list of envelopes that
//! each carry a `provider` field. Every envelope is checked against the
//! success schema or the failure schema depending on its `status`.

use serde_json::Value;

use super::request::check;
use super::{index_path, FieldErrors, ValidationOptions};
use crate::catalog::{errors, Operation};
use crate::schemas::Status;

/// Validate a whole 200 body (dict or list form)
pub fn validate_response(
    operation: &Operation,
    body: &Value,
    options: ValidationOptions,
) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    match body {
        Value::Object(map) => {
            for (provider, envelope) in map {
                check_envelope(operation, provider, envelope, provider, options, &mut errors);
            }
        }
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                let path = index_path("", index);
                match item.get("provider").and_then(Value::as_str) {
                    Some(provider) => {
                        check_envelope(operation, provider, item, &path, options, &mut errors)
                    }
                    None => errors.add(&format!("{}.provider", path), "This field is required."),
                }
            }
        }
        _ => errors.add("", "Expected a dictionary or a list of provider results."),
    }

    if !errors.is_empty() {
        tracing::debug!(
            operation = %operation.kind,
            invalid_fields = errors.len(),
            "Response does not conform"
        );
    }
    errors.into_result()
}

/// Validate one provider's envelope, reporting paths relative to it
pub fn validate_provider_response(
    operation: &Operation,
    provider: &str,
    envelope: &Value,
    options: ValidationOptions,
) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    check_envelope(operation, provider, envelope, "", options, &mut errors);
    errors.into_result()
}

fn check_envelope(
    operation: &Operation,
    provider: &str,
    envelope: &Value,
    path: &str,
    options: ValidationOptions,
    errors: &mut FieldErrors,
) {
    let Some(success) = operation.provider_schema(provider) else {
        errors.add(path, format!("\"{}\" does not serve {}.", provider, operation.kind));
        return;
    };

    // List entries carry their provider name next to the envelope fields
    let mut envelope = envelope.clone();
    if let Some(map) = envelope.as_object_mut() {
        map.remove("provider");
    }

    let status = envelope.get("status").and_then(Value::as_str);
    if status == Some(Status::Fail.as_str()) {
        check(&errors::provider_failure(), &envelope, path, options, errors);
    } else {
        check(success, &envelope, path, options, errors);
    }
}

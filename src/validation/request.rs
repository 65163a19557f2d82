//! Schema validation of JSON values
//!
//! Messages follow the phrasing clients of the API already parse
//! ("This field is required.", "Ensure this field has no more than 5
//! elements.", ...).

use serde_json::{Map, Value};

use super::{index_path, join_path, FieldErrors, ValidationOptions};
use crate::catalog::{Operation, Schema, SchemaKind};

/// Validate a request body against an operation's request schema
pub fn validate_request(
    operation: &Operation,
    body: &Value,
    options: ValidationOptions,
) -> Result<(), FieldErrors> {
    let result = validate_value(&operation.request, body, options);
    match &result {
        Ok(()) => tracing::debug!(operation = %operation.kind, "Request conforms"),
        Err(errors) => tracing::debug!(
            operation = %operation.kind,
            invalid_fields = errors.len(),
            "Request rejected"
        ),
    }
    result
}

/// Validate any value against a schema, collecting every violation
pub fn validate_value(
    schema: &Schema,
    value: &Value,
    options: ValidationOptions,
) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    check(schema, value, "", options, &mut errors);
    errors.into_result()
}

pub(crate) fn check(
    schema: &Schema,
    value: &Value,
    path: &str,
    options: ValidationOptions,
    errors: &mut FieldErrors,
) {
    if value.is_null() {
        if !schema.nullable && schema.kind != SchemaKind::Any {
            errors.add(path, "This field may not be null.");
        }
        return;
    }

    if let Some(allowed) = &schema.enumeration {
        if !allowed.iter().any(|candidate| same_value(candidate, value)) {
            errors.add(path, format!("\"{}\" is not a valid choice.", display_value(value)));
            return;
        }
    }

    match &schema.kind {
        SchemaKind::String => check_string(schema, value, path, errors),
        SchemaKind::Number => {
            if !value.is_number() {
                errors.add(path, "A valid number is required.");
                return;
            }
            check_bounds(schema, value, path, errors);
        }
        SchemaKind::Integer => {
            if !(value.is_i64() || value.is_u64()) {
                errors.add(path, "A valid integer is required.");
                return;
            }
            check_bounds(schema, value, path, errors);
        }
        SchemaKind::Boolean => {
            if !value.is_boolean() {
                errors.add(path, "Must be a valid boolean.");
            }
        }
        SchemaKind::Array { items } => check_array(schema, items, value, path, options, errors),
        SchemaKind::Object {
            properties: _,
            additional_properties,
        } => match value.as_object() {
            Some(map) => check_object(schema, additional_properties.as_deref(), map, path, options, errors),
            None => errors.add(
                path,
                format!(
                    "Expected a dictionary of items but got type \"{}\".",
                    json_type(value)
                ),
            ),
        },
        SchemaKind::Any => {}
        SchemaKind::OneOf { variants } => check_one_of(variants, value, path, options, errors),
    }
}

/// Accept the value if any variant does; otherwise report the variant that
/// came closest (fewest invalid parameters, first declared on a tie)
fn check_one_of(
    variants: &[Schema],
    value: &Value,
    path: &str,
    options: ValidationOptions,
    errors: &mut FieldErrors,
) {
    let mut closest: Option<FieldErrors> = None;
    for variant in variants {
        let mut attempt = FieldErrors::new();
        check(variant, value, path, options, &mut attempt);
        if attempt.is_empty() {
            return;
        }
        if closest.as_ref().map_or(true, |best| attempt.len() < best.len()) {
            closest = Some(attempt);
        }
    }
    if let Some(closest) = closest {
        errors.merge(closest);
    }
}

fn check_string(schema: &Schema, value: &Value, path: &str, errors: &mut FieldErrors) {
    let Some(s) = value.as_str() else {
        errors.add(path, "Not a valid string.");
        return;
    };
    let length = s.chars().count();

    if let Some(min) = schema.constraints.min_length {
        if length < min {
            if s.trim().is_empty() && min == 1 {
                errors.add(path, "This field may not be blank.");
            } else {
                errors.add(path, format!("Ensure this field has at least {} characters.", min));
            }
        }
    }
    if let Some(max) = schema.constraints.max_length {
        if length > max {
            errors.add(path, format!("Ensure this field has no more than {} characters.", max));
        }
    }
}

fn check_bounds(schema: &Schema, value: &Value, path: &str, errors: &mut FieldErrors) {
    let Some(n) = value.as_f64() else {
        return;
    };
    if let Some(min) = schema.constraints.minimum {
        if n < min {
            errors.add(path, format!("Ensure this value is greater than or equal to {}.", min));
        }
    }
    if let Some(max) = schema.constraints.maximum {
        if n > max {
            errors.add(path, format!("Ensure this value is less than or equal to {}.", max));
        }
    }
}

fn check_array(
    schema: &Schema,
    items: &Schema,
    value: &Value,
    path: &str,
    options: ValidationOptions,
    errors: &mut FieldErrors,
) {
    let Some(list) = value.as_array() else {
        errors.add(
            path,
            format!("Expected a list of items but got type \"{}\".", json_type(value)),
        );
        return;
    };

    if let Some(min) = schema.constraints.min_items {
        if list.len() < min {
            if list.is_empty() {
                errors.add(path, "This list may not be empty.");
            } else {
                errors.add(path, format!("Ensure this field has at least {} elements.", min));
            }
        }
    }
    if let Some(max) = schema.constraints.max_items {
        if list.len() > max {
            errors.add(path, format!("Ensure this field has no more than {} elements.", max));
        }
    }

    for (index, item) in list.iter().enumerate() {
        check(items, item, &index_path(path, index), options, errors);
    }
}

fn check_object(
    schema: &Schema,
    additional: Option<&Schema>,
    map: &Map<String, Value>,
    path: &str,
    options: ValidationOptions,
    errors: &mut FieldErrors,
) {
    for property in schema.properties() {
        let child = join_path(path, &property.name);
        match map.get(&property.name) {
            Some(value) => check(&property.schema, value, &child, options, errors),
            None if property.required => errors.add(&child, "This field is required."),
            None => {}
        }
    }

    for (key, value) in map {
        if schema.property_schema(key).is_some() {
            continue;
        }
        let child = join_path(path, key);
        match additional {
            Some(values) => check(values, value, &child, options, errors),
            None if options.reject_unknown_fields => errors.add(&child, "Unknown field."),
            None => {}
        }
    }
}

/// Equality that treats `1` and `1.0` as the same number
fn same_value(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        _ => a == b,
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, OperationKind};
    use serde_json::json;

    fn generation() -> &'static Operation {
        Catalog::builtin().get(OperationKind::TextGeneration)
    }

    fn check_body(kind: OperationKind, body: Value) -> Result<(), FieldErrors> {
        validate_request(Catalog::builtin().get(kind), &body, ValidationOptions::default())
    }

    #[test]
    fn test_minimal_generation_request_is_valid() {
        let body = json!({"providers": ["openai"], "text": "Hello"});
        assert!(validate_request(generation(), &body, ValidationOptions::default()).is_ok());
    }

    #[test]
    fn test_missing_providers_rejected() {
        let errors = check_body(OperationKind::TextGeneration, json!({"text": "Hello"})).unwrap_err();
        assert_eq!(errors.get("providers").unwrap(), ["This field is required."]);
    }

    #[test]
    fn test_every_operation_rejects_missing_providers() {
        for op in Catalog::builtin().iter() {
            let mut body = op.example_request();
            body.as_object_mut().unwrap().remove("providers");
            let errors = validate_request(op, &body, ValidationOptions::default()).unwrap_err();
            assert!(errors.contains("providers"), "{}", op.kind);
        }
    }

    #[test]
    fn test_blank_text_and_empty_providers() {
        let errors = check_body(
            OperationKind::TextGeneration,
            json!({"providers": [], "text": ""}),
        )
        .unwrap_err();
        assert_eq!(errors.get("providers").unwrap(), ["This list may not be empty."]);
        assert_eq!(errors.get("text").unwrap(), ["This field may not be blank."]);
    }

    #[test]
    fn test_temperature_bounds_per_operation() {
        let too_hot = json!({"providers": ["openai"], "text": "Hi", "temperature": 1.5});
        let errors = check_body(OperationKind::TextGeneration, too_hot.clone()).unwrap_err();
        assert_eq!(
            errors.get("temperature").unwrap(),
            ["Ensure this value is less than or equal to 1."]
        );
        assert!(check_body(OperationKind::Chat, too_hot).is_ok());

        let boiling = json!({"providers": ["openai"], "text": "Hi", "temperature": 2.1});
        assert!(check_body(OperationKind::Chat, boiling).unwrap_err().contains("temperature"));

        let negative = json!({"providers": ["openai"], "text": "Hi", "temperature": -0.1});
        let errors = check_body(OperationKind::Chat, negative).unwrap_err();
        assert_eq!(
            errors.get("temperature").unwrap(),
            ["Ensure this value is greater than or equal to 0."]
        );
    }

    #[test]
    fn test_fallback_providers_limit() {
        let five = json!({
            "providers": ["openai"],
            "fallback_providers": ["anthropic", "google", "cohere", "mistral", "meta"],
            "text": "Hi"
        });
        assert!(check_body(OperationKind::TextGeneration, five).is_ok());

        let six = json!({
            "providers": ["openai"],
            "fallback_providers": ["anthropic", "google", "cohere", "mistral", "meta", "amazon"],
            "text": "Hi"
        });
        let errors = check_body(OperationKind::TextGeneration, six).unwrap_err();
        assert_eq!(
            errors.get("fallback_providers").unwrap(),
            ["Ensure this field has no more than 5 elements."]
        );
    }

    #[test]
    fn test_unknown_provider_is_invalid_choice() {
        let body = json!({"providers": ["openai", "acme"], "text": "Hi"});
        let errors = check_body(OperationKind::TextGeneration, body).unwrap_err();
        assert_eq!(errors.get("providers[1]").unwrap(), ["\"acme\" is not a valid choice."]);
    }

    #[test]
    fn test_type_mismatches() {
        let body = json!({
            "providers": "openai",
            "text": 42,
            "max_tokens": 10.5,
            "response_as_dict": "yes"
        });
        let errors = check_body(OperationKind::TextGeneration, body).unwrap_err();
        assert_eq!(
            errors.get("providers").unwrap(),
            ["Expected a list of items but got type \"str\"."]
        );
        assert_eq!(errors.get("text").unwrap(), ["Not a valid string."]);
        assert_eq!(errors.get("max_tokens").unwrap(), ["A valid integer is required."]);
        assert_eq!(errors.get("response_as_dict").unwrap(), ["Must be a valid boolean."]);
    }

    #[test]
    fn test_null_required_field() {
        let body = json!({"providers": ["openai"], "text": null});
        let errors = check_body(OperationKind::TextGeneration, body).unwrap_err();
        assert_eq!(errors.get("text").unwrap(), ["This field may not be null."]);
    }

    #[test]
    fn test_nullable_language_accepts_null() {
        let body = json!({"providers": ["google"], "text": "Hi", "language": null});
        assert!(check_body(OperationKind::SentimentAnalysis, body).is_ok());
    }

    #[test]
    fn test_nested_paths() {
        let body = json!({
            "providers": ["openai"],
            "text": "Hi",
            "previous_history": [
                {"role": "user", "message": "a"},
                {"role": "system", "message": "b"},
                {"message": "c"}
            ]
        });
        let errors = check_body(OperationKind::Chat, body).unwrap_err();
        assert_eq!(
            errors.get("previous_history[1].role").unwrap(),
            ["\"system\" is not a valid choice."]
        );
        assert_eq!(
            errors.get("previous_history[2].role").unwrap(),
            ["This field is required."]
        );
    }

    #[test]
    fn test_settings_values_must_be_strings() {
        let body = json!({"providers": ["openai"], "text": "Hi", "settings": {"openai": 4}});
        let errors = check_body(OperationKind::TextGeneration, body).unwrap_err();
        assert!(errors.contains("settings.openai"));
    }

    #[test]
    fn test_pairs_must_have_two_items() {
        let body = json!({
            "providers": ["cohere"],
            "texts": ["a"],
            "labels": ["x", "y"],
            "examples": [["only one"]]
        });
        let errors = check_body(OperationKind::CustomClassification, body).unwrap_err();
        assert_eq!(
            errors.get("examples[0]").unwrap(),
            ["Ensure this field has at least 2 elements."]
        );
    }

    #[test]
    fn test_unknown_fields_only_rejected_when_strict() {
        let body = json!({"providers": ["openai"], "text": "Hi", "foo": 1});
        assert!(validate_request(generation(), &body, ValidationOptions::default()).is_ok());

        let errors = validate_request(generation(), &body, ValidationOptions::strict()).unwrap_err();
        assert_eq!(errors.get("foo").unwrap(), ["Unknown field."]);
    }

    #[test]
    fn test_body_must_be_object() {
        let errors = check_body(OperationKind::TextGeneration, json!(["openai"])).unwrap_err();
        assert_eq!(
            errors.get("non_field_errors").unwrap(),
            ["Expected a dictionary of items but got type \"list\"."]
        );
    }

    #[test]
    fn test_every_example_request_is_valid() {
        for op in Catalog::builtin().iter() {
            let body = op.example_request();
            let result = validate_request(op, &body, ValidationOptions::strict());
            assert!(result.is_ok(), "{}: {:?}", op.kind, result);
        }
    }

    #[test]
    fn test_integer_enumeration() {
        let schema = Schema::integer().one_of(1..=5);
        assert!(validate_value(&schema, &json!(3), ValidationOptions::default()).is_ok());
        assert!(validate_value(&schema, &json!(6), ValidationOptions::default()).is_err());
    }
}

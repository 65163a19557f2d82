//! Decoding into the typed models
//!
//! A body is checked against the catalogue first, so clients get messages
//! keyed by parameter, then decoded with serde, then checked with the
//! `validator` constraints declared on the model.

use serde::de::DeserializeOwned;
use serde_json::Value;
use validator::{ValidationErrors, ValidationErrorsKind};

use super::{index_path, join_path, validate_request, validate_response, FieldErrors, ValidationOptions};
use crate::catalog::{Catalog, OperationKind};
use crate::error::ApiError;
use crate::schemas::*;

/// Fields of these nested structs are reported without a prefix
const FLATTENED_FIELDS: &[&str] = &["common"];

/// Validate and decode a request body into its typed model
pub fn decode_request<T: OperationRequest>(
    body: Value,
    options: ValidationOptions,
) -> Result<T, ApiError> {
    let operation = Catalog::builtin().get(T::OPERATION);
    validate_request(operation, &body, options).map_err(ApiError::Validation)?;

    let request: T = serde_json::from_value(body)
        .map_err(|e| ApiError::Validation(FieldErrors::non_field(format!("Invalid payload: {}", e))))?;

    request
        .validate()
        .map_err(|e| ApiError::Validation(field_errors(&e)))?;

    Ok(request)
}

/// Validate and decode a 200 body into per-provider typed results
pub fn decode_response<T: DeserializeOwned>(
    kind: OperationKind,
    body: Value,
    options: ValidationOptions,
) -> Result<ProviderResponses<T>, ApiError> {
    let operation = Catalog::builtin().get(kind);
    validate_response(operation, &body, options).map_err(ApiError::Validation)?;

    serde_json::from_value(body)
        .map_err(|e| ApiError::Validation(FieldErrors::non_field(format!("Invalid payload: {}", e))))
}

/// Convert `validator` output to parameter-keyed messages
pub fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    let mut out = FieldErrors::new();
    collect(errors, "", &mut out);
    out
}

fn collect(errors: &ValidationErrors, path: &str, out: &mut FieldErrors) {
    for (field, kind) in errors.errors() {
        let field = field.to_string();
        let child = join_path(path, &field);
        match kind {
            ValidationErrorsKind::Field(list) => {
                for error in list {
                    out.add(&child, message_for(error));
                }
            }
            ValidationErrorsKind::Struct(nested) => {
                if FLATTENED_FIELDS.contains(&field.as_str()) {
                    collect(nested, path, out);
                } else {
                    collect(nested, &child, out);
                }
            }
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect(nested, &index_path(&child, *index), out);
                }
            }
        }
    }
}

fn message_for(error: &validator::ValidationError) -> String {
    if let Some(message) = &error.message {
        return message.to_string();
    }

    let param = |name: &str| {
        error
            .params
            .get(name)
            .map(|v| v.as_f64().map_or_else(|| v.to_string(), |n| n.to_string()))
    };
    let value = error.params.get("value");
    let unit = match value {
        Some(Value::Array(_)) => "elements",
        _ => "characters",
    };

    match error.code.as_ref() {
        "length" => match (param("min"), param("max")) {
            (Some(min), _) if is_empty(value) && min == "1" => match value {
                Some(Value::Array(_)) => "This list may not be empty.".to_string(),
                _ => "This field may not be blank.".to_string(),
            },
            (Some(min), Some(max)) => format!("Ensure this field has between {} and {} {}.", min, max, unit),
            (Some(min), None) => format!("Ensure this field has at least {} {}.", min, unit),
            (None, Some(max)) => format!("Ensure this field has no more than {} {}.", max, unit),
            (None, None) => "Invalid length.".to_string(),
        },
        "range" => match (param("min"), param("max")) {
            (Some(min), Some(max)) => format!("Ensure this value is between {} and {}.", min, max),
            (Some(min), None) => format!("Ensure this value is greater than or equal to {}.", min),
            (None, Some(max)) => format!("Ensure this value is less than or equal to {}.", max),
            (None, None) => "Value out of range.".to_string(),
        },
        code => format!("Invalid value ({}).", code),
    }
}

fn is_empty(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Array(items)) => items.is_empty(),
        Some(Value::String(s)) => s.is_empty(),
        _ => false,
    }
}

/// Declares the kind -> typed model table used for dynamic dispatch
macro_rules! typed_dispatch {
    ($($kind:ident => $request:ty,)+) => {
        /// Decode a request body with the typed model of `kind`
        pub fn check_request(
            kind: OperationKind,
            body: &Value,
            options: ValidationOptions,
        ) -> Result<(), ApiError> {
            match kind {
                $(OperationKind::$kind => decode_request::<$request>(body.clone(), options).map(drop),)+
            }
        }

        /// Decode a 200 body with the typed output of `kind`
        pub fn check_response(
            kind: OperationKind,
            body: &Value,
            options: ValidationOptions,
        ) -> Result<(), ApiError> {
            match kind {
                $(OperationKind::$kind => decode_response::<<$request as OperationRequest>::Output>(
                    kind,
                    body.clone(),
                    options,
                )
                .map(drop),)+
            }
        }
    };
}

typed_dispatch! {
    TextGeneration => TextGenerationRequest,
    Chat => ChatRequest,
    Embeddings => EmbeddingsRequest,
    SentimentAnalysis => SentimentAnalysisRequest,
    Moderation => ModerationRequest,
    SpellCheck => SpellCheckRequest,
    Summarize => SummarizeRequest,
    Search => SearchRequest,
    TopicExtraction => TopicExtractionRequest,
    NamedEntityRecognition => NamedEntityRecognitionRequest,
    Anonymization => AnonymizationRequest,
    PlagiaDetection => PlagiaDetectionRequest,
    PromptOptimization => PromptOptimizationRequest,
    AiDetection => AiDetectionRequest,
    CustomClassification => CustomClassificationRequest,
    CustomNamedEntityRecognition => CustomNamedEntityRecognitionRequest,
    QuestionAnswer => QuestionAnswerRequest,
    CodeGeneration => CodeGenerationRequest,
}

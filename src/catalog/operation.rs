//! Operation descriptors
//!
//! An `Operation` ties together the request schema, the normalized
//! per-provider output schema and the providers that serve it.

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::errors;
use super::schema::Schema;

/// Feature every operation in this catalogue belongs to
pub const TEXT_FEATURE: &str = "text";

// ============================================================================
// Operation Kind
// ============================================================================

/// Identifier of a catalogued operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "String")]
pub enum OperationKind {
    TextGeneration,
    Chat,
    Embeddings,
    SentimentAnalysis,
    Moderation,
    SpellCheck,
    Summarize,
    Search,
    TopicExtraction,
    NamedEntityRecognition,
    Anonymization,
    PlagiaDetection,
    PromptOptimization,
    AiDetection,
    CustomClassification,
    CustomNamedEntityRecognition,
    QuestionAnswer,
    CodeGeneration,
}

impl OperationKind {
    pub const ALL: [OperationKind; 18] = [
        OperationKind::TextGeneration,
        OperationKind::Chat,
        OperationKind::Embeddings,
        OperationKind::SentimentAnalysis,
        OperationKind::Moderation,
        OperationKind::SpellCheck,
        OperationKind::Summarize,
        OperationKind::Search,
        OperationKind::TopicExtraction,
        OperationKind::NamedEntityRecognition,
        OperationKind::Anonymization,
        OperationKind::PlagiaDetection,
        OperationKind::PromptOptimization,
        OperationKind::AiDetection,
        OperationKind::CustomClassification,
        OperationKind::CustomNamedEntityRecognition,
        OperationKind::QuestionAnswer,
        OperationKind::CodeGeneration,
    ];

    /// Second path segment, e.g. `sentiment_analysis`
    pub fn subfeature(&self) -> &'static str {
        match self {
            OperationKind::TextGeneration => "generation",
            OperationKind::Chat => "chat",
            OperationKind::Embeddings => "embeddings",
            OperationKind::SentimentAnalysis => "sentiment_analysis",
            OperationKind::Moderation => "moderation",
            OperationKind::SpellCheck => "spell_check",
            OperationKind::Summarize => "summarize",
            OperationKind::Search => "search",
            OperationKind::TopicExtraction => "topic_extraction",
            OperationKind::NamedEntityRecognition => "named_entity_recognition",
            OperationKind::Anonymization => "anonymization",
            OperationKind::PlagiaDetection => "plagia_detection",
            OperationKind::PromptOptimization => "prompt_optimization",
            OperationKind::AiDetection => "ai_detection",
            OperationKind::CustomClassification => "custom_classification",
            OperationKind::CustomNamedEntityRecognition => "custom_named_entity_recognition",
            OperationKind::QuestionAnswer => "question_answer",
            OperationKind::CodeGeneration => "code_generation",
        }
    }

    pub fn feature(&self) -> &'static str {
        TEXT_FEATURE
    }

    /// `text/<subfeature>`
    pub fn path(&self) -> String {
        format!("{}/{}", self.feature(), self.subfeature())
    }

    /// Resolve a `(feature, subfeature)` pair as found in URLs
    pub fn from_parts(feature: &str, subfeature: &str) -> Option<Self> {
        if feature != TEXT_FEATURE {
            return None;
        }
        Self::ALL.into_iter().find(|k| k.subfeature() == subfeature)
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.feature(), self.subfeature())
    }
}

impl From<OperationKind> for String {
    fn from(kind: OperationKind) -> Self {
        kind.path()
    }
}

impl FromStr for OperationKind {
    type Err = String;

    /// Accepts `text/generation`, `/text/generation` or just `generation`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_matches('/');
        let found = match trimmed.split_once('/') {
            Some((feature, subfeature)) => Self::from_parts(feature, subfeature),
            None => Self::from_parts(TEXT_FEATURE, trimmed),
        };
        found.ok_or_else(|| format!("Unknown operation: {}", s))
    }
}

// ============================================================================
// Operation
// ============================================================================

/// Full contract of one operation
#[derive(Debug, Clone, Serialize)]
pub struct Operation {
    pub kind: OperationKind,
    pub name: String,
    pub description: String,
    pub providers: Vec<String>,
    /// Request body (object schema, common parameters included)
    pub request: Schema,
    /// Provider envelope on success, shared by every provider
    pub output: Schema,
}

impl Operation {
    pub fn path(&self) -> String {
        self.kind.path()
    }

    pub fn supports(&self, provider: &str) -> bool {
        self.providers.iter().any(|p| p == provider)
    }

    /// Success envelope for one provider, if it serves this operation
    pub fn provider_schema(&self, provider: &str) -> Option<&Schema> {
        self.supports(provider).then_some(&self.output)
    }

    /// One provider's entry in a 200 body: the success envelope or the
    /// failure envelope, selected by `status`
    pub fn provider_envelope(&self) -> Schema {
        Schema::union([self.output.clone(), errors::provider_failure()])
            .description("Provider result; `status` tells success from failure")
    }

    /// Provider name -> envelope schema
    pub fn provider_schemas(&self) -> BTreeMap<&str, Schema> {
        let envelope = self.provider_envelope();
        self.providers
            .iter()
            .map(|p| (p.as_str(), envelope.clone()))
            .collect()
    }

    /// 200 body in dict form: every provider key is optional
    pub fn success_schema(&self) -> Schema {
        let envelope = self.provider_envelope();
        self.providers.iter().fold(
            Schema::object().description("Results keyed by provider name"),
            |schema, provider| schema.optional(provider, envelope.clone()),
        )
    }

    /// Response schema per HTTP status
    pub fn responses(&self) -> Vec<(u16, Schema)> {
        vec![
            (200, self.success_schema()),
            (400, errors::validation_error()),
            (403, errors::forbidden_error()),
            (404, errors::not_found_error()),
            (500, errors::server_error()),
        ]
    }

    /// A request body built from declared examples and defaults
    ///
    /// Only required parameters are filled in; `providers` names the first
    /// provider of the operation.
    pub fn example_request(&self) -> Value {
        let mut body = match self.request.sample() {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        if let Some(provider) = self.providers.first() {
            body.insert("providers".into(), Value::Array(vec![Value::String(provider.clone())]));
        }
        Value::Object(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_are_unique() {
        let mut paths: Vec<String> = OperationKind::ALL.iter().map(|k| k.path()).collect();
        paths.sort();
        paths.dedup();
        assert_eq!(paths.len(), OperationKind::ALL.len());
    }

    #[test]
    fn test_parse_variants() {
        assert_eq!("text/generation".parse(), Ok(OperationKind::TextGeneration));
        assert_eq!("/text/chat/".parse(), Ok(OperationKind::Chat));
        assert_eq!("spell_check".parse(), Ok(OperationKind::SpellCheck));
        assert!("image/generation".parse::<OperationKind>().is_err());
        assert!("text/translate".parse::<OperationKind>().is_err());
    }

    #[test]
    fn test_display_matches_path() {
        for kind in OperationKind::ALL {
            assert_eq!(kind.to_string(), kind.path());
            assert_eq!(kind.path().parse(), Ok(kind));
        }
    }

    #[test]
    fn test_success_schema_accepts_both_envelopes() {
        use crate::catalog::Catalog;
        use crate::validation::{validate_value, ValidationOptions};

        let op = Catalog::builtin().get(OperationKind::TextGeneration);
        let (status, ok) = op.responses().into_iter().next().unwrap();
        assert_eq!(status, 200);

        let failed = serde_json::json!({
            "openai": {"status": "fail", "error": {"message": "Timeout"}}
        });
        assert!(validate_value(&ok, &failed, ValidationOptions::default()).is_ok());

        let succeeded = serde_json::json!({
            "openai": {"status": "sucess", "generated_text": "Hi"}
        });
        assert!(validate_value(&ok, &succeeded, ValidationOptions::default()).is_ok());

        let neither = serde_json::json!({"openai": {"status": "fail"}});
        let errors = validate_value(&ok, &neither, ValidationOptions::default()).unwrap_err();
        assert!(errors.contains("openai.error"), "{:?}", errors);
    }

    #[test]
    fn test_serializes_as_path() {
        let value = serde_json::to_value(OperationKind::AiDetection).unwrap();
        assert_eq!(value, "text/ai_detection");
    }
}

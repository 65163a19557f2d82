//! Operations driven by caller-supplied labels and examples

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::CommonParams;

// ============================================================================
// Custom Classification
// ============================================================================

/// POST text/custom_classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CustomClassificationRequest {
    #[serde(flatten)]
    #[validate(nested)]
    pub common: CommonParams,

    /// Inputs to classify
    #[validate(length(min = 1))]
    pub texts: Vec<String>,

    /// Candidate labels
    #[validate(length(min = 2))]
    pub labels: Vec<String>,

    /// Labelled `[text, label]` examples
    #[validate(length(min = 1))]
    pub examples: Vec<[String; 2]>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub input: String,
    pub label: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomClassificationOutput {
    pub classifications: Vec<Classification>,
}

// ============================================================================
// Custom Named Entity Recognition
// ============================================================================

/// Entity annotated inside an example text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityAnnotation {
    pub entity: String,
    pub category: String,
}

/// Worked example for custom NER
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct EntityExample {
    #[validate(length(min = 1))]
    pub text: String,
    pub entities: Vec<EntityAnnotation>,
}

/// POST text/custom_named_entity_recognition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CustomNamedEntityRecognitionRequest {
    #[serde(flatten)]
    #[validate(nested)]
    pub common: CommonParams,

    #[validate(length(min = 1))]
    pub text: String,

    /// Entity categories to extract
    #[validate(length(min = 2))]
    pub entities: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[validate(nested)]
    pub examples: Vec<EntityExample>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomNamedEntityRecognitionOutput {
    pub items: Vec<EntityAnnotation>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classification_needs_two_labels() {
        let request: CustomClassificationRequest = serde_json::from_value(json!({
            "providers": ["cohere"],
            "texts": ["Confirm your email address"],
            "labels": ["Spam"],
            "examples": [["Win a free prize", "Spam"]]
        }))
        .unwrap();
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("labels"));
    }

    #[test]
    fn test_custom_ner_needs_two_entities() {
        let one: CustomNamedEntityRecognitionRequest = serde_json::from_value(json!({
            "providers": ["openai"],
            "text": "Barack Obama was born in Hawaii",
            "entities": ["Person"]
        }))
        .unwrap();
        assert!(one.validate().is_err());

        let two: CustomNamedEntityRecognitionRequest = serde_json::from_value(json!({
            "providers": ["openai"],
            "text": "Barack Obama was born in Hawaii",
            "entities": ["Person", "Location"]
        }))
        .unwrap();
        assert!(two.validate().is_ok());
    }
}

//! Text analysis operations
//!
//! Sentiment, moderation, spell check, topic extraction, named entities,
//! anonymization, AI-content detection and plagiarism detection. Most of
//! these take a single `text` and an optional `language`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use super::{
    AiPrediction, AnonymizationCategory, CommonParams, ModerationCategory, ModerationSubcategory,
    Sentiment,
};

/// Declare a request that carries `text` and an optional `language`
macro_rules! text_language_request {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
        pub struct $name {
            #[serde(flatten)]
            #[validate(nested)]
            pub common: CommonParams,

            #[validate(length(min = 1))]
            pub text: String,

            /// ISO language code, detected when absent
            #[serde(default, skip_serializing_if = "Option::is_none")]
            pub language: Option<String>,
        }

        impl $name {
            pub fn new(common: CommonParams, text: impl Into<String>) -> Self {
                Self {
                    common,
                    text: text.into(),
                    language: None,
                }
            }

            pub fn with_language(mut self, language: impl Into<String>) -> Self {
                self.language = Some(language.into());
                self
            }
        }
    };
}

// ============================================================================
// Sentiment Analysis
// ============================================================================

text_language_request! {
    /// POST text/sentiment_analysis
    SentimentAnalysisRequest
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentSentiment {
    pub segment: String,
    pub sentiment: Sentiment,
    pub sentiment_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentAnalysisOutput {
    pub general_sentiment: Sentiment,
    pub general_sentiment_rate: f64,
    pub items: Vec<SegmentSentiment>,
}

// ============================================================================
// Moderation
// ============================================================================

text_language_request! {
    /// POST text/moderation
    ModerationRequest
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModerationItem {
    pub label: String,
    /// 1 (very unlikely) to 5 (very likely)
    pub likelihood: u8,
    pub category: ModerationCategory,
    pub subcategory: ModerationSubcategory,
    pub likelihood_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModerationOutput {
    /// 0 (clean) to 5 (certainly unsafe)
    pub nsfw_likelihood: u8,
    pub nsfw_likelihood_score: f64,
    pub items: Vec<ModerationItem>,
}

// ============================================================================
// Spell Check
// ============================================================================

text_language_request! {
    /// POST text/spell_check
    SpellCheckRequest
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub suggestion: String,
    pub score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpellCheckItem {
    pub text: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    pub offset: u64,
    pub length: u64,
    pub suggestions: Vec<Suggestion>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpellCheckOutput {
    pub text: String,
    pub items: Vec<SpellCheckItem>,
}

// ============================================================================
// Topic Extraction
// ============================================================================

text_language_request! {
    /// POST text/topic_extraction
    TopicExtractionRequest
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    pub category: String,
    pub importance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicExtractionOutput {
    pub items: Vec<Topic>,
}

// ============================================================================
// Named Entity Recognition
// ============================================================================

text_language_request! {
    /// POST text/named_entity_recognition
    NamedEntityRecognitionRequest
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizedEntity {
    pub entity: String,
    pub category: String,
    pub importance: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedEntityRecognitionOutput {
    pub items: Vec<RecognizedEntity>,
}

// ============================================================================
// Anonymization
// ============================================================================

text_language_request! {
    /// POST text/anonymization
    AnonymizationRequest
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnonymizedEntity {
    pub offset: u64,
    pub length: u64,
    pub category: AnonymizationCategory,
    pub subcategory: String,
    pub original_label: String,
    pub content: String,
    pub confidence_score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnonymizationOutput {
    /// Input text with sensitive spans masked
    pub result: String,
    pub entities: Vec<AnonymizedEntity>,
}

// ============================================================================
// AI Detection
// ============================================================================

/// POST text/ai_detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct AiDetectionRequest {
    #[serde(flatten)]
    #[validate(nested)]
    pub common: CommonParams,

    #[validate(length(min = 1))]
    pub text: String,

    /// Extra parameters forwarded to specific providers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_params: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiDetectionItem {
    pub text: String,
    pub prediction: AiPrediction,
    pub ai_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiDetectionOutput {
    pub ai_score: f64,
    pub items: Vec<AiDetectionItem>,
}

// ============================================================================
// Plagiarism Detection
// ============================================================================

/// POST text/plagia_detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct PlagiaDetectionRequest {
    #[serde(flatten)]
    #[validate(nested)]
    pub common: CommonParams,

    #[validate(length(min = 1))]
    pub text: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_params: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlagiaCandidate {
    pub url: String,
    pub plagia_score: f64,
    pub prediction: String,
    pub plagiarized_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlagiaDetectionItem {
    pub text: String,
    pub candidates: Vec<PlagiaCandidate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlagiaDetectionOutput {
    pub plagia_score: f64,
    pub items: Vec<PlagiaDetectionItem>,
}

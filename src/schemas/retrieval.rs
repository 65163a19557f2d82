//! Retrieval-style operations: embeddings, semantic search, question
//! answering and summarization

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{CommonParams, ProviderSettings, SimilarityMetric};

fn default_output_sentences() -> u32 {
    1
}

// ============================================================================
// Embeddings
// ============================================================================

/// POST text/embeddings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct EmbeddingsRequest {
    #[serde(flatten)]
    #[validate(nested)]
    pub common: CommonParams,

    #[validate(length(min = 1))]
    pub texts: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<ProviderSettings>,
}

impl EmbeddingsRequest {
    pub fn new<I, S>(common: CommonParams, texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            common,
            texts: texts.into_iter().map(Into::into).collect(),
            settings: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Embedding {
    pub embedding: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingsOutput {
    pub items: Vec<Embedding>,
}

// ============================================================================
// Search
// ============================================================================

/// POST text/search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct SearchRequest {
    #[serde(flatten)]
    #[validate(nested)]
    pub common: CommonParams,

    /// Documents to rank
    #[validate(length(min = 1))]
    pub texts: Vec<String>,

    #[validate(length(min = 1))]
    pub query: String,

    #[serde(default)]
    pub similarity_metric: SimilarityMetric,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<ProviderSettings>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub object: String,
    /// Index into the request `texts`
    pub document: u64,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchOutput {
    pub items: Vec<SearchHit>,
}

// ============================================================================
// Question Answering
// ============================================================================

/// POST text/question_answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct QuestionAnswerRequest {
    #[serde(flatten)]
    #[validate(nested)]
    pub common: CommonParams,

    /// Context documents
    #[validate(length(min = 1))]
    pub texts: Vec<String>,

    #[validate(length(min = 1))]
    pub question: String,

    /// Context used by the few-shot examples
    #[validate(length(min = 1))]
    pub examples_context: String,

    /// Few-shot `[question, answer]` pairs
    #[validate(length(min = 1))]
    pub examples: Vec<[String; 2]>,

    #[serde(default)]
    #[validate(range(min = 0.0, max = 1.0))]
    pub temperature: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<ProviderSettings>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionAnswerOutput {
    pub answers: Vec<String>,
}

// ============================================================================
// Summarize
// ============================================================================

/// POST text/summarize
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct SummarizeRequest {
    #[serde(flatten)]
    #[validate(nested)]
    pub common: CommonParams,

    #[validate(length(min = 1))]
    pub text: String,

    #[serde(default = "default_output_sentences")]
    #[validate(range(min = 1))]
    pub output_sentences: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<ProviderSettings>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummarizeOutput {
    pub result: String,
}

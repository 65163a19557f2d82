//! Schema module
//!
//! Typed request and response models for every text operation. These mirror
//! the catalogue in `crate::catalog` and add `validator` constraints so a
//! decoded request is known to be within bounds.

use serde::{de::DeserializeOwned, Serialize};
use validator::Validate;

use crate::catalog::OperationKind;

/// Declare a closed string enumeration with its exact wire spelling
///
/// Generates serde renames, `ALL`, `as_str`, `Display` and `FromStr`.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $wire:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    other => Err(format!("\"{}\" is not a valid {}", other, stringify!($name))),
                }
            }
        }
    };
}

pub mod analysis;
pub mod common;
pub mod custom;
pub mod enums;
pub mod generation;
pub mod retrieval;

pub use analysis::*;
pub use common::*;
pub use custom::*;
pub use enums::*;
pub use generation::*;
pub use retrieval::*;

/// Links a typed request body to its operation and normalized output
pub trait OperationRequest: Serialize + DeserializeOwned + Validate {
    /// Normalized per-provider output on success
    type Output: Serialize + DeserializeOwned;

    /// Operation this body is sent to
    const OPERATION: OperationKind;

    /// Parameters shared by every operation
    fn common(&self) -> &CommonParams;
}

macro_rules! impl_operation_request {
    ($($request:ty => $output:ty, $kind:ident;)+) => {
        $(
            impl OperationRequest for $request {
                type Output = $output;
                const OPERATION: OperationKind = OperationKind::$kind;

                fn common(&self) -> &CommonParams {
                    &self.common
                }
            }
        )+
    };
}

impl_operation_request! {
    TextGenerationRequest => TextGenerationOutput, TextGeneration;
    ChatRequest => ChatOutput, Chat;
    EmbeddingsRequest => EmbeddingsOutput, Embeddings;
    SentimentAnalysisRequest => SentimentAnalysisOutput, SentimentAnalysis;
    ModerationRequest => ModerationOutput, Moderation;
    SpellCheckRequest => SpellCheckOutput, SpellCheck;
    SummarizeRequest => SummarizeOutput, Summarize;
    SearchRequest => SearchOutput, Search;
    TopicExtractionRequest => TopicExtractionOutput, TopicExtraction;
    NamedEntityRecognitionRequest => NamedEntityRecognitionOutput, NamedEntityRecognition;
    AnonymizationRequest => AnonymizationOutput, Anonymization;
    PlagiaDetectionRequest => PlagiaDetectionOutput, PlagiaDetection;
    PromptOptimizationRequest => PromptOptimizationOutput, PromptOptimization;
    AiDetectionRequest => AiDetectionOutput, AiDetection;
    CustomClassificationRequest => CustomClassificationOutput, CustomClassification;
    CustomNamedEntityRecognitionRequest => CustomNamedEntityRecognitionOutput, CustomNamedEntityRecognition;
    QuestionAnswerRequest => QuestionAnswerOutput, QuestionAnswer;
    CodeGenerationRequest => CodeGenerationOutput, CodeGeneration;
}

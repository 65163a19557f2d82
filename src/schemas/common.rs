//! Parameters and envelopes shared by every operation

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use validator::Validate;

use super::Status;

/// Maximum number of fallback providers a request may name
pub const MAX_FALLBACK_PROVIDERS: usize = 5;

/// Provider name -> model name overrides
pub type ProviderSettings = BTreeMap<String, String>;

fn default_true() -> bool {
    true
}

// ============================================================================
// Request Parameters
// ============================================================================

/// Routing and presentation flags accepted by every operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CommonParams {
    /// Providers to query, at least one
    #[validate(length(min = 1))]
    pub providers: Vec<String>,

    /// Providers tried in order when a primary provider fails
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[validate(length(max = 5))]
    pub fallback_providers: Vec<String>,

    /// Key the response by provider name instead of returning a list
    #[serde(default = "default_true")]
    pub response_as_dict: bool,

    /// Return per-item attributes as parallel lists
    #[serde(default)]
    pub attributes_as_list: bool,

    /// Inline binary outputs as base64
    #[serde(default = "default_true")]
    pub show_base_64: bool,

    /// Include each provider's raw response
    #[serde(default)]
    pub show_original_response: bool,
}

impl CommonParams {
    pub fn new<I, S>(providers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            providers: providers.into_iter().map(Into::into).collect(),
            fallback_providers: Vec::new(),
            response_as_dict: true,
            attributes_as_list: false,
            show_base_64: true,
            show_original_response: false,
        }
    }

    pub fn with_fallbacks<I, S>(mut self, fallbacks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fallback_providers = fallbacks.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_original_response(mut self) -> Self {
        self.show_original_response = true;
        self
    }

    pub fn as_list(mut self) -> Self {
        self.response_as_dict = false;
        self
    }
}

// ============================================================================
// Provider Responses
// ============================================================================

/// Failure reported by a single provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderError {
    pub message: String,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
}

/// One provider's result, discriminated by `status`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum ProviderResponse<T> {
    #[serde(rename = "sucess")]
    Success {
        #[serde(flatten)]
        output: T,

        /// Raw provider payload, present when requested
        #[serde(default, skip_serializing_if = "Option::is_none")]
        original_response: Option<Value>,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        cost: Option<f64>,
    },

    #[serde(rename = "fail")]
    Fail {
        error: ProviderError,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        provider_status_code: Option<u16>,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        cost: Option<f64>,
    },
}

impl<T> ProviderResponse<T> {
    pub fn success(output: T) -> Self {
        ProviderResponse::Success {
            output,
            original_response: None,
            cost: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        ProviderResponse::Fail {
            error: ProviderError {
                message: message.into(),
                error_type: None,
            },
            provider_status_code: None,
            cost: None,
        }
    }

    pub fn status(&self) -> Status {
        match self {
            ProviderResponse::Success { .. } => Status::Success,
            ProviderResponse::Fail { .. } => Status::Fail,
        }
    }

    pub fn output(&self) -> Option<&T> {
        match self {
            ProviderResponse::Success { output, .. } => Some(output),
            ProviderResponse::Fail { .. } => None,
        }
    }

    pub fn into_output(self) -> Result<T, ProviderError> {
        match self {
            ProviderResponse::Success { output, .. } => Ok(output),
            ProviderResponse::Fail { error, .. } => Err(error),
        }
    }
}

/// List-form entry: the envelope plus the provider that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListedResponse<T> {
    pub provider: String,

    #[serde(flatten)]
    pub response: ProviderResponse<T>,
}

/// Body of a 200 response, keyed by provider or as an ordered list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProviderResponses<T> {
    ByProvider(BTreeMap<String, ProviderResponse<T>>),
    List(Vec<ListedResponse<T>>),
}

impl<T> ProviderResponses<T> {
    /// Look up one provider's result in either form
    pub fn get(&self, provider: &str) -> Option<&ProviderResponse<T>> {
        match self {
            ProviderResponses::ByProvider(map) => map.get(provider),
            ProviderResponses::List(items) => items
                .iter()
                .find(|item| item.provider == provider)
                .map(|item| &item.response),
        }
    }

    /// Provider names in response order
    pub fn providers(&self) -> Vec<&str> {
        match self {
            ProviderResponses::ByProvider(map) => map.keys().map(String::as_str).collect(),
            ProviderResponses::List(items) => items.iter().map(|i| i.provider.as_str()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ProviderResponses::ByProvider(map) => map.len(),
            ProviderResponses::List(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

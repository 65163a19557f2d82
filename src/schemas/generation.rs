//! Generative operations: text generation, chat, code generation and prompt
//! optimization

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use super::{ChatRole, CommonParams, ProviderSettings, TargetProvider, ToolChoice};

pub const DEFAULT_MAX_TOKENS: u32 = 1000;
pub const DEFAULT_CODE_TEMPERATURE: f64 = 0.1;

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

fn default_code_temperature() -> f64 {
    DEFAULT_CODE_TEMPERATURE
}

// ============================================================================
// Text Generation
// ============================================================================

/// POST text/generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct TextGenerationRequest {
    #[serde(flatten)]
    #[validate(nested)]
    pub common: CommonParams,

    #[validate(length(min = 1))]
    pub text: String,

    /// Sampling temperature, 0 to 1
    #[serde(default)]
    #[validate(range(min = 0.0, max = 1.0))]
    pub temperature: f64,

    #[serde(default = "default_max_tokens")]
    #[validate(range(min = 1))]
    pub max_tokens: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<ProviderSettings>,
}

impl TextGenerationRequest {
    pub fn new(common: CommonParams, text: impl Into<String>) -> Self {
        Self {
            common,
            text: text.into(),
            temperature: 0.0,
            max_tokens: DEFAULT_MAX_TOKENS,
            settings: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextGenerationOutput {
    pub generated_text: String,
}

// ============================================================================
// Chat
// ============================================================================

/// Earlier turn replayed to the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct HistoryMessage {
    pub role: ChatRole,
    pub message: String,
}

/// Tool the model may call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ToolDefinition {
    #[validate(length(min = 1))]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// JSON Schema of the arguments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Value>,
}

/// Result of a tool call made in an earlier turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ToolResult {
    #[validate(length(min = 1))]
    pub id: String,
    pub result: String,
}

/// POST text/chat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ChatRequest {
    #[serde(flatten)]
    #[validate(nested)]
    pub common: CommonParams,

    #[validate(length(min = 1))]
    pub text: String,

    /// System instruction applied to the whole conversation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chatbot_global_action: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[validate(nested)]
    pub previous_history: Vec<HistoryMessage>,

    /// Sampling temperature, 0 to 2
    #[serde(default)]
    #[validate(range(min = 0.0, max = 2.0))]
    pub temperature: f64,

    #[serde(default = "default_max_tokens")]
    #[validate(range(min = 1))]
    pub max_tokens: u32,

    #[serde(default)]
    pub tool_choice: ToolChoice,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[validate(nested)]
    pub available_tools: Vec<ToolDefinition>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[validate(nested)]
    pub tool_results: Vec<ToolResult>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<ProviderSettings>,
}

impl ChatRequest {
    pub fn new(common: CommonParams, text: impl Into<String>) -> Self {
        Self {
            common,
            text: text.into(),
            chatbot_global_action: None,
            previous_history: Vec::new(),
            temperature: 0.0,
            max_tokens: DEFAULT_MAX_TOKENS,
            tool_choice: ToolChoice::Auto,
            available_tools: Vec::new(),
            tool_results: Vec::new(),
            settings: None,
        }
    }

    pub fn with_history(mut self, role: ChatRole, message: impl Into<String>) -> Self {
        self.previous_history.push(HistoryMessage {
            role,
            message: message.into(),
        });
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }
}

/// Tool invocation requested by the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    /// Arguments as a JSON string
    pub arguments: String,
}

/// Message of the returned conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,

    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolDefinition>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatOutput {
    pub generated_text: String,
    pub message: Vec<ChatMessage>,
}

// ============================================================================
// Code Generation
// ============================================================================

/// POST text/code_generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CodeGenerationRequest {
    #[serde(flatten)]
    #[validate(nested)]
    pub common: CommonParams,

    #[validate(length(min = 1))]
    pub instruction: String,

    /// Existing code to start from
    #[serde(default)]
    pub prompt: String,

    #[serde(default = "default_code_temperature")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub temperature: f64,

    #[serde(default = "default_max_tokens")]
    #[validate(range(min = 1))]
    pub max_tokens: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<ProviderSettings>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeGenerationOutput {
    pub generated_text: String,
}

// ============================================================================
// Prompt Optimization
// ============================================================================

/// POST text/prompt_optimization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct PromptOptimizationRequest {
    #[serde(flatten)]
    #[validate(nested)]
    pub common: CommonParams,

    /// Description of the prompt to write
    #[validate(length(min = 1))]
    pub text: String,

    pub target_provider: TargetProvider,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizedPrompt {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptOptimizationOutput {
    pub missing_information: Option<String>,
    pub items: Vec<OptimizedPrompt>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_generation_defaults() {
        let request: TextGenerationRequest = serde_json::from_value(json!({
            "providers": ["openai"],
            "text": "Once upon a time"
        }))
        .unwrap();
        assert_eq!(request.temperature, 0.0);
        assert_eq!(request.max_tokens, DEFAULT_MAX_TOKENS);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_generation_temperature_bounds() {
        let request = TextGenerationRequest::new(CommonParams::new(["openai"]), "hi")
            .with_temperature(1.5);
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("temperature"));
    }

    #[test]
    fn test_chat_allows_wider_temperature() {
        let request = ChatRequest::new(CommonParams::new(["openai"]), "hi").with_temperature(1.5);
        assert!(request.validate().is_ok());

        let request = ChatRequest::new(CommonParams::new(["openai"]), "hi").with_temperature(2.5);
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_chat_parses_history_and_tools() {
        let request: ChatRequest = serde_json::from_value(json!({
            "providers": ["openai"],
            "text": "And in Paris?",
            "previous_history": [
                {"role": "user", "message": "Weather in Rome?"},
                {"role": "assistant", "message": "Sunny."}
            ],
            "tool_choice": "required",
            "available_tools": [{"name": "weather", "parameters": {"type": "object"}}]
        }))
        .unwrap();
        assert_eq!(request.previous_history.len(), 2);
        assert_eq!(request.tool_choice, ToolChoice::Required);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_code_generation_default_temperature() {
        let request: CodeGenerationRequest = serde_json::from_value(json!({
            "providers": ["openai"],
            "instruction": "Write a fibonacci function"
        }))
        .unwrap();
        assert_eq!(request.temperature, DEFAULT_CODE_TEMPERATURE);
        assert_eq!(request.prompt, "");
    }

    #[test]
    fn test_prompt_optimization_target_enum() {
        let result = serde_json::from_value::<PromptOptimizationRequest>(json!({
            "providers": ["openai"],
            "text": "a prompt",
            "target_provider": "unknown"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_chat_output_nullable_message() {
        let output: ChatOutput = serde_json::from_value(json!({
            "generated_text": "",
            "message": [{"role": "assistant", "message": null, "tool_calls": [
                {"id": "1", "name": "weather", "arguments": "{}"}
            ]}]
        }))
        .unwrap();
        assert!(output.message[0].message.is_none());
    }
}

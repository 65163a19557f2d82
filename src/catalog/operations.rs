//! Built-in operation table
//!
//! One constructor per operation. Request schemas are the common routing
//! parameters followed by operation-specific fields; output schemas are the
//! normalized provider envelope plus operation-specific result fields.

use serde_json::json;

use super::operation::{Operation, OperationKind};
use super::schema::Schema;
use crate::schemas::{
    AiPrediction, AnonymizationCategory, ChatRole, ModerationCategory, ModerationSubcategory,
    Sentiment, SimilarityMetric, Status, TargetProvider, ToolChoice, HISTORY_ROLES,
    MAX_FALLBACK_PROVIDERS,
};

// ============================================================================
// Provider Lists
// ============================================================================

const GENERATION_PROVIDERS: &[&str] = &["openai", "anthropic", "google", "cohere", "mistral", "meta", "amazon"];
const CHAT_PROVIDERS: &[&str] = &[
    "openai", "anthropic", "google", "cohere", "mistral", "meta", "amazon", "perplexityai", "replicate",
];
const EMBEDDINGS_PROVIDERS: &[&str] = &["openai", "google", "cohere", "mistral", "jina", "amazon"];
const SENTIMENT_PROVIDERS: &[&str] = &[
    "amazon", "google", "ibm", "lettria", "microsoft", "connexun", "openai", "sapling", "emvista",
];
const MODERATION_PROVIDERS: &[&str] = &["openai", "microsoft", "google", "clarifai"];
const SPELL_CHECK_PROVIDERS: &[&str] = &["microsoft", "openai", "sapling", "prowritingaid", "cohere"];
const SUMMARIZE_PROVIDERS: &[&str] = &[
    "openai", "microsoft", "connexun", "emvista", "cohere", "meaningcloud", "anthropic", "nlpcloud",
];
const SEARCH_PROVIDERS: &[&str] = &["openai", "google", "cohere", "mistral"];
const TOPIC_PROVIDERS: &[&str] = &["google", "ibm", "openai", "tenstorrent"];
const NER_PROVIDERS: &[&str] = &[
    "amazon", "google", "ibm", "lettria", "microsoft", "neuralspace", "openai", "tenstorrent",
];
const ANONYMIZATION_PROVIDERS: &[&str] = &["amazon", "microsoft", "emvista", "openai", "privateai", "oneai"];
const PLAGIA_PROVIDERS: &[&str] = &["originalityai", "winstonai"];
const PROMPT_OPTIMIZATION_PROVIDERS: &[&str] = &["openai"];
const AI_DETECTION_PROVIDERS: &[&str] = &["originalityai", "sapling", "winstonai"];
const CUSTOM_CLASSIFICATION_PROVIDERS: &[&str] = &["cohere", "openai"];
const CUSTOM_NER_PROVIDERS: &[&str] = &["openai"];
const QUESTION_ANSWER_PROVIDERS: &[&str] = &["openai"];
const CODE_GENERATION_PROVIDERS: &[&str] = &["openai", "google", "nlpcloud"];

/// Every operation, in catalogue order
pub fn builtin_operations() -> Vec<Operation> {
    vec![
        text_generation(),
        chat(),
        embeddings(),
        sentiment_analysis(),
        moderation(),
        spell_check(),
        summarize(),
        search(),
        topic_extraction(),
        named_entity_recognition(),
        anonymization(),
        plagia_detection(),
        prompt_optimization(),
        ai_detection(),
        custom_classification(),
        custom_named_entity_recognition(),
        question_answer(),
        code_generation(),
    ]
}

// ============================================================================
// Shared Pieces
// ============================================================================

fn operation(
    kind: OperationKind,
    name: &str,
    description: &str,
    providers: &[&str],
    params: Schema,
    output: Schema,
) -> Operation {
    Operation {
        kind,
        name: name.to_string(),
        description: description.to_string(),
        providers: providers.iter().map(|p| p.to_string()).collect(),
        request: common_params(providers).extend(&params),
        output: envelope(&output),
    }
}

/// Routing and presentation parameters accepted by every operation
fn common_params(providers: &[&str]) -> Schema {
    let provider = || Schema::string().one_of(providers.iter().copied());
    let first = providers.first().copied().unwrap_or_default();

    Schema::object()
        .field(
            "providers",
            Schema::array(provider())
                .min_items(1)
                .description("Providers to query")
                .example(json!([first])),
        )
        .optional(
            "fallback_providers",
            Schema::array(provider())
                .max_items(MAX_FALLBACK_PROVIDERS)
                .default_value(json!([]))
                .description("Providers tried in order when a provider fails"),
        )
        .optional(
            "response_as_dict",
            Schema::boolean()
                .default_value(true)
                .description("Key the response by provider name; otherwise return a list"),
        )
        .optional(
            "attributes_as_list",
            Schema::boolean()
                .default_value(false)
                .description("Return item attributes as parallel lists"),
        )
        .optional(
            "show_base_64",
            Schema::boolean()
                .default_value(true)
                .description("Inline binary outputs as base64"),
        )
        .optional(
            "show_original_response",
            Schema::boolean()
                .default_value(false)
                .description("Include each provider's raw response"),
        )
}

/// Provider envelope around an operation's result fields
fn envelope(output: &Schema) -> Schema {
    Schema::object()
        .field(
            "status",
            Schema::string().one_of([Status::Success.as_str()]),
        )
        .optional(
            "original_response",
            Schema::any()
                .nullable()
                .description("Raw provider response, present when requested"),
        )
        .optional("cost", Schema::number().minimum(0.0).nullable())
        .extend(output)
}

fn text(example: &str) -> Schema {
    Schema::string().min_length(1).example(example)
}

fn texts(example: serde_json::Value) -> Schema {
    Schema::array(Schema::string()).min_items(1).example(example)
}

fn language() -> Schema {
    Schema::string()
        .nullable()
        .description("ISO 639-1 language code; detected when omitted")
        .example("en")
}

fn settings() -> Schema {
    Schema::map(Schema::string())
        .description("Model to use per provider")
        .example(json!({"openai": "gpt-4o"}))
}

fn temperature(max: f64, default: f64) -> Schema {
    Schema::number()
        .between(0.0, max)
        .default_value(default)
        .description("Sampling temperature")
}

fn max_tokens() -> Schema {
    Schema::integer()
        .between(1.0, u32::MAX as f64)
        .default_value(1000)
        .description("Maximum number of tokens to generate")
}

/// Probability-like value in [0, 1]
fn score() -> Schema {
    Schema::number().between(0.0, 1.0)
}

fn pair(description: &str) -> Schema {
    Schema::array(Schema::string())
        .min_items(2)
        .max_items(2)
        .description(description)
}

fn text_language_params(example: &str) -> Schema {
    Schema::object()
        .field("text", text(example))
        .optional("language", language())
}

fn enum_of<T: Copy>(values: &[T], as_str: fn(&T) -> &'static str) -> Schema {
    Schema::string().one_of(values.iter().map(as_str))
}

// ============================================================================
// Generative Operations
// ============================================================================

fn text_generation() -> Operation {
    operation(
        OperationKind::TextGeneration,
        "Text generation",
        "Complete a prompt",
        GENERATION_PROVIDERS,
        Schema::object()
            .field("text", text("Describe the life cycle of a butterfly in three sentences."))
            .optional("temperature", temperature(1.0, 0.0))
            .optional("max_tokens", max_tokens())
            .optional("settings", settings()),
        Schema::object().field("generated_text", Schema::string()),
    )
}

fn chat() -> Operation {
    let history_item = Schema::object()
        .field("role", enum_of(&HISTORY_ROLES, ChatRole::as_str))
        .field("message", Schema::string());

    let tool = Schema::object()
        .field("name", Schema::string().min_length(1))
        .optional("description", Schema::string())
        .optional("parameters", Schema::any().description("JSON Schema of the arguments"));

    let tool_result = Schema::object()
        .field("id", Schema::string().min_length(1))
        .field("result", Schema::string());

    let tool_call = Schema::object()
        .field("id", Schema::string())
        .field("name", Schema::string())
        .field("arguments", Schema::string());

    let message = Schema::object()
        .field("role", enum_of(ChatRole::ALL, ChatRole::as_str))
        .field("message", Schema::string().nullable())
        .optional("tools", Schema::array(tool.clone()).nullable())
        .optional("tool_calls", Schema::array(tool_call).nullable());

    operation(
        OperationKind::Chat,
        "Chat",
        "Continue a conversation",
        CHAT_PROVIDERS,
        Schema::object()
            .field("text", text("What is the capital of France?"))
            .optional(
                "chatbot_global_action",
                Schema::string()
                    .description("System instruction for the whole conversation")
                    .example("Act as a helpful assistant"),
            )
            .optional(
                "previous_history",
                Schema::array(history_item).default_value(json!([])),
            )
            .optional("temperature", temperature(2.0, 0.0))
            .optional("max_tokens", max_tokens())
            .optional(
                "tool_choice",
                enum_of(ToolChoice::ALL, ToolChoice::as_str).default_value(ToolChoice::Auto.as_str()),
            )
            .optional("available_tools", Schema::array(tool).default_value(json!([])))
            .optional("tool_results", Schema::array(tool_result).default_value(json!([])))
            .optional("settings", settings()),
        Schema::object()
            .field("generated_text", Schema::string())
            .field("message", Schema::array(message)),
    )
}

fn code_generation() -> Operation {
    operation(
        OperationKind::CodeGeneration,
        "Code generation",
        "Write or rewrite code from an instruction",
        CODE_GENERATION_PROVIDERS,
        Schema::object()
            .field("instruction", text("Write a function that returns the nth Fibonacci number."))
            .optional(
                "prompt",
                Schema::string()
                    .default_value("")
                    .description("Existing code to start from"),
            )
            .optional("temperature", temperature(1.0, 0.1))
            .optional("max_tokens", max_tokens())
            .optional("settings", settings()),
        Schema::object().field("generated_text", Schema::string()),
    )
}

fn prompt_optimization() -> Operation {
    operation(
        OperationKind::PromptOptimization,
        "Prompt optimization",
        "Turn a description into a prompt tuned for a target provider",
        PROMPT_OPTIMIZATION_PROVIDERS,
        Schema::object()
            .field("text", text("Get a short summary of a news article."))
            .field(
                "target_provider",
                enum_of(TargetProvider::ALL, TargetProvider::as_str),
            ),
        Schema::object()
            .field("missing_information", Schema::string().nullable())
            .field(
                "items",
                Schema::array(Schema::object().field("text", Schema::string())),
            ),
    )
}

// ============================================================================
// Analysis Operations
// ============================================================================

fn sentiment_analysis() -> Operation {
    let sentiment = || enum_of(Sentiment::ALL, Sentiment::as_str);

    operation(
        OperationKind::SentimentAnalysis,
        "Sentiment analysis",
        "Detect the polarity of a text and of its segments",
        SENTIMENT_PROVIDERS,
        text_language_params("Overall I am satisfied with my experience at Amazon, but two areas of major improvement are delivery and customer service."),
        Schema::object()
            .field("general_sentiment", sentiment())
            .field("general_sentiment_rate", score())
            .field(
                "items",
                Schema::array(
                    Schema::object()
                        .field("segment", Schema::string())
                        .field("sentiment", sentiment())
                        .field("sentiment_rate", score()),
                ),
            ),
    )
}

fn moderation() -> Operation {
    let item = Schema::object()
        .field("label", Schema::string())
        .field(
            "likelihood",
            Schema::integer()
                .one_of(1..=5)
                .description("1 very unlikely, 5 very likely"),
        )
        .field("category", enum_of(ModerationCategory::ALL, ModerationCategory::as_str))
        .field(
            "subcategory",
            enum_of(ModerationSubcategory::ALL, ModerationSubcategory::as_str),
        )
        .field("likelihood_score", score());

    operation(
        OperationKind::Moderation,
        "Moderation",
        "Flag harmful or unsafe content",
        MODERATION_PROVIDERS,
        text_language_params("I want to kill them."),
        Schema::object()
            .field(
                "nsfw_likelihood",
                Schema::integer()
                    .one_of(0..=5)
                    .description("Highest likelihood found, 0 when clean"),
            )
            .field("nsfw_likelihood_score", score())
            .field("items", Schema::array(item)),
    )
}

fn spell_check() -> Operation {
    let suggestion = Schema::object()
        .field("suggestion", Schema::string())
        .field("score", score().nullable());

    let item = Schema::object()
        .field("text", Schema::string())
        .optional("type", Schema::string().nullable())
        .field("offset", Schema::integer().minimum(0.0))
        .field("length", Schema::integer().minimum(0.0))
        .field("suggestions", Schema::array(suggestion));

    operation(
        OperationKind::SpellCheck,
        "Spell check",
        "Find spelling and grammar mistakes with suggestions",
        SPELL_CHECK_PROVIDERS,
        text_language_params("Hollo, wrld! How are you?"),
        Schema::object()
            .field("text", Schema::string())
            .field("items", Schema::array(item)),
    )
}

fn topic_extraction() -> Operation {
    operation(
        OperationKind::TopicExtraction,
        "Topic extraction",
        "Classify a text into topics",
        TOPIC_PROVIDERS,
        text_language_params("Tesla is revamping the Model 3 with a longer range battery."),
        Schema::object().field(
            "items",
            Schema::array(
                Schema::object()
                    .field("category", Schema::string())
                    .field("importance", score()),
            ),
        ),
    )
}

fn named_entity_recognition() -> Operation {
    operation(
        OperationKind::NamedEntityRecognition,
        "Named entity recognition",
        "Extract people, places, organizations and other entities",
        NER_PROVIDERS,
        text_language_params("Barack Hussein Obama is an American politician who served as the 44th president of the United States."),
        Schema::object().field(
            "items",
            Schema::array(
                Schema::object()
                    .field("entity", Schema::string())
                    .field("category", Schema::string())
                    .field("importance", score().nullable()),
            ),
        ),
    )
}

fn anonymization() -> Operation {
    let entity = Schema::object()
        .field("offset", Schema::integer().minimum(0.0))
        .field("length", Schema::integer().minimum(0.0))
        .field(
            "category",
            enum_of(AnonymizationCategory::ALL, AnonymizationCategory::as_str),
        )
        .field("subcategory", Schema::string())
        .field("original_label", Schema::string())
        .field("content", Schema::string())
        .field("confidence_score", score().nullable());

    operation(
        OperationKind::Anonymization,
        "Anonymization",
        "Mask personal data in a text",
        ANONYMIZATION_PROVIDERS,
        text_language_params("Overall I am satisfied with my experience at Amazon. My phone number is 555-0100."),
        Schema::object()
            .field("result", Schema::string().description("Text with sensitive spans masked"))
            .field("entities", Schema::array(entity)),
    )
}

fn ai_detection() -> Operation {
    operation(
        OperationKind::AiDetection,
        "AI content detection",
        "Estimate whether a text was machine-generated",
        AI_DETECTION_PROVIDERS,
        Schema::object()
            .field("text", text("Artificial intelligence is transforming industries across the globe at an unprecedented pace."))
            .optional("provider_params", Schema::any().description("Provider-specific parameters")),
        Schema::object().field("ai_score", score()).field(
            "items",
            Schema::array(
                Schema::object()
                    .field("text", Schema::string())
                    .field("prediction", enum_of(AiPrediction::ALL, AiPrediction::as_str))
                    .field("ai_score", score()),
            ),
        ),
    )
}

fn plagia_detection() -> Operation {
    let candidate = Schema::object()
        .field("url", Schema::string())
        .field("plagia_score", score())
        .field("prediction", Schema::string())
        .field("plagiarized_text", Schema::string());

    operation(
        OperationKind::PlagiaDetection,
        "Plagiarism detection",
        "Find published sources a text was copied from",
        PLAGIA_PROVIDERS,
        Schema::object()
            .field("text", text("To be, or not to be, that is the question."))
            .optional("title", Schema::string().nullable())
            .optional("provider_params", Schema::any().description("Provider-specific parameters")),
        Schema::object().field("plagia_score", score()).field(
            "items",
            Schema::array(
                Schema::object()
                    .field("text", Schema::string())
                    .field("candidates", Schema::array(candidate)),
            ),
        ),
    )
}

// ============================================================================
// Retrieval Operations
// ============================================================================

fn embeddings() -> Operation {
    operation(
        OperationKind::Embeddings,
        "Embeddings",
        "Compute a vector per input text",
        EMBEDDINGS_PROVIDERS,
        Schema::object()
            .field("texts", texts(json!(["Hello world", "Bonjour le monde"])))
            .optional("settings", settings()),
        Schema::object().field(
            "items",
            Schema::array(Schema::object().field("embedding", Schema::array(Schema::number()))),
        ),
    )
}

fn search() -> Operation {
    operation(
        OperationKind::Search,
        "Semantic search",
        "Rank documents by similarity to a query",
        SEARCH_PROVIDERS,
        Schema::object()
            .field(
                "texts",
                texts(json!(["Paris is the capital of France.", "Berlin is the capital of Germany."])),
            )
            .field("query", text("capital of France"))
            .optional(
                "similarity_metric",
                enum_of(SimilarityMetric::ALL, SimilarityMetric::as_str)
                    .default_value(SimilarityMetric::Cosine.as_str()),
            )
            .optional("settings", settings()),
        Schema::object().field(
            "items",
            Schema::array(
                Schema::object()
                    .field("object", Schema::string().example("search_result"))
                    .field("document", Schema::integer().minimum(0.0))
                    .field("score", Schema::number()),
            ),
        ),
    )
}

fn question_answer() -> Operation {
    operation(
        OperationKind::QuestionAnswer,
        "Question answering",
        "Answer a question from context documents and examples",
        QUESTION_ANSWER_PROVIDERS,
        Schema::object()
            .field("texts", texts(json!(["Linux is an open-source Unix-like operating system kernel."])))
            .field("question", text("What kind of software is Linux?"))
            .field(
                "examples_context",
                text("In 2017, U.S. life expectancy was 78.6 years."),
            )
            .field(
                "examples",
                Schema::array(pair("A [question, answer] pair"))
                    .min_items(1)
                    .example(json!([["What is human life expectancy in the United States?", "78 years."]])),
            )
            .optional("temperature", temperature(1.0, 0.0))
            .optional("settings", settings()),
        Schema::object().field("answers", Schema::array(Schema::string())),
    )
}

fn summarize() -> Operation {
    operation(
        OperationKind::Summarize,
        "Summarization",
        "Condense a text into a few sentences",
        SUMMARIZE_PROVIDERS,
        Schema::object()
            .field("text", text("The Amazon rainforest covers much of the Amazon basin of South America. The majority of the forest is contained within Brazil."))
            .optional(
                "output_sentences",
                Schema::integer()
                    .between(1.0, u32::MAX as f64)
                    .default_value(1)
                    .description("Number of sentences in the summary"),
            )
            .optional("language", language())
            .optional("settings", settings()),
        Schema::object().field("result", Schema::string()),
    )
}

// ============================================================================
// Custom Operations
// ============================================================================

fn custom_classification() -> Operation {
    operation(
        OperationKind::CustomClassification,
        "Custom classification",
        "Classify texts into caller-supplied labels from a few examples",
        CUSTOM_CLASSIFICATION_PROVIDERS,
        Schema::object()
            .field("texts", texts(json!(["Confirm your email address", "hey i need u to send some $"])))
            .field(
                "labels",
                Schema::array(Schema::string())
                    .min_items(2)
                    .example(json!(["Spam", "Not spam"])),
            )
            .field(
                "examples",
                Schema::array(pair("A [text, label] pair"))
                    .min_items(1)
                    .example(json!([
                        ["I need help please wire me $1000 right now", "Spam"],
                        ["Dermatologists don't like her!", "Spam"],
                        ["Pre-read for tomorrow", "Not spam"]
                    ])),
            ),
        Schema::object().field(
            "classifications",
            Schema::array(
                Schema::object()
                    .field("input", Schema::string())
                    .field("label", Schema::string())
                    .field("confidence", score()),
            ),
        ),
    )
}

fn custom_named_entity_recognition() -> Operation {
    let annotation = Schema::object()
        .field("entity", Schema::string())
        .field("category", Schema::string());

    let example = Schema::object()
        .field("text", Schema::string().min_length(1))
        .field("entities", Schema::array(annotation.clone()));

    operation(
        OperationKind::CustomNamedEntityRecognition,
        "Custom named entity recognition",
        "Extract entities of caller-supplied categories",
        CUSTOM_NER_PROVIDERS,
        Schema::object()
            .field("text", text("Barack Obama was born in Hawaii. He was elected president in 2008."))
            .field(
                "entities",
                Schema::array(Schema::string())
                    .min_items(2)
                    .example(json!(["Person", "Location", "Date"])),
            )
            .optional("examples", Schema::array(example).default_value(json!([]))),
        Schema::object().field("items", Schema::array(annotation)),
    )
}

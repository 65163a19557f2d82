//! Error response schemas shared by every operation

use super::schema::Schema;
use crate::schemas::Status;

/// 400: `{error: {type, message: {<parameter>: [string]}}}`
pub fn validation_error() -> Schema {
    Schema::object()
        .description("Invalid request: messages keyed by parameter name")
        .field(
            "error",
            Schema::object()
                .field("type", Schema::string().example("invalid_request_error"))
                .field(
                    "message",
                    Schema::map(Schema::array(Schema::string()))
                        .example(serde_json::json!({"providers": ["This field is required."]})),
                ),
        )
}

/// 403: `{error: {type, message}}`
pub fn forbidden_error() -> Schema {
    detailed_error("Not allowed to use this resource", "authorization_error")
}

/// 404: `{details}`
pub fn not_found_error() -> Schema {
    Schema::object()
        .description("Resource not found")
        .field("details", Schema::string().example("Not found."))
}

/// 500: `{error: {type, message}}`
pub fn server_error() -> Schema {
    detailed_error("Unexpected server error", "server_error")
}

fn detailed_error(description: &str, error_type: &str) -> Schema {
    Schema::object().description(description).field(
        "error",
        Schema::object()
            .field("type", Schema::string().example(error_type))
            .field("message", Schema::string()),
    )
}

/// Provider envelope when `status` is `fail`
pub fn provider_failure() -> Schema {
    Schema::object()
        .description("Provider call failed; output fields are absent")
        .field(
            "status",
            Schema::string().one_of([Status::Fail.as_str()]),
        )
        .field(
            "error",
            Schema::object()
                .field("message", Schema::string())
                .optional("type", Schema::string()),
        )
        .optional(
            "provider_status_code",
            Schema::integer().between(100.0, 599.0).nullable(),
        )
        .optional("cost", Schema::number().minimum(0.0).nullable())
        .optional("original_response", Schema::any().nullable())
}

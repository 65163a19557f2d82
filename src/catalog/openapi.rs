//! OpenAPI 3.1 rendering of the catalogue
//!
//! Served at `GET /v1/openapi.json` and written by `ai-api-contract export`.

use anyhow::{Context, Result};
use serde_json::{json, Map, Value};
use std::fs;
use std::path::Path;

use super::{errors, Catalog};

/// Base path operations are published under
pub const API_PREFIX: &str = "/v2";

/// Build the OpenAPI document for a catalogue
pub fn openapi_document(catalog: &Catalog, version: &str) -> Value {
    let mut paths = Map::new();

    for op in catalog.iter() {
        let path = format!("{}/{}/", API_PREFIX, op.path());
        let mut responses = Map::new();
        for (status, schema) in op.responses() {
            let content = match status {
                200 => reference_failures(schema.to_json_schema()),
                400 => json!({"$ref": "#/components/schemas/ValidationError"}),
                403 => json!({"$ref": "#/components/schemas/ForbiddenError"}),
                404 => json!({"$ref": "#/components/schemas/NotFoundError"}),
                _ => json!({"$ref": "#/components/schemas/ServerError"}),
            };
            responses.insert(
                status.to_string(),
                json!({
                    "description": schema.description.clone().unwrap_or_default(),
                    "content": {"application/json": {"schema": content}}
                }),
            );
        }

        paths.insert(
            path,
            json!({
                "post": {
                    "operationId": format!("{}_{}", op.kind.feature(), op.kind.subfeature()),
                    "summary": op.name,
                    "description": op.description,
                    "tags": [op.kind.feature()],
                    "requestBody": {
                        "required": true,
                        "content": {
                            "application/json": {
                                "schema": op.request.to_json_schema(),
                                "example": op.example_request()
                            }
                        }
                    },
                    "responses": responses
                }
            }),
        );
    }

    json!({
        "openapi": "3.1.0",
        "info": {
            "title": "Multi-provider AI API",
            "description": "Request and response contract of the text operations, one normalized shape per provider.",
            "version": version
        },
        "paths": paths,
        "components": {
            "schemas": {
                "ValidationError": errors::validation_error().to_json_schema(),
                "ForbiddenError": errors::forbidden_error().to_json_schema(),
                "NotFoundError": errors::not_found_error().to_json_schema(),
                "ServerError": errors::server_error().to_json_schema(),
                "ProviderFailure": errors::provider_failure().to_json_schema()
            }
        }
    })
}

/// Swap inlined provider failure envelopes for the shared component
fn reference_failures(mut schema: Value) -> Value {
    let failure = errors::provider_failure().to_json_schema();
    let properties = schema
        .get_mut("properties")
        .and_then(Value::as_object_mut)
        .into_iter()
        .flat_map(|properties| properties.values_mut());

    for property in properties {
        if let Some(variants) = property.get_mut("oneOf").and_then(Value::as_array_mut) {
            for variant in variants.iter_mut().filter(|v| **v == failure) {
                *variant = json!({"$ref": "#/components/schemas/ProviderFailure"});
            }
        }
    }
    schema
}

/// Write a document as pretty-printed JSON
pub fn write_document(path: &Path, document: &Value) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let rendered = serde_json::to_string_pretty(document)?;
    fs::write(path, rendered).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_document_has_one_path_per_operation() {
        let catalog = Catalog::builtin();
        let doc = openapi_document(catalog, "1.2.3");
        assert_eq!(doc["openapi"], "3.1.0");
        assert_eq!(doc["info"]["version"], "1.2.3");
        assert_eq!(doc["paths"].as_object().unwrap().len(), catalog.len());
    }

    #[test]
    fn test_generation_path_content() {
        let doc = openapi_document(Catalog::builtin(), "0.1.0");
        let post = &doc["paths"]["/v2/text/generation/"]["post"];
        let request = &post["requestBody"]["content"]["application/json"]["schema"];
        assert!(request["required"].as_array().unwrap().contains(&json!("providers")));
        assert_eq!(request["properties"]["fallback_providers"]["maxItems"], 5);

        let ok = &post["responses"]["200"]["content"]["application/json"]["schema"];
        let variants = ok["properties"]["openai"]["oneOf"].as_array().unwrap();
        assert_eq!(variants.len(), 2);
        assert!(variants[0]["required"].as_array().unwrap().contains(&json!("generated_text")));
        assert_eq!(variants[0]["properties"]["status"]["enum"], json!(["sucess"]));
        assert_eq!(variants[1], json!({"$ref": "#/components/schemas/ProviderFailure"}));
        assert_eq!(
            doc["components"]["schemas"]["ProviderFailure"]["properties"]["status"]["enum"],
            json!(["fail"])
        );

        assert_eq!(
            post["responses"]["404"]["content"]["application/json"]["schema"]["$ref"],
            "#/components/schemas/NotFoundError"
        );
    }

    #[test]
    fn test_write_document() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("openapi.json");
        let doc = openapi_document(Catalog::builtin(), "0.1.0");

        write_document(&path, &doc).unwrap();

        let written: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, doc);
    }
}

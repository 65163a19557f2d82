//! Conformance checking
//!
//! Checks JSON documents against the catalogue and collects messages per
//! parameter path. `FieldErrors` is exactly the `message` object of a 400
//! response.

pub mod request;
pub mod response;
pub mod typed;

pub use request::{validate_request, validate_value};
pub use response::{validate_provider_response, validate_response};
pub use typed::{check_request, check_response, decode_request, decode_response};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Key used for problems that are not tied to one parameter
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

/// Knobs for schema validation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Report properties the schema does not declare
    pub reject_unknown_fields: bool,
}

impl ValidationOptions {
    pub fn strict() -> Self {
        Self {
            reject_unknown_fields: true,
        }
    }
}

/// Parameter path -> messages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single message not tied to a parameter
    pub fn non_field(message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(NON_FIELD_ERRORS, message);
        errors
    }

    pub fn add(&mut self, path: &str, message: impl Into<String>) {
        let key = if path.is_empty() { NON_FIELD_ERRORS } else { path };
        self.0.entry(key.to_string()).or_default().push(message.into());
    }

    pub fn merge(&mut self, other: FieldErrors) {
        for (path, messages) in other.0 {
            self.0.entry(path).or_default().extend(messages);
        }
    }

    pub fn get(&self, path: &str) -> Option<&[String]> {
        self.0.get(path).map(Vec::as_slice)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.0.contains_key(path)
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of parameters with at least one message
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn into_inner(self) -> BTreeMap<String, Vec<String>> {
        self.0
    }

    /// `Ok(())` when nothing was collected
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (path, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{}: {}", path, message)?;
                first = false;
            }
        }
        Ok(())
    }
}

/// `parent.child`, or `child` at the root
pub(crate) fn join_path(parent: &str, child: &str) -> String {
    if parent.is_empty() {
        child.to_string()
    } else {
        format!("{}.{}", parent, child)
    }
}

/// `parent[index]`
pub(crate) fn index_path(parent: &str, index: usize) -> String {
    format!("{}[{}]", parent, index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_add_and_merge() {
        let mut errors = FieldErrors::new();
        errors.add("text", "This field is required.");
        errors.add("text", "Second");

        let mut other = FieldErrors::new();
        other.add("providers", "This list may not be empty.");
        errors.merge(other);

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("text").unwrap().len(), 2);
        assert!(errors.contains("providers"));
    }

    #[test]
    fn test_empty_path_becomes_non_field() {
        let mut errors = FieldErrors::new();
        errors.add("", "Invalid body");
        assert!(errors.contains(NON_FIELD_ERRORS));
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let mut errors = FieldErrors::new();
        errors.add("providers", "This field is required.");
        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            json!({"providers": ["This field is required."]})
        );
    }

    #[test]
    fn test_display() {
        let mut errors = FieldErrors::new();
        errors.add("a", "one");
        errors.add("b", "two");
        assert_eq!(errors.to_string(), "a: one; b: two");
    }

    #[test]
    fn test_into_result() {
        assert!(FieldErrors::new().into_result().is_ok());
        assert!(FieldErrors::non_field("x").into_result().is_err());
    }

    #[test]
    fn test_paths() {
        assert_eq!(join_path("", "text"), "text");
        assert_eq!(join_path("history", "role"), "history.role");
        assert_eq!(index_path("history", 2), "history[2]");
    }
}

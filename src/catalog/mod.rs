//! Operation catalogue
//!
//! The static table of operations: request schemas, per-provider output
//! schemas and the error shapes returned for each HTTP status.

pub mod errors;
pub mod openapi;
pub mod operation;
pub mod operations;
pub mod schema;

pub use operation::{Operation, OperationKind, TEXT_FEATURE};
pub use schema::{Constraints, Property, Schema, SchemaKind};

use std::sync::LazyLock;

static BUILTIN: LazyLock<Catalog> = LazyLock::new(|| Catalog::new(operations::builtin_operations()));

/// Lookup table over catalogued operations
#[derive(Debug, Clone)]
pub struct Catalog {
    operations: Vec<Operation>,
}

impl Catalog {
    pub fn new(operations: Vec<Operation>) -> Self {
        Self { operations }
    }

    /// The process-wide built-in catalogue
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    /// Operation for a kind
    ///
    /// # Panics
    /// If the catalogue was built without that kind; the built-in catalogue
    /// covers every kind.
    pub fn get(&self, kind: OperationKind) -> &Operation {
        self.find(kind)
            .unwrap_or_else(|| panic!("operation {} missing from catalogue", kind))
    }

    pub fn find(&self, kind: OperationKind) -> Option<&Operation> {
        self.operations.iter().find(|op| op.kind == kind)
    }

    /// Resolve `text/<sub>`, `/text/<sub>` or `<sub>`
    pub fn find_path(&self, path: &str) -> Option<&Operation> {
        path.parse().ok().and_then(|kind| self.find(kind))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Operation> {
        self.operations.iter()
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Sorted, de-duplicated provider names across all operations
    pub fn providers(&self) -> Vec<&str> {
        let mut all: Vec<&str> = self
            .operations
            .iter()
            .flat_map(|op| op.providers.iter().map(String::as_str))
            .collect();
        all.sort_unstable();
        all.dedup();
        all
    }
}

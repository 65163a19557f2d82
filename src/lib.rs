//! Multi-provider AI API contract library
//!
//! Catalogue of the text operations, typed wire models, conformance checks
//! and the HTTP service that exposes them.

// Public modules
pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod logging;
pub mod middleware;
pub mod schemas;
pub mod server;
pub mod validation;

// Re-export commonly used types
pub use catalog::{Catalog, Operation, OperationKind};
pub use config::Settings;
pub use error::ApiError;
pub use server::App;
pub use validation::{FieldErrors, ValidationOptions};

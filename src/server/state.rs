//! Application state container
//!
//! Shared by every handler through axum's state extraction. Nothing in it
//! is mutated after startup.

use chrono::{DateTime, Utc};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;

use crate::catalog::{openapi::openapi_document, Catalog};
use crate::config::Settings;
use crate::validation::ValidationOptions;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Operation catalogue served by this instance
    pub catalog: &'static Catalog,

    /// OpenAPI document, rendered once at startup
    pub openapi: Arc<Value>,

    /// Application start time (for uptime calculation)
    pub start_time: Instant,

    /// Wall-clock start time, reported by the health check
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        let catalog = Catalog::builtin();
        let openapi = Arc::new(openapi_document(catalog, &settings.app_version));

        tracing::debug!(
            operations = catalog.len(),
            providers = catalog.providers().len(),
            "Catalogue loaded"
        );

        Self {
            settings: Arc::new(settings),
            catalog,
            openapi,
            start_time: Instant::now(),
            started_at: Utc::now(),
        }
    }

    /// Get the application uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    pub fn validation_options(&self) -> ValidationOptions {
        self.settings.validation_options()
    }
}

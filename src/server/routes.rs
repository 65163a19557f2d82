//! Application routing

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderName,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::api::{health, operations, validate};
use crate::error::ApiError;
use crate::middleware::{log_request, REQUEST_ID_HEADER, TRACE_ID_HEADER};
use crate::server::state::AppState;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/liveness", get(health::liveness));

    let catalogue_routes = Router::new()
        .route("/operations", get(operations::list_operations))
        .route("/operations/:feature/:subfeature", get(operations::get_operation))
        .route("/openapi.json", get(operations::openapi))
        .route(
            "/validate/:feature/:subfeature/request",
            post(validate::validate_request_body),
        )
        .route(
            "/validate/:feature/:subfeature/response",
            post(validate::validate_response_body),
        );

    let router = Router::new()
        .nest("/v1", catalogue_routes)
        .merge(health_routes)
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(state.settings.max_body_bytes));

    // Layer order: last added = outermost = runs first
    let router = if state.settings.cors_enabled {
        router.layer(create_cors_layer())
    } else {
        router
    };

    router
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

async fn not_found() -> ApiError {
    ApiError::NotFound("Not found.".to_string())
}

/// Permissive CORS that exposes the trace headers
fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([
            HeaderName::from_static(TRACE_ID_HEADER),
            HeaderName::from_static(REQUEST_ID_HEADER),
        ])
}

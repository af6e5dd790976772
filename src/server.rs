//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;

use crate::api;
use crate::error::ApiError;
use crate::models::AppConfig;
use crate::services::PrintService;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Receipt Printer API",
        description = "Print images on ESC/POS thermal receipt printers",
        version = "0.1.0",
        license(name = "MIT")
    ),
    paths(api::handle_print),
    components(schemas(api::PrintRequest, api::PrintResponse)),
    tags((name = "Print", description = "Print job submission"))
)]
pub struct ApiDoc;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub print_service: Arc<PrintService>,
}

/// Create application state from configuration.
pub fn create_app_state(config: &AppConfig) -> AppState {
    let print_service = PrintService::from_config(config);
    tracing::info!(sink = %print_service.sink(), "Print sink resolved");
    AppState::new(print_service)
}

impl AppState {
    pub fn new(print_service: PrintService) -> Self {
        Self {
            print_service: Arc::new(print_service),
        }
    }
}

/// Build the API router with all endpoints and middleware.
///
/// CORS mirrors the request origin and allows credentials, so browser pages
/// served from anywhere can submit jobs.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/print", post(handle_print))
        // Health check
        .route("/health", get(|| async { "OK" }))
        .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::very_permissive())
}

async fn handle_print(
    State(state): State<AppState>,
    body: Result<Json<api::PrintRequest>, axum::extract::rejection::JsonRejection>,
) -> Result<Json<api::PrintResponse>, ApiError> {
    api::handle_print(State(state.print_service), body).await
}

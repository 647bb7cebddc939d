// HTTP routes configuration
// Author: kelexine (https://github.com/kelexine)

use super::handlers::{extract_handler, health_handler, index_handler, metrics_handler};
use super::middleware::request_id_layers;
use crate::config::AppConfig;
use crate::error::Result;
use crate::gemini::InferenceClient;
use axum::{extract::DefaultBodyLimit, routing::{get, post}, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub client: Arc<dyn InferenceClient>,
}

pub fn create_router(config: AppConfig, client: Arc<dyn InferenceClient>) -> Result<Router> {
    let body_limit = body_limit(config.upload.max_image_bytes);
    let state = AppState { config, client };

    let (set_request_id, propagate_request_id) = request_id_layers();

    let app = Router::new()
        .route("/", get(index_handler))
        .route("/extract", post(extract_handler))
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(tower_http::limit::RequestBodyLimitLayer::new(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(propagate_request_id)
        .layer(set_request_id)
        .with_state(state);

    Ok(app)
}

/// A submission may carry a fresh upload plus the retained image as base64,
/// so allow three times the image limit and room for the prompt.
fn body_limit(max_image_bytes: usize) -> usize {
    max_image_bytes.saturating_mul(3).saturating_add(1024 * 1024)
}

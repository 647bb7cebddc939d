// HTTP request handlers
// Author: kelexine (https://github.com/kelexine)

use super::form::ExtractForm;
use super::page::{render_page, PageView};
use super::routes::AppState;
use crate::error::Result;
use crate::metrics;
use axum::{
    extract::{Multipart, State},
    http::header,
    response::{Html, IntoResponse},
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};

/// Handler for `GET /`: the empty page.
pub async fn index_handler() -> Html<String> {
    Html(render_page(&PageView::default()))
}

/// Handler for `POST /extract`: one submit cycle, re-rendered as a page.
///
/// Warnings and upstream failures are part of the page, not HTTP errors;
/// only malformed form data escapes as an error response.
pub async fn extract_handler(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Html<String>> {
    let form = ExtractForm::from_multipart(multipart).await?;
    debug!(
        "Received submission: prompt_chars={}, image={:?}",
        form.prompt.chars().count(),
        form.image()
    );

    let mut session = form.into_session(state.config.upload.max_image_bytes);
    let phase = session.submit(state.client.as_ref()).await;
    info!("Submission finished in phase {:?}", phase);

    Ok(Html(render_page(&PageView::from_session(&session))))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub checks: HashMap<String, HealthCheck>,
    pub timestamp: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheck {
    pub status: String,
    pub message: String,
}

pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let mut checks = HashMap::new();
    let mut overall_status = HealthStatus::Healthy;

    // A missing key only fails on first use, so it degrades rather than breaks
    let credential_check = if state.config.gemini.has_credential() {
        HealthCheck {
            status: "ok".to_string(),
            message: "API key configured".to_string(),
        }
    } else {
        overall_status = HealthStatus::Degraded;
        HealthCheck {
            status: "warning".to_string(),
            message: "No API key configured; submissions will fail to authenticate".to_string(),
        }
    };
    checks.insert("credential".to_string(), credential_check);

    checks.insert(
        "model".to_string(),
        HealthCheck {
            status: "ok".to_string(),
            message: format!("Model: {}", state.client.model()),
        },
    );

    Json(HealthResponse {
        status: overall_status,
        checks,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Handler for `GET /metrics` (Prometheus text format)
pub async fn metrics_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        metrics::gather_metrics(),
    )
}

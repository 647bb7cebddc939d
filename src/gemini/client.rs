// Gemini API client for single-shot multimodal generation
// Author: kelexine (https://github.com/kelexine)

use super::InferenceClient;
use crate::config::{GeminiConfig, API_KEY_ENV};
use crate::error::{ExtractorError, Result};
use crate::metrics;
use crate::models::gemini::{Content, GenerateContentRequest, GenerateContentResponse, Part};
use crate::utils::logging::sanitize;
use crate::vision::ImagePayload;
use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, error};

/// Client for the Google Gemini `generateContent` API.
///
/// Built from an explicit [`GeminiConfig`]; the credential is only checked
/// when a request is made, so a missing key never prevents startup.
pub struct GeminiClient {
    http_client: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: &GeminiConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Some(Duration::from_secs(60)))
            .use_rustls_tls();

        if let Some(secs) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let http_client = builder
            .build()
            .map_err(|e| ExtractorError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        debug!("Created HTTP client for model {}", config.model);

        Ok(Self {
            http_client,
            config: config.clone(),
        })
    }

    /// Whether an API key is configured
    pub fn has_credential(&self) -> bool {
        self.config.has_credential()
    }

    /// Get the API base_url
    pub fn base_url(&self) -> &str {
        &self.config.api_base_url
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.api_base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    /// Build the single-turn request: instruction, image, trailing text.
    pub fn build_request(
        instruction_text: &str,
        image: &ImagePayload,
        secondary_text: &str,
    ) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![
                    Part::text(instruction_text),
                    Part::InlineData {
                        inline_data: image.to_inline_data(),
                    },
                    Part::text(secondary_text),
                ],
            }],
        }
    }

    /// Call Gemini `generateContent` API (blocking until the answer is complete).
    pub async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let api_key = self
            .config
            .api_key
            .as_ref()
            .filter(|key| !key.is_blank())
            .ok_or_else(|| {
                ExtractorError::Authentication(format!(
                    "no API key configured; set {} in the environment or .env file",
                    API_KEY_ENV
                ))
            })?;

        let url = self.endpoint();
        debug!("Calling generateContent API for model: {}", self.config.model);

        let start = Instant::now();
        let response = self
            .http_client
            .post(&url)
            .header("x-goog-api-key", api_key.expose())
            .json(request)
            .send()
            .await
            .map_err(|e| {
                metrics::record_gemini_call(&self.config.model, 0, start.elapsed().as_secs_f64());
                ExtractorError::GeminiApi(format!("HTTP error: {}", e))
            })?;

        let status = response.status();
        metrics::record_gemini_call(&self.config.model, status.as_u16(), start.elapsed().as_secs_f64());

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!(
                "Gemini API error: HTTP {} - Response body: {}",
                status,
                sanitize(&error_text)
            );
            let message = Self::extract_error_message(&error_text).unwrap_or(error_text);
            return Err(match status.as_u16() {
                401 | 403 => ExtractorError::Authentication(message),
                429 => ExtractorError::TooManyRequests(format!("Gemini API quota exceeded: {}", message)),
                503 | 504 => ExtractorError::ServiceUnavailable(format!("Upstream unavailable: {}", message)),
                _ => ExtractorError::GeminiApi(format!("HTTP {}: {}", status, message)),
            });
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| ExtractorError::GeminiApi(format!("Failed to read response body: {}", e)))?;

        debug!(
            "Raw Gemini response (first 500 chars): {}",
            response_text.chars().take(500).collect::<String>()
        );

        serde_json::from_str(&response_text).map_err(|e| {
            error!("Failed to parse Gemini response: {}", e);
            ExtractorError::GeminiApi(format!("Response parsing error: {}", e))
        })
    }

    /// Extract error message from API response JSON
    fn extract_error_message(response_text: &str) -> Option<String> {
        #[derive(serde::Deserialize)]
        struct ErrorResponse {
            error: Option<ErrorDetail>,
        }

        #[derive(serde::Deserialize)]
        struct ErrorDetail {
            message: Option<String>,
            status: Option<String>,
        }

        if let Ok(error_resp) = serde_json::from_str::<ErrorResponse>(response_text) {
            if let Some(error) = error_resp.error {
                return error.message.or(error.status);
            }
        }
        None
    }
}

#[async_trait]
impl InferenceClient for GeminiClient {
    async fn generate(
        &self,
        instruction_text: &str,
        image: &ImagePayload,
        secondary_text: &str,
    ) -> Result<String> {
        let request = Self::build_request(instruction_text, image, secondary_text);
        let response = self.generate_content(&request).await?;

        if let Some(reason) = response.block_reason() {
            return Err(ExtractorError::GeminiApi(format!("prompt blocked: {}", reason)));
        }

        let text = response.text();
        if let Some(usage) = &response.usage_metadata {
            debug!(
                prompt_tokens = usage.prompt_token_count,
                output_tokens = usage.candidates_token_count,
                "Gemini usage"
            );
        }
        Ok(text)
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}

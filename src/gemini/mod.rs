// Gemini API client module
// Author: kelexine (https://github.com/kelexine)

mod client;

pub use client::GeminiClient;

use crate::error::Result;
use crate::vision::ImagePayload;
use async_trait::async_trait;

/// A multimodal model that answers a prompt about one image.
///
/// Implementations perform exactly one outbound call per `generate` and
/// keep no state between calls.
#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// Send instruction, image and trailing text; return the model's answer.
    async fn generate(
        &self,
        instruction_text: &str,
        image: &ImagePayload,
        secondary_text: &str,
    ) -> Result<String>;

    /// Model identifier, for logs and the health endpoint.
    fn model(&self) -> &str;
}

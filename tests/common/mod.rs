// Shared fixtures for integration tests
// Author: kelexine (https://github.com/kelexine)

#![allow(dead_code)]

use async_trait::async_trait;
use base64::Engine;
use image_extractor::error::{ExtractorError, Result};
use image_extractor::gemini::InferenceClient;
use image_extractor::vision::ImagePayload;
use std::sync::Mutex;

/// A valid 10x10 solid red PNG.
pub const RED_SQUARE_PNG_B64: &str =
    "iVBORw0KGgoAAAANSUhEUgAAAAoAAAAKCAIAAAACUFjqAAAAEklEQVR42mP4z8CABzGMSmNDALfKY53W1e90AAAAAElFTkSuQmCC";

pub fn red_square_png() -> Vec<u8> {
    base64::engine::general_purpose::STANDARD
        .decode(RED_SQUARE_PNG_B64)
        .unwrap()
}

/// JPEG SOI/APP0 header followed by filler bytes.
pub fn invoice_jpeg() -> Vec<u8> {
    let mut bytes = b"\xFF\xD8\xFF\xE0\x00\x10JFIF\x00\x01\x01\x00\x00\x01\x00\x01\x00\x00".to_vec();
    bytes.extend((0u8..=255).cycle().take(512));
    bytes.extend_from_slice(b"\xFF\xD9");
    bytes
}

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub instruction_text: String,
    pub image: ImagePayload,
    pub secondary_text: String,
}

enum Reply {
    Text(String),
    Fail(String),
}

/// Test double that records every call and answers with a canned reply.
pub struct FakeClient {
    reply: Reply,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeClient {
    pub fn answering(text: &str) -> Self {
        Self {
            reply: Reply::Text(text.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Reply::Fail(message.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl InferenceClient for FakeClient {
    async fn generate(
        &self,
        instruction_text: &str,
        image: &ImagePayload,
        secondary_text: &str,
    ) -> Result<String> {
        self.calls.lock().unwrap().push(RecordedCall {
            instruction_text: instruction_text.to_string(),
            image: image.clone(),
            secondary_text: secondary_text.to_string(),
        });

        match &self.reply {
            Reply::Text(text) => Ok(text.clone()),
            Reply::Fail(message) => Err(ExtractorError::GeminiApi(message.clone())),
        }
    }

    fn model(&self) -> &str {
        "fake-model"
    }
}

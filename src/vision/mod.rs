//! Image upload handling and request building.
//!
//! Turns an uploaded file into the `InlineData` Gemini expects and pairs it
//! with the user's instruction. The declared media type is trusted; no
//! sniffing, resizing or compression takes place.
//!
//! # Submodules
//!
//! - `models`: Upload, payload and request types plus accepted formats.
//! - `payload`: Validation and assembly of the inference request.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod models;
pub mod payload;

pub use models::{ImageFormat, ImagePayload, InferenceRequest, UploadedFile};
pub use payload::{build_image_payload, build_inference_request, is_blank, MAX_IMAGE_SIZE_BYTES};

// Request building: upload -> image payload -> inference request
// Author: kelexine (https://github.com/kelexine)

use super::models::{ImageFormat, ImagePayload, InferenceRequest, UploadedFile};
use crate::error::{ExtractorError, Result};

/// Validation limits
pub const MAX_IMAGE_SIZE_BYTES: usize = 20 * 1024 * 1024; // 20MB (Gemini limit)

/// Turn an upload into the payload sent to the model.
///
/// The declared media type is trusted as-is; only the format allow-list,
/// emptiness and size are checked.
pub fn build_image_payload(upload: Option<&UploadedFile>, max_bytes: usize) -> Result<ImagePayload> {
    let upload = upload.ok_or_else(|| ExtractorError::MissingInput("No file uploaded".to_string()))?;

    ImageFormat::from_mime_type(&upload.media_type)
        .ok_or_else(|| ExtractorError::UnsupportedMediaType(upload.media_type.clone()))?;

    if upload.bytes.is_empty() {
        return Err(ExtractorError::EmptyImage);
    }

    validate_image_size(upload.bytes.len(), max_bytes)?;

    Ok(ImagePayload {
        media_type: upload.media_type.clone(),
        data: upload.bytes.clone(),
    })
}

/// Validate image data size
pub fn validate_image_size(data_len: usize, max_bytes: usize) -> Result<()> {
    if data_len > max_bytes {
        return Err(ExtractorError::ImageTooLarge {
            size: data_len,
            max: max_bytes,
        });
    }
    Ok(())
}

/// True when the text is empty or whitespace only.
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Assemble one inference request. The instruction doubles as the
/// trailing text part.
pub fn build_inference_request(
    instruction: &str,
    upload: Option<&UploadedFile>,
    max_bytes: usize,
) -> Result<InferenceRequest> {
    if is_blank(instruction) {
        return Err(ExtractorError::MissingInput("Prompt is empty".to_string()));
    }

    let image = build_image_payload(upload, max_bytes)?;

    Ok(InferenceRequest {
        instruction_text: instruction.to_string(),
        image,
        secondary_text: instruction.to_string(),
    })
}

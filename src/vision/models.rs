// Vision models and types
// Author: kelexine (https://github.com/kelexine)

use crate::models::gemini::InlineData;
use base64::Engine;
use bytes::Bytes;
use phf::phf_map;

/// Supported image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
}

/// Declared media types accepted at the upload boundary
static ACCEPTED_MEDIA_TYPES: phf::Map<&'static str, ImageFormat> = phf_map! {
    "image/jpeg" => ImageFormat::Jpeg,
    "image/jpg" => ImageFormat::Jpeg,
    "image/pjpeg" => ImageFormat::Jpeg,
    "image/png" => ImageFormat::Png,
};

impl ImageFormat {
    /// Look up a declared MIME type (case-insensitive, parameters ignored)
    pub fn from_mime_type(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or_default().trim().to_lowercase();
        ACCEPTED_MEDIA_TYPES.get(essence.as_str()).copied()
    }

    /// Extensions offered by the upload field
    pub fn accepted_extensions() -> &'static [&'static str] {
        &[".jpg", ".jpeg", ".png"]
    }
}

/// A file as received from the upload boundary.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    /// Media type declared by the uploader.
    pub media_type: String,
    pub bytes: Bytes,
}

impl UploadedFile {
    pub fn new(file_name: Option<String>, media_type: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name,
            media_type: media_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Encode as a `data:` URL, used to re-embed the upload in the page.
    pub fn to_data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.media_type,
            base64::engine::general_purpose::STANDARD.encode(&self.bytes)
        )
    }

    /// Parse a `data:<type>;base64,<data>` URL back into an upload.
    pub fn from_data_url(url: &str) -> Option<Self> {
        let rest = url.strip_prefix("data:")?;
        let (header, data) = rest.split_once(',')?;
        let media_type = header.strip_suffix(";base64")?;
        let bytes = base64::engine::general_purpose::STANDARD.decode(data.trim()).ok()?;
        Some(Self::new(None, media_type, bytes))
    }
}

// Bytes are summarized so uploads can be logged
impl std::fmt::Debug for UploadedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadedFile")
            .field("file_name", &self.file_name)
            .field("media_type", &self.media_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Image bytes paired with their declared media type.
#[derive(Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub media_type: String,
    pub data: Bytes,
}

impl ImagePayload {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Gemini expects base64 data as-is (no `data:` prefix)
    pub fn to_inline_data(&self) -> InlineData {
        InlineData {
            mime_type: self.media_type.clone(),
            data: base64::engine::general_purpose::STANDARD.encode(&self.data),
        }
    }
}

impl std::fmt::Debug for ImagePayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImagePayload")
            .field("media_type", &self.media_type)
            .field("len", &self.data.len())
            .finish()
    }
}

/// Everything one generation call needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceRequest {
    pub instruction_text: String,
    pub image: ImagePayload,
    pub secondary_text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_mime_type() {
        assert_eq!(ImageFormat::from_mime_type("image/png"), Some(ImageFormat::Png));
        assert_eq!(ImageFormat::from_mime_type("IMAGE/JPEG"), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_mime_type("image/jpg"), Some(ImageFormat::Jpeg));
        assert_eq!(
            ImageFormat::from_mime_type("image/png; charset=binary"),
            Some(ImageFormat::Png)
        );
        assert_eq!(ImageFormat::from_mime_type("image/gif"), None);
        assert_eq!(ImageFormat::from_mime_type("application/pdf"), None);
    }

    #[test]
    fn test_data_url_round_trip() {
        let upload = UploadedFile::new(Some("a.png".to_string()), "image/png", vec![0x89, b'P', b'N', b'G']);
        let parsed = UploadedFile::from_data_url(&upload.to_data_url()).unwrap();
        assert_eq!(parsed.media_type, "image/png");
        assert_eq!(parsed.bytes, upload.bytes);
        assert!(parsed.file_name.is_none());
    }

    #[test]
    fn test_from_data_url_rejects_garbage() {
        assert!(UploadedFile::from_data_url("").is_none());
        assert!(UploadedFile::from_data_url("data:image/png,plain").is_none());
        assert!(UploadedFile::from_data_url("data:image/png;base64,!!!").is_none());
    }

    #[test]
    fn test_debug_hides_bytes() {
        let upload = UploadedFile::new(None, "image/png", vec![1u8; 64]);
        let debug_str = format!("{:?}", upload);
        assert!(debug_str.contains("len: 64"));
    }
}

// Multipart form parsing for the submit endpoint
// Author: kelexine (https://github.com/kelexine)

use crate::error::{ExtractorError, Result};
use crate::session::Session;
use crate::vision::UploadedFile;
use axum::extract::Multipart;
use tracing::{debug, warn};

/// Fields posted by the page.
#[derive(Debug, Default)]
pub struct ExtractForm {
    pub prompt: String,
    /// File chosen in this submission.
    pub upload: Option<UploadedFile>,
    /// Image carried over from the previous render.
    pub retained: Option<UploadedFile>,
}

impl ExtractForm {
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self> {
        let mut form = ExtractForm::default();

        while let Some(field) = multipart.next_field().await.map_err(invalid_form)? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "prompt" => {
                    form.prompt = field.text().await.map_err(invalid_form)?;
                }
                "image" => {
                    let file_name = field
                        .file_name()
                        .filter(|n| !n.is_empty())
                        .map(str::to_string);
                    let media_type = field
                        .content_type()
                        .unwrap_or("application/octet-stream")
                        .to_string();
                    let bytes = field.bytes().await.map_err(invalid_form)?;

                    // Browsers post an empty, unnamed part when no file is chosen
                    if file_name.is_none() && bytes.is_empty() {
                        continue;
                    }
                    form.upload = Some(UploadedFile::new(file_name, media_type, bytes));
                }
                "retained_image" => {
                    let data_url = field.text().await.map_err(invalid_form)?;
                    if data_url.is_empty() {
                        continue;
                    }
                    form.retained = UploadedFile::from_data_url(&data_url);
                    if form.retained.is_none() {
                        warn!("Dropping malformed retained image");
                    }
                }
                other => debug!("Ignoring unknown form field: {}", other),
            }
        }

        Ok(form)
    }

    /// The image this submission uses: a fresh upload wins over the retained one.
    pub fn image(&self) -> Option<&UploadedFile> {
        self.upload.as_ref().or(self.retained.as_ref())
    }

    /// Replay the posted inputs into a fresh session.
    pub fn into_session(self, max_image_bytes: usize) -> Session {
        let mut session = Session::new(max_image_bytes);
        session.set_prompt(self.prompt);
        if let Some(image) = self.upload.or(self.retained) {
            session.attach_image(image);
        }
        session
    }
}

fn invalid_form(e: axum::extract::multipart::MultipartError) -> ExtractorError {
    ExtractorError::InvalidRequest(format!("Malformed form data: {}", e))
}

// Session state machine
// Author: kelexine (https://github.com/kelexine)

use super::{MISSING_IMAGE_WARNING, MISSING_PROMPT_WARNING};
use crate::error::{ExtractorError, Result, Severity};
use crate::gemini::InferenceClient;
use crate::metrics;
use crate::vision::{self, InferenceRequest, UploadedFile, MAX_IMAGE_SIZE_BYTES};
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    AwaitingInputs,
    Submitting,
    Success,
    Failed,
}

/// What the page shows below the inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Model answer, displayed verbatim (may be empty).
    Answer(String),
    /// Incomplete input; nothing was sent.
    Warning(String),
    /// Something failed; the message is the underlying error text.
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitRejection {
    /// A submission is already outstanding.
    AlreadySubmitting,
    /// A precondition failed; the session shows the warning.
    MissingInput(&'static str),
    /// The upload could not be turned into a payload.
    InvalidImage(String),
}

#[derive(Debug)]
pub struct Session {
    prompt: String,
    image: Option<UploadedFile>,
    phase: Phase,
    notice: Option<Notice>,
    max_image_bytes: usize,
    submission_id: Option<Uuid>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(MAX_IMAGE_SIZE_BYTES)
    }
}

impl Session {
    pub fn new(max_image_bytes: usize) -> Self {
        Self {
            prompt: String::new(),
            image: None,
            phase: Phase::Idle,
            notice: None,
            max_image_bytes,
            submission_id: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn image(&self) -> Option<&UploadedFile> {
        self.image.as_ref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Inputs are editable in every phase except while a call is outstanding.
    pub fn accepts_input(&self) -> bool {
        self.phase != Phase::Submitting
    }

    pub fn set_prompt(&mut self, text: impl Into<String>) {
        if self.touch() {
            self.prompt = text.into();
        }
    }

    pub fn attach_image(&mut self, upload: UploadedFile) {
        if self.touch() {
            self.image = Some(upload);
        }
    }

    pub fn clear_image(&mut self) {
        if self.touch() {
            self.image = None;
        }
    }

    /// Back to `Idle` with all inputs and the last outcome cleared.
    pub fn reset(&mut self) {
        if self.accepts_input() {
            *self = Self::new(self.max_image_bytes);
        }
    }

    fn touch(&mut self) -> bool {
        if !self.accepts_input() {
            warn!("Ignoring input while a submission is outstanding");
            return false;
        }
        self.phase = Phase::AwaitingInputs;
        true
    }

    /// Check preconditions and build the request; moves to `Submitting`.
    ///
    /// On rejection no request exists, so no network call can happen.
    pub fn begin_submit(&mut self) -> std::result::Result<InferenceRequest, SubmitRejection> {
        if self.phase == Phase::Submitting {
            return Err(SubmitRejection::AlreadySubmitting);
        }

        if vision::is_blank(&self.prompt) {
            return Err(self.reject_missing(MISSING_PROMPT_WARNING));
        }
        if self.image.is_none() {
            return Err(self.reject_missing(MISSING_IMAGE_WARNING));
        }

        match vision::build_inference_request(&self.prompt, self.image.as_ref(), self.max_image_bytes) {
            Ok(request) => {
                let id = Uuid::new_v4();
                info!(
                    submission_id = %id,
                    media_type = %request.image.media_type,
                    image_bytes = request.image.len(),
                    "Submitting image for extraction"
                );
                metrics::record_image(&request.image.media_type, request.image.len());
                self.submission_id = Some(id);
                self.phase = Phase::Submitting;
                self.notice = None;
                Ok(request)
            }
            Err(e) if e.severity() == Severity::Warning => Err(self.reject_missing(MISSING_IMAGE_WARNING)),
            Err(e) => {
                let message = e.to_string();
                self.fail(&e);
                Err(SubmitRejection::InvalidImage(message))
            }
        }
    }

    /// Record the result of the inference call. Inputs are kept either way.
    pub fn complete(&mut self, result: Result<String>) {
        if self.phase != Phase::Submitting {
            warn!("Ignoring result with no outstanding submission");
            return;
        }

        match result {
            Ok(text) => {
                info!(
                    submission_id = ?self.submission_id,
                    answer_chars = text.chars().count(),
                    "Extraction succeeded"
                );
                metrics::record_submission("success");
                self.phase = Phase::Success;
                self.notice = Some(Notice::Answer(text));
            }
            Err(e) => self.fail(&e),
        }
        self.submission_id = None;
    }

    /// Run one full cycle: preconditions, one inference call, outcome.
    pub async fn submit(&mut self, client: &dyn InferenceClient) -> Phase {
        let request = match self.begin_submit() {
            Ok(request) => request,
            Err(_) => return self.phase,
        };

        let result = client
            .generate(&request.instruction_text, &request.image, &request.secondary_text)
            .await;
        self.complete(result);
        self.phase
    }

    fn reject_missing(&mut self, warning: &'static str) -> SubmitRejection {
        metrics::record_submission("warning");
        self.phase = Phase::AwaitingInputs;
        self.notice = Some(Notice::Warning(warning.to_string()));
        SubmitRejection::MissingInput(warning)
    }

    fn fail(&mut self, e: &ExtractorError) {
        warn!(submission_id = ?self.submission_id, "Extraction failed: {}", e);
        metrics::record_submission("error");
        self.phase = Phase::Failed;
        self.notice = Some(Notice::Error(format!("An error occurred: {}", e)));
    }
}

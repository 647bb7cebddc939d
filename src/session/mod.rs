//! Interaction state machine for one user's submit/await/display cycle.
//!
//! A [`Session`] holds the inputs the user has provided and the outcome of
//! the last submission. It is driven by discrete actions (`set_prompt`,
//! `attach_image`, `submit`) and by the result of the inference call, so the
//! whole cycle can be exercised without a UI.
//!
//! ```text
//! Idle -> AwaitingInputs -> Submitting -> Success | Failed
//!              ^                                   |
//!              +------------- next action ---------+
//! ```
//!
//! Author: kelexine (<https://github.com/kelexine>)

mod state;

pub use state::{Notice, Phase, Session, SubmitRejection};

/// Shown when the prompt is empty or whitespace only.
pub const MISSING_PROMPT_WARNING: &str = "Please provide an input prompt.";

/// Shown when no image has been uploaded.
pub const MISSING_IMAGE_WARNING: &str = "Please upload an image.";

/// Banner shown above a successful answer.
pub const SUCCESS_BANNER: &str = "Here is the information extracted from the image:";

// Metrics module for Prometheus observability
// Author: kelexine (https://github.com/kelexine)

mod registry;

pub use registry::{
    gather_metrics,
    SUBMISSIONS_TOTAL,
    IMAGE_BYTES,
    GEMINI_API_CALLS,
    GEMINI_API_DURATION,
};

/// Helper to record the outcome of one submission
pub fn record_submission(outcome: &str) {
    SUBMISSIONS_TOTAL.with_label_values(&[outcome]).inc();
}

/// Helper to record the size of an image sent upstream
pub fn record_image(media_type: &str, size: usize) {
    IMAGE_BYTES.with_label_values(&[media_type]).observe(size as f64);
}

/// Helper to record Gemini API call metrics
pub fn record_gemini_call(model: &str, status_code: u16, duration_secs: f64) {
    GEMINI_API_CALLS
        .with_label_values(&[model, &status_code.to_string()])
        .inc();

    GEMINI_API_DURATION
        .with_label_values(&[model])
        .observe(duration_secs);
}

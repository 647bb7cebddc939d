//! Structured logging and security-focused trace utilities.
//!
//! This module configures the `tracing` ecosystem for the application,
//! supporting multiple output formats and providing utilities to prevent
//! the Google API key from leaking into logs.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use crate::config::LoggingConfig;
use crate::error::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the global tracing subscriber for the application.
///
/// Supports two output formats:
/// - `json`: Structured JSON logs for production ingestion.
/// - `pretty` (default): Human-readable, colorized output for development.
///
/// Log levels are controlled via the `RUST_LOG` environment variable or
/// the provided `LoggingConfig`.
pub fn init(config: &LoggingConfig) -> Result<()> {
    // Configure filter from environment or config file
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}

/// Sanitizes sensitive information from log messages.
///
/// Every Google API key (`AIza` followed by the key body) and every
/// `Bearer` token is replaced with a placeholder, so upstream error bodies
/// that echo request headers can be logged safely.
pub fn sanitize(input: &str) -> String {
    let mut result = redact_after(input, "AIza", "[REDACTED_API_KEY]", true);
    result = redact_after(&result, "Bearer ", "Bearer [REDACTED_TOKEN]", false);
    result
}

fn redact_after(input: &str, marker: &str, placeholder: &str, include_marker: bool) -> String {
    let mut result = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find(marker) {
        result.push_str(&rest[..pos]);
        let body_start = pos + marker.len();
        let body_len = rest[body_start..]
            .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')))
            .unwrap_or(rest.len() - body_start);

        if body_len == 0 && !include_marker {
            result.push_str(marker);
        } else {
            result.push_str(placeholder);
        }
        rest = &rest[body_start + body_len..];
    }

    result.push_str(rest);
    result
}

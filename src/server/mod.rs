//! Axum-based HTTP server serving the single-page extractor UI.
//!
//! # Components
//!
//! - `handlers`: The page, submit, health and metrics endpoints.
//! - `form`: Multipart parsing of a submission.
//! - `page`: HTML rendering of a session state.
//! - `middleware`: Request ID tracking.
//! - `routes`: The router configuration that ties everything together.
//!
//! Author: kelexine (<https://github.com/kelexine>)

mod form;
mod handlers;
mod middleware;
pub mod page;
mod routes;

pub use form::ExtractForm;
pub use routes::{create_router, AppState};

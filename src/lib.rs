// image-extractor - Ask Gemini about an uploaded image
// Author: kelexine (https://github.com/kelexine)

pub mod cli;
pub mod config;
pub mod error;
pub mod gemini;
pub mod metrics;
pub mod models;
pub mod server;
pub mod session;
pub mod utils;
pub mod vision;

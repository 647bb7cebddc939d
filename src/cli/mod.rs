// CLI module for image-extractor
// Author: kelexine (https://github.com/kelexine)

use clap::Parser;
use std::path::PathBuf;

/// image-extractor - upload an image, ask a question, read Gemini's answer
#[derive(Parser, Debug)]
#[command(name = "image-extractor", version, about, long_about = None)]
pub struct Args {
    /// Path to a TOML config file (default: ~/.image-extractor/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Address to bind the web UI to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to serve the web UI on
    #[arg(long)]
    pub port: Option<u16>,
}

impl Args {
    /// Apply CLI overrides, the highest-precedence configuration source
    pub fn apply(&self, config: &mut crate::config::AppConfig) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
    }
}

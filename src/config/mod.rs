// Configuration module
// Author: kelexine (https://github.com/kelexine)

mod models;

pub use models::*;

use crate::error::{ExtractorError, Result};
use config::{Config, Environment, File};
use std::path::{Path, PathBuf};

/// Environment variable holding the Google API credential.
pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. CLI arguments (highest, applied by the caller)
    /// 2. Environment variables
    /// 3. Config file
    /// 4. Defaults (lowest)
    ///
    /// A missing API key is not an error here; it surfaces on first use.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let path = config_path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::default_config_path);

        let config = Config::builder()
            // Start with defaults
            .add_source(Config::try_from(&Self::default())?)
            // Load from config file if it exists
            .add_source(File::from(path).required(false))
            // Override with environment variables (IMAGE_EXTRACTOR__GEMINI__MODEL)
            .add_source(
                Environment::with_prefix("IMAGE_EXTRACTOR")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()
            .map_err(|e| ExtractorError::Config(e.to_string()))?;

        let mut app_config: AppConfig = config
            .try_deserialize()
            .map_err(|e| ExtractorError::Config(e.to_string()))?;

        // A blank configured key counts as unset
        if !app_config.gemini.has_credential() {
            app_config.gemini.api_key = std::env::var(API_KEY_ENV)
                .ok()
                .filter(|key| !key.trim().is_empty())
                .map(ApiKey::new);
        }

        Ok(app_config)
    }

    fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".image-extractor")
            .join("config.toml")
    }
}

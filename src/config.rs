use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub google: GoogleConfig,
    pub performance: PerformanceConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Credentials and model selection for the Google-hosted providers.
/// One process-wide API key covers both speech recognition and Gemini.
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleConfig {
    pub api_key: String,
    pub gemini_model: String,
    pub speech_language: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PerformanceConfig {
    pub provider_timeout_seconds: u64,
    pub max_upload_size_mb: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists (for local development)
        dotenvy::dotenv().ok();

        let config = Config {
            server: ServerConfig {
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("PORT")
                    .unwrap_or_else(|_| "8080".to_string())
                    .parse()
                    .context("Failed to parse PORT")?,
            },
            google: GoogleConfig {
                api_key: env::var("GOOGLE_API_KEY")
                    .context("GOOGLE_API_KEY must be set")?,
                gemini_model: env::var("GEMINI_MODEL")
                    .unwrap_or_else(|_| "gemini-1.5-pro".to_string()),
                speech_language: env::var("SPEECH_LANGUAGE")
                    .unwrap_or_else(|_| "en-US".to_string()),
            },
            performance: PerformanceConfig {
                provider_timeout_seconds: env::var("PROVIDER_TIMEOUT_SECONDS")
                    .unwrap_or_else(|_| "30".to_string())
                    .parse()
                    .context("Failed to parse PROVIDER_TIMEOUT_SECONDS")?,
                max_upload_size_mb: env::var("MAX_UPLOAD_SIZE_MB")
                    .unwrap_or_else(|_| "25".to_string())
                    .parse()
                    .context("Failed to parse MAX_UPLOAD_SIZE_MB")?,
            },
        };

        if config.google.api_key.trim().is_empty() {
            anyhow::bail!("GOOGLE_API_KEY must not be empty");
        }

        Ok(config)
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn max_upload_size_bytes(&self) -> usize {
        self.performance.max_upload_size_mb * 1024 * 1024
    }
}

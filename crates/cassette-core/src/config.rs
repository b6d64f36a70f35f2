//! Configuration module
//!
//! This module provides the application configuration, loaded from
//! environment variables with sensible defaults for local development.

use std::env;

const SERVER_PORT: u16 = 8080;
const MAX_UPLOAD_SIZE_MB: usize = 2;
const REQUEST_BODY_LIMIT_MB: usize = 8;
const MEDIA_STORAGE_PATH: &str = "./uploads";
const TRANSCRIPT_STORAGE_PATH: &str = "./transcripts";
const MEDIA_BASE_URL: &str = "http://localhost:8080/media";
const ALLOWED_MEDIA_TYPES: &str = "image/jpeg,image/png,image/gif,image/webp,image/svg+xml";

/// Application configuration.
///
/// Built once at startup and passed to the components that need it; nothing
/// reads environment variables after construction.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    pub cors_origins: Vec<String>,
    /// Root directory for media objects
    pub media_storage_path: String,
    /// Root directory for transcript objects
    pub transcript_storage_path: String,
    /// Public base URL media identifiers are appended to
    pub media_base_url: String,
    /// Per-object size ceiling, enforced in the ingest path
    pub max_upload_size_bytes: usize,
    /// Outer HTTP body limit; `validate` requires it above the object ceiling
    pub request_body_limit_bytes: usize,
    /// MIME allow-list for the media pipeline (lowercase, normalized)
    pub allowed_media_types: Vec<String>,
}

impl Config {
    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        self.environment.to_lowercase().eq("production") || self.environment.to_lowercase().eq("prod")
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins: Vec<String> = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();

        let max_upload_size_mb = env::var("MAX_UPLOAD_SIZE_MB")
            .unwrap_or_else(|_| MAX_UPLOAD_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(MAX_UPLOAD_SIZE_MB);

        let request_body_limit_mb = env::var("REQUEST_BODY_LIMIT_MB")
            .unwrap_or_else(|_| REQUEST_BODY_LIMIT_MB.to_string())
            .parse::<usize>()
            .unwrap_or(REQUEST_BODY_LIMIT_MB);

        let allowed_media_types = env::var("ALLOWED_MEDIA_TYPES")
            .unwrap_or_else(|_| ALLOWED_MEDIA_TYPES.to_string())
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        let config = Config {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            environment,
            cors_origins,
            media_storage_path: env::var("MEDIA_STORAGE_PATH")
                .unwrap_or_else(|_| MEDIA_STORAGE_PATH.to_string()),
            transcript_storage_path: env::var("TRANSCRIPT_STORAGE_PATH")
                .unwrap_or_else(|_| TRANSCRIPT_STORAGE_PATH.to_string()),
            media_base_url: env::var("MEDIA_BASE_URL")
                .unwrap_or_else(|_| MEDIA_BASE_URL.to_string()),
            max_upload_size_bytes: max_upload_size_mb * 1024 * 1024,
            request_body_limit_bytes: request_body_limit_mb * 1024 * 1024,
            allowed_media_types,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.is_production() && self.cors_origins.iter().any(|o| o.trim() == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        if self.max_upload_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_UPLOAD_SIZE_MB must be greater than 0"));
        }

        if self.request_body_limit_bytes <= self.max_upload_size_bytes {
            return Err(anyhow::anyhow!(
                "REQUEST_BODY_LIMIT_MB must be greater than MAX_UPLOAD_SIZE_MB"
            ));
        }

        if self.media_storage_path.trim().is_empty() {
            return Err(anyhow::anyhow!("MEDIA_STORAGE_PATH must not be empty"));
        }

        if self.transcript_storage_path.trim().is_empty() {
            return Err(anyhow::anyhow!("TRANSCRIPT_STORAGE_PATH must not be empty"));
        }

        if self.allowed_media_types.is_empty() {
            return Err(anyhow::anyhow!(
                "ALLOWED_MEDIA_TYPES must contain at least one MIME type"
            ));
        }

        Ok(())
    }
}

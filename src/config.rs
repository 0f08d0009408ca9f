//! # Service Configuration
//!
//! JSON config file with serde defaults for every field, so an empty
//! `{}` (or no file at all) yields a working development setup.
//! `JWT_SECRET` and `PORT` environment variables override the file.

use std::path::Path;

use chrono::Duration;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auth::JwtConfig;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Read(String),

    #[error("Invalid config JSON: {0}")]
    Parse(String),
}

/// Service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 5000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// CORS allowed origins; empty means permissive for development
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    /// Directory for stored profile pictures (default: "uploads")
    #[serde(default = "default_upload_dir")]
    pub upload_dir: String,

    /// JWT signing secret; override with `JWT_SECRET` in deployment
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,

    /// Token lifetime in days (default: 30)
    #[serde(default = "default_token_ttl_days")]
    pub token_ttl_days: i64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(),
        "http://localhost:5173".to_string(),
    ]
}

fn default_upload_dir() -> String {
    "uploads".to_string()
}

fn default_jwt_secret() -> String {
    "CHANGE_THIS_SECRET_IN_PRODUCTION".to_string()
}

fn default_token_ttl_days() -> i64 {
    30
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: default_cors_origins(),
            upload_dir: default_upload_dir(),
            jwt_secret: default_jwt_secret(),
            token_ttl_days: default_token_ttl_days(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Read(e.to_string()))?;
        serde_json::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply environment overrides (`JWT_SECRET`, `PORT`)
    pub fn apply_env(&mut self) {
        if let Ok(secret) = std::env::var("JWT_SECRET") {
            if !secret.is_empty() {
                self.jwt_secret = secret;
            }
        }
        if let Ok(port) = std::env::var("PORT") {
            if let Ok(port) = port.parse() {
                self.port = port;
            }
        }
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// JWT configuration derived from this config
    pub fn jwt_config(&self) -> JwtConfig {
        JwtConfig {
            secret: self.jwt_secret.clone(),
            token_ttl: Duration::days(self.token_ttl_days),
            ..JwtConfig::default()
        }
    }
}

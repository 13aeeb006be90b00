// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

/// Weight used for calorie estimates until the user sets their own.
pub const DEFAULT_WEIGHT_KG: f32 = 80.0;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// JSON snapshot file for completed runs (in-memory only if unset)
    pub runs_file: Option<PathBuf>,
    /// Initial body weight for calorie estimates
    pub default_weight_kg: f32,
    /// Initial display name
    pub user_name: String,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            port: 8080,
            frontend_url: "http://localhost:5173".to_string(),
            runs_file: None,
            default_weight_kg: DEFAULT_WEIGHT_KG,
            user_name: String::new(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is honored for local development.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let port = match env::var("PORT") {
            Ok(raw) => {
                let parsed = raw.trim().parse::<u16>().ok();
                parsed.ok_or(ConfigError::Invalid("PORT", raw))?
            }
            Err(_) => 8080,
        };

        let default_weight_kg = match env::var("DEFAULT_WEIGHT_KG") {
            Ok(raw) => {
                let parsed = raw
                    .trim()
                    .parse::<f32>()
                    .ok()
                    .filter(|w| *w > 0.0 && w.is_finite());
                parsed.ok_or(ConfigError::Invalid("DEFAULT_WEIGHT_KG", raw))?
            }
            Err(_) => DEFAULT_WEIGHT_KG,
        };

        Ok(Self {
            port,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            runs_file: env::var("RUNS_FILE")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            default_weight_kg,
            user_name: env::var("USER_NAME")
                .map(|v| v.trim().to_string())
                .unwrap_or_default(),
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1:?}")]
    Invalid(&'static str, String),
}

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

use crate::models::form::FormArrayPolicy;

/// Application configuration loaded from environment variables.
/// Startup fails if a variable is set to an unusable value.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// JSON model for the text classifier. The classify endpoint answers 503 without it.
    pub classifier_model_path: Option<PathBuf>,
    pub uncertain_tau: f64,
    pub form_array_policy: FormArrayPolicy,
    pub fallback_website_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let uncertain_tau = std::env::var("UNCERTAIN_TAU")
            .unwrap_or_else(|_| "0.5".to_string())
            .parse::<f64>()
            .context("UNCERTAIN_TAU must be a number")?;
        if !(uncertain_tau >= 0.0 && uncertain_tau.is_finite()) {
            return Err(anyhow!("UNCERTAIN_TAU must be a finite, non-negative number"));
        }

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            classifier_model_path: optional_env("CLASSIFIER_MODEL_PATH").map(PathBuf::from),
            uncertain_tau,
            form_array_policy: std::env::var("FORM_ARRAY_POLICY")
                .unwrap_or_else(|_| "strict".to_string())
                .parse::<FormArrayPolicy>()
                .map_err(|e| anyhow!(e))
                .context("FORM_ARRAY_POLICY must be 'strict' or 'truncate'")?,
            fallback_website_url: optional_env("FALLBACK_WEBSITE_URL"),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            classifier_model_path: None,
            uncertain_tau: 0.5,
            form_array_policy: FormArrayPolicy::Strict,
            fallback_website_url: None,
        }
    }
}

/// Set and non-blank, otherwise `None`.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

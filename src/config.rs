use anyhow::{Context, Result};
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Settings for the remote backends, read from the environment
#[derive(Debug, Clone)]
pub struct Config {
    // Hugging Face (Marian, NLLB)
    pub hf_api_token: Option<String>,
    pub hf_inference_url: String,
    pub hf_hub_url: String,

    // Google Translate
    pub google_api_key: Option<String>,

    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup (the environment, a map in tests)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let timeout_secs = match non_empty("BABEL_TIMEOUT_SECS") {
            Some(v) => v.trim().parse::<u64>().with_context(|| {
                format!("BABEL_TIMEOUT_SECS must be a number of seconds, got '{}'", v)
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            hf_api_token: non_empty("HF_API_TOKEN"),
            hf_inference_url: non_empty("HF_INFERENCE_URL")
                .unwrap_or_else(|| babel_mt::huggingface::DEFAULT_INFERENCE_URL.to_string()),
            hf_hub_url: non_empty("HF_HUB_URL")
                .unwrap_or_else(|| babel_mt::huggingface::DEFAULT_HUB_URL.to_string()),

            google_api_key: non_empty(babel_mt::google_translate::API_KEY_VAR),

            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

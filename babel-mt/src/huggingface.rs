//! Hugging Face client shared by the Marian and NLLB backends
//!
//! Two endpoints are used:
//!
//! - the model hub (`GET {hub}/api/models/{id}`) to check that a model exists
//!   before a session is created for it, and
//! - the inference API (`POST {inference}/models/{id}`) to run translations.
//!
//! # Authentication
//!
//! An access token is optional for public models but strongly recommended;
//! anonymous requests are heavily rate limited.

use crate::error::{MtError, MtResult};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_INFERENCE_URL: &str = "https://router.huggingface.co/hf-inference";
pub const DEFAULT_HUB_URL: &str = "https://huggingface.co";

#[derive(Debug, Deserialize)]
struct TranslationOutput {
    translation_text: String,
}

#[derive(Clone)]
pub struct HuggingFaceClient {
    client: reqwest::Client,
    inference_url: String,
    hub_url: String,
    token: Option<String>,
}

impl HuggingFaceClient {
    /// Create a client against the public Hugging Face endpoints
    ///
    /// # Returns
    ///
    /// * `Ok(Self)` - New client
    /// * `Err(MtError)` - If the HTTP client cannot be built
    pub fn new(token: Option<String>, timeout: Duration) -> MtResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MtError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            inference_url: DEFAULT_INFERENCE_URL.to_string(),
            hub_url: DEFAULT_HUB_URL.to_string(),
            token: token.filter(|t| !t.trim().is_empty()),
        })
    }

    /// Point the client at different inference and hub endpoints
    pub fn with_endpoints(mut self, inference_url: &str, hub_url: &str) -> Self {
        self.inference_url = inference_url.trim_end_matches('/').to_string();
        self.hub_url = hub_url.trim_end_matches('/').to_string();
        self
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Check that a model exists on the hub
    ///
    /// A missing model is [`MtError::Unavailable`], the same way a failed
    /// download would be.
    pub async fn ensure_model(&self, model_id: &str) -> MtResult<()> {
        let url = format!("{}/api/models/{}", self.hub_url, model_id);
        let response = self.authorize(self.client.get(&url)).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(MtError::from_status(
                status,
                &format!("model {}: {}", model_id, error_text),
            ));
        }

        Ok(())
    }

    /// Run a translation model and return the first `translation_text`
    pub async fn translate(&self, model_id: &str, body: &Value) -> MtResult<String> {
        let url = format!("{}/models/{}", self.inference_url, model_id);
        let response = self
            .authorize(self.client.post(&url))
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(MtError::from_status(status, &error_text));
        }

        let json: Value = response.json().await.map_err(|e| {
            MtError::TranslationError(format!("Failed to parse API response: {}", e))
        })?;

        parse_translation(json)
    }
}

/// Extract the translated text from an inference response
///
/// The API answers with a list of outputs; a bare object is accepted too.
fn parse_translation(json: Value) -> MtResult<String> {
    let first = match json {
        Value::Array(items) => items.into_iter().next().ok_or_else(|| {
            MtError::TranslationError("Invalid API response: empty output list".to_string())
        })?,
        other => other,
    };

    let output: TranslationOutput = serde_json::from_value(first).map_err(|_| {
        MtError::TranslationError(
            "Invalid API response: missing 'translation_text' field".to_string(),
        )
    })?;

    Ok(output.translation_text)
}

impl std::fmt::Debug for HuggingFaceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HuggingFaceClient")
            .field("inference_url", &self.inference_url)
            .field("hub_url", &self.hub_url)
            .field("token", &self.token.as_ref().map(|_| "***"))
            .finish()
    }
}

//! Google Translate API provider
//!
//! This module integrates with Google Translate API v2. It is only part of
//! the translator pool when an API key is configured.
//!
//! # Authentication
//!
//! The provider loads the API key from the `GOOGLE_TRANSLATE_API_KEY`
//! environment variable. Obtain a key from:
//! https://console.cloud.google.com/

use crate::cache::SessionCache;
use crate::error::{MtError, MtResult};
use crate::translator::{Translator, resolve_codes};
use async_trait::async_trait;
use babel_languages::{BackendLanguages, Language, LanguageRegistry, validate_code};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

/// Key of this backend in the language table
pub const BACKEND_KEY: &str = "google";

pub const API_KEY_VAR: &str = "GOOGLE_TRANSLATE_API_KEY";

/// Codes validated for one direction
#[derive(Debug)]
struct GoogleSession {
    source: String,
    target: String,
}

/// Google Translate API v2 provider
pub struct GoogleTranslateProvider {
    /// API key for authentication
    api_key: String,
    client: reqwest::Client,
    base_url: String,
    languages: BackendLanguages,
    sessions: SessionCache<GoogleSession>,
}

impl GoogleTranslateProvider {
    /// Maximum characters per string (Google Translate API limit)
    const MAX_CHARS_PER_STRING: usize = 30_000;

    /// Create a new GoogleTranslateProvider with an explicit API key
    ///
    /// # Returns
    ///
    /// * `Ok(Self)` - New provider instance
    /// * `Err(MtError)` - If API key is empty or HTTP client creation fails
    pub fn new(api_key: String, registry: &LanguageRegistry, timeout: Duration) -> MtResult<Self> {
        if api_key.trim().is_empty() {
            return Err(MtError::ConfigError("API key cannot be empty".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MtError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            api_key,
            client,
            base_url: "https://translation.googleapis.com/language/translate/v2".to_string(),
            languages: registry.codes_for(BACKEND_KEY),
            sessions: SessionCache::new(),
        })
    }

    /// Create a provider from the `GOOGLE_TRANSLATE_API_KEY` environment variable
    pub fn from_env(registry: &LanguageRegistry, timeout: Duration) -> MtResult<Self> {
        let api_key = std::env::var(API_KEY_VAR).map_err(|_| {
            MtError::ConfigError(format!("{} environment variable not set", API_KEY_VAR))
        })?;

        Self::new(api_key, registry, timeout)
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    async fn session(&self, source_code: &str, target_code: &str) -> MtResult<Arc<GoogleSession>> {
        self.sessions
            .get_or_try_insert_with(source_code, target_code, || async {
                validate_code(source_code).map_err(|e| MtError::ConfigError(e.to_string()))?;
                validate_code(target_code).map_err(|e| MtError::ConfigError(e.to_string()))?;
                Ok(GoogleSession {
                    source: source_code.to_string(),
                    target: target_code.to_string(),
                })
            })
            .await
    }
}

impl std::fmt::Debug for GoogleTranslateProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleTranslateProvider")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl Translator for GoogleTranslateProvider {
    fn name(&self) -> &str {
        "Google Translate"
    }

    fn supports(&self, source: &Language, target: &Language) -> bool {
        self.languages.supports(source, target)
    }

    async fn translate(
        &self,
        text: &str,
        source: &Language,
        target: &Language,
    ) -> MtResult<String> {
        let (source_code, target_code) =
            resolve_codes(&self.languages, self.name(), source, target)?;
        let session = self.session(source_code, target_code).await?;

        if text.is_empty() {
            return Ok(String::new());
        }

        // Check character limit
        if text.chars().count() > Self::MAX_CHARS_PER_STRING {
            return Err(MtError::TranslationError(format!(
                "Text exceeds maximum length of {} characters",
                Self::MAX_CHARS_PER_STRING
            )));
        }

        let url = format!("{}?key={}", self.base_url, self.api_key);
        let body = json!({
            "q": [text],
            "source": session.source,
            "target": session.target,
            "format": "text"
        });

        let response = self.client.post(&url).json(&body).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(MtError::from_status(status, &error_text));
        }

        let json: serde_json::Value = response.json().await.map_err(|e| {
            MtError::TranslationError(format!("Failed to parse API response: {}", e))
        })?;

        // Extract translations from nested response
        json["data"]["translations"][0]["translatedText"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| {
                MtError::TranslationError(
                    "Invalid API response: missing 'data.translations[0].translatedText'"
                        .to_string(),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn lang(id: &str) -> Language {
        Language::new(id).unwrap()
    }

    fn registry() -> LanguageRegistry {
        LanguageRegistry::from_json_str(
            r#"{
                "en": { "google": "en" },
                "zh": { "google": "zh-CN" },
                "xx": { "google": null }
            }"#,
        )
        .unwrap()
    }

    fn provider(key: &str) -> MtResult<GoogleTranslateProvider> {
        GoogleTranslateProvider::new(key.to_string(), &registry(), Duration::from_secs(5))
    }

    // ========== Initialization Tests ==========

    #[test]
    fn test_new_with_valid_key() {
        let provider = provider("test-api-key").unwrap();
        assert_eq!(provider.name(), "Google Translate");
    }

    #[test]
    fn test_new_with_empty_key() {
        match provider("") {
            Err(MtError::ConfigError(msg)) => assert!(msg.contains("empty")),
            _ => panic!("Expected ConfigError"),
        }
    }

    #[test]
    fn test_new_with_whitespace_key() {
        assert!(provider("   ").is_err());
    }

    #[test]
    fn test_debug_output() {
        let debug_str = format!("{:?}", provider("test-key").unwrap());
        // API key should be masked
        assert!(debug_str.contains("***"));
        assert!(!debug_str.contains("test-key"));
    }

    #[test]
    fn test_supports() {
        let provider = provider("test-key").unwrap();
        assert!(provider.supports(&lang("en"), &lang("zh")));
        assert!(!provider.supports(&lang("en"), &lang("xx")));
    }

    // ========== Request Tests ==========

    #[tokio::test]
    async fn test_translate_sends_backend_codes() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(query_param("key", "test-key"))
            .and(body_partial_json(json!({ "source": "en", "target": "zh-CN" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "translations": [{ "translatedText": "你好" }] }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let provider = provider("test-key").unwrap().with_base_url(&server.uri());
        let result = provider.translate("hello", &lang("en"), &lang("zh")).await.unwrap();
        assert_eq!(result, "你好");
    }

    #[tokio::test]
    async fn test_translate_empty_text() {
        let provider = provider("test-key").unwrap();
        let result = provider.translate("", &lang("en"), &lang("zh")).await.unwrap();
        assert_eq!(result, "");
    }

    #[tokio::test]
    async fn test_translate_text_too_long() {
        let provider = provider("test-key").unwrap();
        let long_text = "x".repeat(GoogleTranslateProvider::MAX_CHARS_PER_STRING + 1);
        match provider.translate(&long_text, &lang("en"), &lang("zh")).await {
            Err(MtError::TranslationError(msg)) => assert!(msg.contains("exceeds maximum")),
            _ => panic!("Expected TranslationError"),
        }
    }

    #[tokio::test]
    async fn test_length_limit_counts_characters_not_bytes() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "translations": [{ "translatedText": "ok" }] }
            })))
            .expect(1)
            .mount(&server)
            .await;

        // Three bytes per character in UTF-8, exactly at the limit
        let cjk_text = "你".repeat(GoogleTranslateProvider::MAX_CHARS_PER_STRING);
        let provider = provider("test-key").unwrap().with_base_url(&server.uri());
        let result = provider.translate(&cjk_text, &lang("zh"), &lang("en")).await.unwrap();
        assert_eq!(result, "ok");
    }

    #[tokio::test]
    async fn test_sessions_belong_to_one_provider() {
        let first = provider("test-key").unwrap();
        let second = provider("test-key").unwrap();

        first.translate("", &lang("en"), &lang("zh")).await.unwrap();

        assert!(first.sessions.contains("en", "zh-CN").await);
        assert!(!second.sessions.contains("en", "zh-CN").await);
    }

    #[tokio::test]
    async fn test_invalid_key_is_config_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_string("API key not valid"))
            .mount(&server)
            .await;

        let provider = provider("bad-key").unwrap().with_base_url(&server.uri());
        let err = provider
            .translate("hello", &lang("en"), &lang("zh"))
            .await
            .unwrap_err();
        assert!(matches!(err, MtError::ConfigError(_)));
    }

    #[tokio::test]
    async fn test_malformed_response_is_translation_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": {} })))
            .mount(&server)
            .await;

        let provider = provider("test-key").unwrap().with_base_url(&server.uri());
        let err = provider
            .translate("hello", &lang("en"), &lang("zh"))
            .await
            .unwrap_err();
        assert!(matches!(err, MtError::TranslationError(_)));
    }

    // ========== Integration Tests (require real API key) ==========

    #[tokio::test]
    #[ignore] // Run with: cargo test --ignored
    async fn test_real_api_single_translation() {
        if std::env::var(API_KEY_VAR).is_err() {
            eprintln!("Skipping: {} not set", API_KEY_VAR);
            return;
        }

        let registry = LanguageRegistry::bundled().unwrap();
        let provider = GoogleTranslateProvider::from_env(&registry, Duration::from_secs(30)).unwrap();
        let result = provider
            .translate("Hello", &Language::english(), &lang("fr"))
            .await
            .unwrap();
        println!("Translation: {} → {}", "Hello", result);
        assert!(!result.is_empty());
    }
}

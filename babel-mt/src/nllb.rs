//! NLLB backend: one multilingual model for every pair
//!
//! `facebook/nllb-200-distilled-600M` handles all of its languages in a single
//! model, steered by `src_lang` / `tgt_lang`. The hub check for the model runs
//! once; each pair then gets a light session binding its two codes.

use crate::cache::SessionCache;
use crate::error::MtResult;
use crate::huggingface::HuggingFaceClient;
use crate::translator::{Translator, resolve_codes};
use async_trait::async_trait;
use babel_languages::{BackendLanguages, Language, LanguageRegistry};
use serde_json::json;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::debug;

/// Key of this backend in the language table
pub const BACKEND_KEY: &str = "nllb";

pub const MODEL_ID: &str = "facebook/nllb-200-distilled-600M";

#[derive(Debug)]
struct NllbSession {
    src_lang: String,
    tgt_lang: String,
}

#[derive(Debug)]
pub struct NllbTranslator {
    languages: BackendLanguages,
    client: HuggingFaceClient,
    model: OnceCell<()>,
    sessions: SessionCache<NllbSession>,
}

impl NllbTranslator {
    pub fn new(registry: &LanguageRegistry, client: HuggingFaceClient) -> Self {
        Self {
            languages: registry.codes_for(BACKEND_KEY),
            client,
            model: OnceCell::new(),
            sessions: SessionCache::new(),
        }
    }

    async fn session(&self, source_code: &str, target_code: &str) -> MtResult<Arc<NllbSession>> {
        self.sessions
            .get_or_try_insert_with(source_code, target_code, || async {
                self.model
                    .get_or_try_init(|| async {
                        debug!("Loading NLLB model {}", MODEL_ID);
                        self.client.ensure_model(MODEL_ID).await
                    })
                    .await?;
                Ok(NllbSession {
                    src_lang: source_code.to_string(),
                    tgt_lang: target_code.to_string(),
                })
            })
            .await
    }
}

#[async_trait]
impl Translator for NllbTranslator {
    fn name(&self) -> &str {
        "Nllb"
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

        let body = json!({
            "inputs": text,
            "parameters": {
                "src_lang": session.src_lang,
                "tgt_lang": session.tgt_lang,
                "do_sample": true
            }
        });
        self.client.translate(MODEL_ID, &body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn lang(id: &str) -> Language {
        Language::new(id).unwrap()
    }

    fn translator(server: &MockServer) -> NllbTranslator {
        let registry = LanguageRegistry::from_json_str(
            r#"{
                "en": { "nllb": "eng_Latn" },
                "fr": { "nllb": "fra_Latn" },
                "ko": { "nllb": "kor_Hang" },
                "pl": { "nllb": null }
            }"#,
        )
        .unwrap();
        let client = HuggingFaceClient::new(None, Duration::from_secs(5))
            .unwrap()
            .with_endpoints(&server.uri(), &server.uri());
        NllbTranslator::new(&registry, client)
    }

    #[tokio::test]
    async fn test_supports_follows_registry() {
        let server = MockServer::start().await;
        let nllb = translator(&server);
        assert!(nllb.supports(&lang("ko"), &lang("fr")));
        assert!(!nllb.supports(&lang("en"), &lang("pl")));
    }

    #[tokio::test]
    async fn test_model_checked_once_across_pairs() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/api/models/{}", MODEL_ID)))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(format!("/models/{}", MODEL_ID)))
            .and(body_partial_json(json!({
                "parameters": { "src_lang": "eng_Latn", "tgt_lang": "kor_Hang" }
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([{ "translation_text": "안녕" }])),
            )
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(format!("/models/{}", MODEL_ID)))
            .and(body_partial_json(json!({
                "parameters": { "src_lang": "kor_Hang", "tgt_lang": "fra_Latn" }
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([{ "translation_text": "salut" }])),
            )
            .mount(&server)
            .await;

        let nllb = translator(&server);
        let korean = nllb.translate("hi", &lang("en"), &lang("ko")).await.unwrap();
        assert_eq!(korean, "안녕");
        let french = nllb.translate(&korean, &lang("ko"), &lang("fr")).await.unwrap();
        assert_eq!(french, "salut");
        assert_eq!(nllb.sessions.len().await, 2);
    }

    #[tokio::test]
    async fn test_missing_model_is_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let nllb = translator(&server);
        let err = nllb
            .translate("hi", &lang("en"), &lang("fr"))
            .await
            .unwrap_err();
        assert!(err.is_unavailable());
        assert!(!nllb.model.initialized());
    }
}

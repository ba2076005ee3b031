//! Marian backend: Helsinki-NLP opus-mt models
//!
//! opus-mt ships one model per directed language pair
//! (`Helsinki-NLP/opus-mt-{src}-{tgt}`), so each pair gets its own session.
//! Many pairs have no published model; those surface as
//! [`MtError::Unavailable`] when the session is first created.

use crate::cache::SessionCache;
use crate::error::{MtError, MtResult};
use crate::huggingface::HuggingFaceClient;
use crate::translator::{Translator, resolve_codes};
use async_trait::async_trait;
use babel_languages::{BackendLanguages, Language, LanguageRegistry};
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

/// Key of this backend in the language table
pub const BACKEND_KEY: &str = "marian";

#[derive(Debug)]
struct MarianSession {
    model_id: String,
}

#[derive(Debug)]
pub struct MarianTranslator {
    languages: BackendLanguages,
    client: HuggingFaceClient,
    sessions: SessionCache<MarianSession>,
}

impl MarianTranslator {
    pub fn new(registry: &LanguageRegistry, client: HuggingFaceClient) -> Self {
        Self {
            languages: registry.codes_for(BACKEND_KEY),
            client,
            sessions: SessionCache::new(),
        }
    }

    /// Hub id of the opus-mt model for a pair of Marian codes
    pub fn model_id(source_code: &str, target_code: &str) -> String {
        format!("Helsinki-NLP/opus-mt-{}-{}", source_code, target_code)
    }

    async fn session(&self, source_code: &str, target_code: &str) -> MtResult<Arc<MarianSession>> {
        self.sessions
            .get_or_try_insert_with(source_code, target_code, || async {
                let model_id = Self::model_id(source_code, target_code);
                debug!("Loading Marian model {}", model_id);
                self.client.ensure_model(&model_id).await?;
                Ok(MarianSession { model_id })
            })
            .await
    }
}

#[async_trait]
impl Translator for MarianTranslator {
    fn name(&self) -> &str {
        "Marian"
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

        self.client
            .translate(&session.model_id, &json!({ "inputs": text }))
            .await
            .map_err(|e| match e {
                MtError::TranslationError(msg) => {
                    MtError::TranslationError(format!("{}: {}", session.model_id, msg))
                }
                other => other,
            })
    }
}

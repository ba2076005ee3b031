//! Building the translator pool the chain picks from

use crate::config::Config;
use anyhow::{Context, Result, bail};
use babel_languages::LanguageRegistry;
use babel_mt::{
    GoogleTranslateProvider, HuggingFaceClient, MarianTranslator, MockMode, MockTranslator,
    NllbTranslator, Translator,
};
use clap::ValueEnum;
use std::sync::Arc;
use tracing::{info, warn};

/// The backend families babel knows how to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Backend {
    Marian,
    Nllb,
    Google,
}

impl Backend {
    /// Key of this backend in the language table
    pub fn key(self) -> &'static str {
        match self {
            Backend::Marian => babel_mt::marian::BACKEND_KEY,
            Backend::Nllb => babel_mt::nllb::BACKEND_KEY,
            Backend::Google => babel_mt::google_translate::BACKEND_KEY,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Backend::Marian => "Marian",
            Backend::Nllb => "Nllb",
            Backend::Google => "Google Translate",
        }
    }
}

/// Backends used when none are requested: every one that is configured
pub fn default_backends(config: &Config) -> Vec<Backend> {
    let mut backends = vec![Backend::Marian, Backend::Nllb];
    if config.google_api_key.is_some() {
        backends.push(Backend::Google);
    }
    backends
}

/// Build one translator per requested backend
///
/// Backends the language table has no codes for are skipped with a warning:
/// they could never support a pair and would only feed the retry loop.
/// With `mock` set, offline [`MockTranslator`]s stand in for the real
/// services, using the same language codes.
pub fn build_pool(
    config: &Config,
    registry: &LanguageRegistry,
    backends: &[Backend],
    mock: bool,
) -> Result<Vec<Arc<dyn Translator>>> {
    let mut pool: Vec<Arc<dyn Translator>> = Vec::new();
    let mut hf_client: Option<HuggingFaceClient> = None;

    for &backend in backends {
        if registry.codes_for(backend.key()).is_empty() {
            warn!(
                "Language table has no codes for backend '{}', skipping it",
                backend.key()
            );
            continue;
        }

        let translator: Arc<dyn Translator> = if mock {
            Arc::new(MockTranslator::from_registry(
                backend.display_name(),
                registry,
                backend.key(),
                MockMode::Suffix,
            ))
        } else {
            match backend {
                Backend::Marian | Backend::Nllb => {
                    let client = match &hf_client {
                        Some(client) => client.clone(),
                        None => {
                            let client = HuggingFaceClient::new(
                                config.hf_api_token.clone(),
                                config.request_timeout,
                            )
                            .context("Failed to initialize Hugging Face client")?
                            .with_endpoints(&config.hf_inference_url, &config.hf_hub_url);
                            hf_client = Some(client.clone());
                            client
                        }
                    };
                    if backend == Backend::Marian {
                        Arc::new(MarianTranslator::new(registry, client))
                    } else {
                        Arc::new(NllbTranslator::new(registry, client))
                    }
                }
                Backend::Google => {
                    let api_key = config.google_api_key.clone().with_context(|| {
                        format!(
                            "Google backend requested but {} is not set",
                            babel_mt::google_translate::API_KEY_VAR
                        )
                    })?;
                    Arc::new(
                        GoogleTranslateProvider::new(api_key, registry, config.request_timeout)
                            .context("Failed to initialize Google Translate provider")?,
                    )
                }
            }
        };

        info!("Using backend {}", translator.name());
        pool.push(translator);
    }

    if pool.is_empty() {
        bail!("No usable translation backend: check --backend and the language table");
    }

    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use babel_languages::Language;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<&str, &str> = vars.iter().copied().collect();
        Config::from_lookup(|key| vars.get(key).map(|v| v.to_string())).unwrap()
    }

    fn names(pool: &[Arc<dyn Translator>]) -> Vec<String> {
        pool.iter().map(|t| t.name().to_string()).collect()
    }

    #[test]
    fn test_backend_keys_match_table() {
        let registry = LanguageRegistry::bundled().unwrap();
        for backend in Backend::value_variants() {
            assert!(registry.has_backend(backend.key()), "{:?}", backend);
        }
    }

    #[test]
    fn test_default_backends() {
        assert_eq!(default_backends(&config(&[])), vec![Backend::Marian, Backend::Nllb]);
        assert_eq!(
            default_backends(&config(&[("GOOGLE_TRANSLATE_API_KEY", "k")])),
            vec![Backend::Marian, Backend::Nllb, Backend::Google]
        );
    }

    #[test]
    fn test_build_real_pool() {
        let registry = LanguageRegistry::bundled().unwrap();
        let pool = build_pool(
            &config(&[("GOOGLE_TRANSLATE_API_KEY", "k")]),
            &registry,
            &[Backend::Marian, Backend::Nllb, Backend::Google],
            false,
        )
        .unwrap();
        assert_eq!(names(&pool), vec!["Marian", "Nllb", "Google Translate"]);
    }

    #[test]
    fn test_google_without_key_fails() {
        let registry = LanguageRegistry::bundled().unwrap();
        let err = build_pool(&config(&[]), &registry, &[Backend::Google], false)
            .err()
            .expect("Google without a key must fail");
        assert!(err.to_string().contains("GOOGLE_TRANSLATE_API_KEY"));
    }

    #[test]
    fn test_mock_pool_follows_registry_support() {
        let registry = LanguageRegistry::bundled().unwrap();
        let pool = build_pool(&config(&[]), &registry, &[Backend::Marian], true).unwrap();
        let en = Language::english();
        let ko = Language::new("ko").unwrap();
        let fr = Language::new("fr").unwrap();
        assert_eq!(names(&pool), vec!["Marian"]);
        assert!(pool[0].supports(&en, &fr));
        assert!(!pool[0].supports(&en, &ko));
    }

    #[test]
    fn test_backend_missing_from_table_is_skipped() {
        let registry =
            LanguageRegistry::from_json_str(r#"{ "en": { "nllb": "eng_Latn" } }"#).unwrap();
        let pool = build_pool(
            &config(&[]),
            &registry,
            &[Backend::Marian, Backend::Nllb],
            true,
        )
        .unwrap();
        assert_eq!(names(&pool), vec!["Nllb"]);

        assert!(build_pool(&config(&[]), &registry, &[Backend::Marian], true).is_err());
    }
}

//! The translation chain
//!
//! A run translates text through `N` randomly chosen (backend, language)
//! hops, then back to the source language. Picks that land on a pair the
//! backend cannot handle, or on a backend that is unavailable right now, are
//! thrown away and picked again without touching the chain state.

use crate::error::{ChainError, ChainResult};
use crate::picker::Picker;
use babel_languages::Language;
use babel_mt::Translator;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// One successful translation step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hop {
    pub backend: String,
    pub from: Language,
    pub to: Language,
}

/// What a finished run produced
#[derive(Debug, Clone)]
pub struct ChainOutcome {
    /// The final text, back in the source language
    pub text: String,
    /// The `N` hops, in order
    pub hops: Vec<Hop>,
    /// The corrective hop back to the source, if one was needed
    pub finalization: Option<Hop>,
    /// Picks thrown away because of unsupported pairs or unavailable backends
    pub rejected: u64,
}

pub struct Chain<P> {
    translators: Vec<Arc<dyn Translator>>,
    languages: Vec<Language>,
    source: Language,
    max_retries: Option<u64>,
    picker: P,
}

impl<P: Picker> Chain<P> {
    /// A chain over a translator pool and candidate target languages
    ///
    /// The source language defaults to English and retries are unbounded.
    pub fn new(
        translators: Vec<Arc<dyn Translator>>,
        languages: Vec<Language>,
        picker: P,
    ) -> Self {
        Self {
            translators,
            languages,
            source: Language::english(),
            max_retries: None,
            picker,
        }
    }

    pub fn with_source(mut self, source: Language) -> Self {
        self.source = source;
        self
    }

    /// Cap the consecutive rejected picks allowed before a hop succeeds
    ///
    /// `None` keeps retrying forever, which stalls when no backend supports
    /// any reachable pair.
    pub fn with_max_retries(mut self, max_retries: Option<u64>) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn source(&self) -> &Language {
        &self.source
    }

    pub fn picker(&self) -> &P {
        &self.picker
    }

    fn pick_translator(&mut self) -> Arc<dyn Translator> {
        let index = self.picker.pick(self.translators.len()) % self.translators.len();
        Arc::clone(&self.translators[index])
    }

    fn pick_language(&mut self) -> Language {
        let index = self.picker.pick(self.languages.len()) % self.languages.len();
        self.languages[index].clone()
    }

    /// Translate `text` through `iterations` hops and back to the source
    ///
    /// # Errors
    ///
    /// Any translator error other than [`babel_mt::MtError::Unavailable`]
    /// ends the run; no partial text is returned.
    pub async fn run(&mut self, text: &str, iterations: usize) -> ChainResult<ChainOutcome> {
        let mut outcome = ChainOutcome {
            text: text.to_string(),
            hops: Vec::with_capacity(iterations),
            finalization: None,
            rejected: 0,
        };
        if iterations == 0 {
            return Ok(outcome);
        }
        if self.translators.is_empty() {
            return Err(ChainError::EmptyPool);
        }
        if self.languages.is_empty() {
            return Err(ChainError::NoLanguages);
        }

        let mut cursor = self.source.clone();
        let mut last: Option<Arc<dyn Translator>> = None;
        let mut consecutive: u64 = 0;

        while outcome.hops.len() < iterations {
            let translator = self.pick_translator();
            let target = self.pick_language();

            if !translator.supports(&cursor, &target) {
                debug!("{} does not support {}->{}", translator.name(), cursor, target);
            } else {
                info!("Translating {}->{} with {}", cursor, target, translator.name());
                match translator.translate(&outcome.text, &cursor, &target).await {
                    Ok(translated) => {
                        outcome.text = translated;
                        outcome.hops.push(Hop {
                            backend: translator.name().to_string(),
                            from: cursor,
                            to: target.clone(),
                        });
                        cursor = target;
                        last = Some(translator);
                        consecutive = 0;
                        continue;
                    }
                    Err(e) if e.is_unavailable() => {
                        warn!(
                            "{} unavailable for {}->{}: {}",
                            translator.name(),
                            cursor,
                            target,
                            e
                        );
                    }
                    Err(e) => return Err(e.into()),
                }
            }

            outcome.rejected += 1;
            consecutive += 1;
            if self.max_retries.is_some_and(|max| consecutive > max) {
                return Err(ChainError::RetriesExhausted {
                    hops: outcome.hops.len(),
                    attempts: consecutive,
                });
            }
            // Unsupported picks never await; yield so an endless retry stays cancellable.
            tokio::task::yield_now().await;
        }

        if cursor != self.source {
            if let Some(translator) = last {
                let hop = self.finalize(&*translator, &mut outcome.text, cursor).await?;
                outcome.finalization = Some(hop);
            }
        }

        Ok(outcome)
    }

    /// The corrective hop, always with the last translator that succeeded
    async fn finalize(
        &self,
        translator: &dyn Translator,
        text: &mut String,
        cursor: Language,
    ) -> ChainResult<Hop> {
        if !translator.supports(&cursor, &self.source) {
            return Err(ChainError::FinalHopUnsupported {
                backend: translator.name().to_string(),
                from: cursor,
                to: self.source.clone(),
            });
        }

        info!(
            "Translating {}->{} with {} (back to source)",
            cursor,
            self.source,
            translator.name()
        );
        *text = translator.translate(text.as_str(), &cursor, &self.source).await?;

        Ok(Hop {
            backend: translator.name().to_string(),
            from: cursor,
            to: self.source.clone(),
        })
    }
}

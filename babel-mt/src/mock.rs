//! Mock translator for testing
//!
//! This module provides a deterministic, API-free translator for testing
//! the chain without network access, and for `babel --mock`.
//!
//! # Example
//!
//! ```ignore
//! use babel_mt::{MockMode, MockTranslator, Translator};
//!
//! let mock = MockTranslator::new("Mock", [en.clone(), fr.clone()], MockMode::Suffix);
//! assert!(mock.supports(&en, &fr));
//! assert_eq!(mock.translate("hello", &en, &fr).await?, "hello_fr");
//! ```

use crate::error::{MtError, MtResult};
use crate::translator::{Translator, resolve_codes};
use async_trait::async_trait;
use babel_languages::{BackendLanguages, Language, LanguageRegistry};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Mock translation modes for testing different scenarios
#[derive(Debug, Clone)]
pub enum MockMode {
    /// Append target code suffix: "hello" → "hello_fr"
    Suffix,

    /// Use predefined mappings, falling back to `Suffix`
    /// (text, target_code) → translation
    Mappings(HashMap<(String, String), String>),

    /// Reverse the order of words separated by spaces
    Reorder,

    /// Every call fails with this error
    Error(MtError),

    /// No-op: return input unchanged
    NoOp,
}

/// One recorded `translate` invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockCall {
    pub text: String,
    pub source: Language,
    pub target: Language,
}

/// Mock translator that simulates various translation scenarios
#[derive(Debug)]
pub struct MockTranslator {
    name: String,
    languages: BackendLanguages,
    mode: MockMode,
    /// Optional simulated latency (in milliseconds)
    delay_ms: u64,
    /// Errors injected for specific calls, keyed by 0-based call index
    failures: Mutex<HashMap<usize, MtError>>,
    calls: Mutex<Vec<MockCall>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockTranslator {
    /// Create a mock that supports exactly `languages`, using their ids as codes
    pub fn new(name: &str, languages: impl IntoIterator<Item = Language>, mode: MockMode) -> Self {
        let codes = languages.into_iter().map(|l| {
            let code = l.id().to_string();
            (l, code)
        });
        Self::with_languages(name, BackendLanguages::from_pairs(name, codes), mode)
    }

    /// Create a mock that supports what `backend` supports in the registry
    ///
    /// Suffixes then use that backend's codes, e.g. `hello_fra_Latn`.
    pub fn from_registry(
        name: &str,
        registry: &LanguageRegistry,
        backend: &str,
        mode: MockMode,
    ) -> Self {
        Self::with_languages(name, registry.codes_for(backend), mode)
    }

    pub fn with_languages(name: &str, languages: BackendLanguages, mode: MockMode) -> Self {
        Self {
            name: name.to_string(),
            languages,
            mode,
            delay_ms: 0,
            failures: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Simulate per-call latency
    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Make the first calls fail with these errors, in order
    pub fn with_failures(self, failures: impl IntoIterator<Item = MtError>) -> Self {
        lock(&self.failures).extend(failures.into_iter().enumerate());
        self
    }

    /// Make the `call`-th call (0-based) fail with `error`
    pub fn fail_call(self, call: usize, error: MtError) -> Self {
        lock(&self.failures).insert(call, error);
        self
    }

    /// Every `translate` call made so far, including failed ones
    pub fn calls(&self) -> Vec<MockCall> {
        lock(&self.calls).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Apply translation logic based on the mode
    fn apply_translation(&self, text: &str, target_code: &str) -> MtResult<String> {
        match &self.mode {
            MockMode::Suffix => Ok(format!("{}_{}", text, target_code)),
            MockMode::Mappings(map) => {
                let key = (text.to_string(), target_code.to_string());
                Ok(map
                    .get(&key)
                    .cloned()
                    .unwrap_or_else(|| format!("{}_{}", text, target_code)))
            }
            MockMode::Reorder => {
                let words: Vec<&str> = text.split_whitespace().rev().collect();
                Ok(words.join(" "))
            }
            MockMode::Error(err) => Err(err.clone()),
            MockMode::NoOp => Ok(text.to_string()),
        }
    }
}

#[async_trait]
impl Translator for MockTranslator {
    fn name(&self) -> &str {
        &self.name
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
        let call = {
            let mut calls = lock(&self.calls);
            calls.push(MockCall {
                text: text.to_string(),
                source: source.clone(),
                target: target.clone(),
            });
            calls.len() - 1
        };

        let (_, target_code) = resolve_codes(&self.languages, &self.name, source, target)?;

        if self.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }

        let failure = lock(&self.failures).remove(&call);
        if let Some(err) = failure {
            return Err(err);
        }

        self.apply_translation(text, target_code)
    }
}

//! Translator trait
//!
//! This module defines the `Translator` trait for backend abstraction,
//! so the chain can drive Marian, NLLB, Google Translate or a mock through
//! the same two calls without knowing how any of them work.
//!
//! # Example
//!
//! ```ignore
//! use babel_mt::{Translator, MarianTranslator};
//!
//! let marian = MarianTranslator::new(&registry, client);
//! if marian.supports(&en, &fr) {
//!     let result = marian.translate("Hello, world!", &en, &fr).await?;
//!     println!("{}", result);
//! }
//! ```

use crate::error::{MtError, MtResult};
use async_trait::async_trait;
use babel_languages::{BackendLanguages, Language};

/// One translation backend family
///
/// Implementations own whatever model sessions they need and cache them
/// per resolved language pair. Callers only see the two operations below.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Name of this backend, used in trace output (e.g. "Marian", "Nllb")
    fn name(&self) -> &str;

    /// Whether both languages have a code for this backend
    ///
    /// Pure and cheap: the chain calls it before committing to a hop.
    fn supports(&self, source: &Language, target: &Language) -> bool;

    /// Translate `text` from `source` to `target`
    ///
    /// Callers are expected to have checked [`Translator::supports`] first.
    /// A pair without codes yields [`MtError::UnsupportedPair`]; a model that
    /// cannot be obtained yields [`MtError::Unavailable`].
    async fn translate(&self, text: &str, source: &Language, target: &Language)
    -> MtResult<String>;
}

/// Resolve a pair to backend codes or produce the matching error
pub(crate) fn resolve_codes<'a>(
    languages: &'a BackendLanguages,
    name: &str,
    source: &Language,
    target: &Language,
) -> MtResult<(&'a str, &'a str)> {
    languages
        .resolve_pair(source, target)
        .ok_or_else(|| MtError::UnsupportedPair {
            backend: name.to_string(),
            from: source.to_string(),
            to: target.to_string(),
        })
}

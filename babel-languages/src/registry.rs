//! Language registry: which backend code, if any, each canonical language has
//!
//! The registry is built once at startup from the language table and is
//! read-only afterwards. Translators take their own projection of it
//! ([`BackendLanguages`]) when they are constructed.

use crate::error::RegistryResult;
use crate::language::Language;
use crate::loader;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;

/// Language table compiled into the binary
const BUNDLED_TABLE: &str = include_str!("../data/languages.json");

/// Immutable catalog of canonical languages and their backend codes
#[derive(Debug, Clone, Default)]
pub struct LanguageRegistry {
    // entries[lang][backend] = Some(code) | None (explicitly unsupported)
    entries: BTreeMap<Language, BTreeMap<String, Option<String>>>,
    backends: BTreeSet<String>,
}

impl LanguageRegistry {
    /// Build a registry from already validated entries
    pub fn new(entries: BTreeMap<Language, BTreeMap<String, Option<String>>>) -> Self {
        let backends = entries
            .values()
            .flat_map(|codes| codes.keys().cloned())
            .collect();
        Self { entries, backends }
    }

    /// The default language table shipped with babel
    pub fn bundled() -> RegistryResult<Self> {
        Self::from_json_str(BUNDLED_TABLE)
    }

    /// Parse a registry from the JSON text of a language table
    pub fn from_json_str(json: &str) -> RegistryResult<Self> {
        loader::parse_language_table(json)
    }

    /// Load a registry from a language table file
    pub fn load(path: &Path) -> RegistryResult<Self> {
        loader::load_language_table(path)
    }

    /// Resolve a canonical language to the code a backend uses for it
    ///
    /// Returns `None` when the backend has no code for the language, either
    /// because the table says `null`, omits the backend, or does not know the
    /// language at all.
    pub fn resolve(&self, language: &Language, backend: &str) -> Option<&str> {
        self.entries
            .get(language)?
            .get(backend)?
            .as_deref()
    }

    pub fn contains(&self, language: &Language) -> bool {
        self.entries.contains_key(language)
    }

    /// All canonical languages, sorted by id
    pub fn languages(&self) -> Vec<Language> {
        self.entries.keys().cloned().collect()
    }

    /// Names of every backend mentioned in the table, sorted
    pub fn backends(&self) -> impl Iterator<Item = &str> {
        self.backends.iter().map(String::as_str)
    }

    pub fn has_backend(&self, backend: &str) -> bool {
        self.backends.contains(backend)
    }

    /// Project the registry onto one backend, dropping unsupported languages
    pub fn codes_for(&self, backend: &str) -> BackendLanguages {
        BackendLanguages::from_pairs(
            backend,
            self.entries.keys().filter_map(|language| {
                self.resolve(language, backend)
                    .map(|code| (language.clone(), code.to_string()))
            }),
        )
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The languages one backend can handle, with the code it uses for each
#[derive(Debug, Clone, Default)]
pub struct BackendLanguages {
    backend: String,
    codes: HashMap<Language, String>,
}

impl BackendLanguages {
    pub fn from_pairs(
        backend: &str,
        pairs: impl IntoIterator<Item = (Language, String)>,
    ) -> Self {
        Self {
            backend: backend.to_string(),
            codes: pairs.into_iter().collect(),
        }
    }

    pub fn backend(&self) -> &str {
        &self.backend
    }

    pub fn code(&self, language: &Language) -> Option<&str> {
        self.codes.get(language).map(String::as_str)
    }

    /// True iff both languages have a code for this backend
    pub fn supports(&self, source: &Language, target: &Language) -> bool {
        self.codes.contains_key(source) && self.codes.contains_key(target)
    }

    /// Resolve both sides of a pair, `None` if either is unsupported
    pub fn resolve_pair(&self, source: &Language, target: &Language) -> Option<(&str, &str)> {
        Some((self.code(source)?, self.code(target)?))
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

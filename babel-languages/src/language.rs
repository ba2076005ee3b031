//! Canonical language identifiers
//!
//! A [`Language`] is the identifier the chain orchestrator works with. It is
//! independent of any backend: each translator maps it to its own code
//! (`eng_Latn`, `zh-CN`, ...) through the registry.

use crate::error::{RegistryError, RegistryResult};
use std::fmt;
use std::sync::Arc;

/// Identifier of the default source language
pub const ENGLISH: &str = "en";

/// An immutable canonical language identifier
///
/// Equality and hashing are by identifier value. Identifiers are stored
/// lower-cased, so `Language::new("EN") == Language::new("en")`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Language(Arc<str>);

impl Language {
    /// Create a language from an identifier, validating its format
    ///
    /// # Example
    ///
    /// ```ignore
    /// let fr = Language::new("fr")?;
    /// assert_eq!(fr.id(), "fr");
    /// ```
    pub fn new(id: &str) -> RegistryResult<Self> {
        let id = id.trim();
        validate_code(id).map_err(|_| RegistryError::InvalidLanguage(id.to_string()))?;
        Ok(Self(Arc::from(id.to_lowercase())))
    }

    /// The default source language, English
    pub fn english() -> Self {
        Self(Arc::from(ENGLISH))
    }

    pub fn id(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Language {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Validate that a language id or backend code is in acceptable format
///
/// Checks that the code is non-empty and contains only ASCII alphanumeric
/// characters, hyphens and underscores. This admits canonical ids (`en`),
/// BCP 47 style codes (`zh-CN`) and NLLB style codes (`eng_Latn`).
pub fn validate_code(code: &str) -> RegistryResult<()> {
    if code.is_empty() {
        return Err(RegistryError::InvalidCode(
            "Language code is empty".to_string(),
        ));
    }

    if !code
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(RegistryError::InvalidCode(format!(
            "Invalid characters in language code: {}",
            code
        )));
    }

    Ok(())
}

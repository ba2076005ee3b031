//! Language catalog for babel
//!
//! Holds the canonical [`Language`] identifiers the chain orchestrator works
//! with, and the [`LanguageRegistry`] that maps each of them to the code a
//! given translation backend uses (or marks the pair as unsupported).
//!
//! # Example
//!
//! ```ignore
//! use babel_languages::{Language, LanguageRegistry};
//!
//! let registry = LanguageRegistry::bundled()?;
//! let en = Language::english();
//! assert_eq!(registry.resolve(&en, "nllb"), Some("eng_Latn"));
//!
//! let marian = registry.codes_for("marian");
//! assert!(!marian.supports(&en, &"ko".parse()?));
//! ```

pub mod error;
pub mod language;
pub mod loader;
pub mod registry;

pub use error::{RegistryError, RegistryResult};
pub use language::{ENGLISH, Language, validate_code};
pub use loader::{load_language_table, parse_language_table};
pub use registry::{BackendLanguages, LanguageRegistry};

//! Translation backends for babel
//!
//! Every backend implements the [`Translator`] trait: a pure `supports`
//! check over the language registry, and an async `translate` that lazily
//! sets up (and caches) whatever session the language pair needs.
//!
//! # Backends
//!
//! - [`MarianTranslator`] - Helsinki-NLP opus-mt, one model per pair
//! - [`NllbTranslator`] - NLLB-200, one model for every pair
//! - [`GoogleTranslateProvider`] - Google Translate v2, needs an API key
//! - [`MockTranslator`] - deterministic, offline
//!
//! # Example
//!
//! ```ignore
//! use babel_languages::{Language, LanguageRegistry};
//! use babel_mt::{HuggingFaceClient, NllbTranslator, Translator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let registry = LanguageRegistry::bundled()?;
//!     let client = HuggingFaceClient::new(std::env::var("HF_API_TOKEN").ok(), timeout)?;
//!     let nllb = NllbTranslator::new(&registry, client);
//!
//!     let (en, ko) = (Language::english(), "ko".parse()?);
//!     if nllb.supports(&en, &ko) {
//!         println!("{}", nllb.translate("Hello", &en, &ko).await?);
//!     }
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod error;
pub mod google_translate;
pub mod huggingface;
pub mod marian;
pub mod mock;
pub mod nllb;
pub mod translator;

pub use cache::SessionCache;
pub use error::{MtError, MtResult};
pub use google_translate::GoogleTranslateProvider;
pub use huggingface::HuggingFaceClient;
pub use marian::MarianTranslator;
pub use mock::{MockCall, MockMode, MockTranslator};
pub use nllb::NllbTranslator;
pub use translator::Translator;

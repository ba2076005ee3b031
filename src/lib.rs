//! babel: telephone-game machine translation
//!
//! Text is translated through a random sequence of languages and backends,
//! then back to where it started, and whatever survives is the result.
//!
//! # Example
//!
//! ```ignore
//! use babel::{Chain, RandomPicker};
//! use babel_languages::LanguageRegistry;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let registry = LanguageRegistry::bundled()?;
//!     let config = babel::Config::from_env()?;
//!     let pool = babel::build_pool(&config, &registry, &babel::default_backends(&config), false)?;
//!
//!     let mut chain = Chain::new(pool, registry.languages(), RandomPicker::from_entropy());
//!     let outcome = chain.run("The spirit is willing, but the flesh is weak", 10).await?;
//!     println!("{}", outcome.text);
//!     Ok(())
//! }
//! ```

pub mod chain;
pub mod cli;
pub mod config;
pub mod error;
pub mod picker;
pub mod pool;


pub use chain::{Chain, ChainOutcome, Hop};
pub use config::Config;
pub use error::{ChainError, ChainResult};
pub use picker::{Picker, RandomPicker, ScriptedPicker};
pub use pool::{Backend, build_pool, default_backends};

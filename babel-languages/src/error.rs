use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building the language registry
///
/// All of these are startup failures: a run never begins with a registry
/// that failed to load.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The language table file could not be read
    #[error("Failed to read language table '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The language table is not valid JSON
    #[error("Failed to parse language table: {0}")]
    Parse(#[from] serde_json::Error),
    /// The JSON is valid but does not have the expected shape
    #[error("Malformed language table: {0}")]
    Malformed(String),
    /// A canonical language id is empty or contains invalid characters
    #[error("Invalid language id: '{0}'")]
    InvalidLanguage(String),
    /// A backend code is empty or contains invalid characters
    #[error("Invalid language code: {0}")]
    InvalidCode(String),
}

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;

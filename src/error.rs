use babel_languages::Language;
use babel_mt::MtError;
use thiserror::Error;

/// Reasons a chain run ends without producing text
#[derive(Debug, Error)]
pub enum ChainError {
    /// A translator failed with something other than "unavailable"
    #[error("Translation failed: {0}")]
    Translation(#[from] MtError),
    #[error("No translators configured")]
    EmptyPool,
    #[error("No target languages configured")]
    NoLanguages,
    /// The retry budget ran out before the next hop succeeded
    #[error("Gave up after {attempts} consecutive rejected attempts ({hops} hops done)")]
    RetriesExhausted { hops: usize, attempts: u64 },
    /// The last successful translator cannot take the text back to the source
    #[error("{backend} cannot translate {from}->{to} for the final hop")]
    FinalHopUnsupported {
        backend: String,
        from: Language,
        to: Language,
    },
}

/// Result type for chain runs
pub type ChainResult<T> = Result<T, ChainError>;

// Text vectorization and clustering shared by the IT and Non-IT models.
// Everything here is pure and synchronous; fitting happens once at startup.

pub mod kmeans;
pub mod sparse;
pub mod stop_words;
pub mod vectorizer;

use thiserror::Error;

/// Fit-time failures. Fatal for the domain being fitted, never for a query.
#[derive(Debug, Error)]
pub enum FitError {
    #[error("corpus is empty")]
    EmptyCorpus,

    #[error("empty vocabulary; documents contain only stop words or no tokens")]
    EmptyVocabulary,

    #[error("cluster count must be at least 1")]
    InvalidClusterCount,

    #[error("cannot form {k} clusters from {samples} samples")]
    TooFewSamples { k: usize, samples: usize },

    #[error("feature index {index} out of range for dimension {dim}")]
    DimensionMismatch { index: usize, dim: usize },

    #[error("invalid token pattern: {0}")]
    TokenPattern(#[from] regex::Error),
}

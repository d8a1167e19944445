//! Error types raised by the neuroevolution engine.
//!
//! Every failure is a caller contract violation: nothing here is retried or
//! recovered from internally.

/// Broad classification of an [`EvolutionError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid parameters or a genome that does not fit the lineage topology.
    Configuration,
    /// A snapshot whose weights cannot be laid out on its declared shape.
    Decoding,
    /// An operation invoked while the engine is in the wrong state.
    State,
}

/// Errors produced by networks, generations and the lineage.
#[derive(Debug, thiserror::Error)]
pub enum EvolutionError {
    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// A genome's layer sizes differ from the lineage topology.
    #[error("topology mismatch: expected layers {expected:?}, found {found:?}")]
    TopologyMismatch {
        /// Layer sizes fixed for the lineage.
        expected: Vec<usize>,
        /// Layer sizes carried by the offending snapshot.
        found: Vec<usize>,
    },

    /// The configuration document could not be parsed.
    #[error("invalid configuration document: {0}")]
    Json(#[from] serde_json::Error),

    /// Snapshot weight count does not match its shape.
    #[error("snapshot of shape {shape:?} needs {expected} weights, found {found}")]
    Decoding {
        /// Declared layer sizes.
        shape: Vec<usize>,
        /// Weight count implied by `shape`.
        expected: usize,
        /// Weight count actually present.
        found: usize,
    },

    /// Snapshot declares no layers at all.
    #[error("snapshot declares no layers")]
    EmptyShape,

    /// The lineage has not produced a first generation yet.
    #[error("no generations yet")]
    NoGenerations,

    /// Breeding needs at least two ranked genomes.
    #[error("generation holds {0} genome(s), at least 2 are needed to breed")]
    NotEnoughGenomes(usize),

    /// Scores must be comparable to be ranked.
    #[error("score is NaN and cannot be ranked")]
    InvalidScore,
}

impl EvolutionError {
    /// Returns the category this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EvolutionError::Configuration(_)
            | EvolutionError::TopologyMismatch { .. }
            | EvolutionError::Json(_) => ErrorKind::Configuration,
            EvolutionError::Decoding { .. } | EvolutionError::EmptyShape => ErrorKind::Decoding,
            EvolutionError::NoGenerations
            | EvolutionError::NotEnoughGenomes(_)
            | EvolutionError::InvalidScore => ErrorKind::State,
        }
    }
}

/// Result alias used throughout the engine.
pub type Result<T> = std::result::Result<T, EvolutionError>;

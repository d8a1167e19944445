//! A scored network snapshot.

use serde::{Deserialize, Serialize};

use super::error::{EvolutionError, Result};
use super::snapshot::Snapshot;

/// The outcome of one agent: the weights it ran with and the score it earned.
///
/// Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genome {
    score: f64,
    snapshot: Snapshot,
}

impl Genome {
    /// Pairs a snapshot with its score. NaN scores cannot be ranked and are
    /// rejected.
    pub fn new(score: f64, snapshot: Snapshot) -> Result<Self> {
        if score.is_nan() {
            return Err(EvolutionError::InvalidScore);
        }
        Ok(Self { score, snapshot })
    }

    /// Fitness score.
    pub fn score(&self) -> f64 {
        self.score
    }

    /// Weights the agent ran with.
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }
}

//! Flat, shape-tagged form of a network's weights.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::error::{EvolutionError, Result};
use super::strategy::WeightInit;

/// Network weights flattened layer-major, neuron-major, weight-minor.
///
/// Layer 0 contributes no weights; layer `i` contributes
/// `shape[i] * shape[i - 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Neuron count per layer, input first.
    pub shape: Vec<usize>,
    /// Flattened weights.
    pub weights: Vec<f32>,
}

impl Snapshot {
    /// Builds a snapshot after checking the weight count against the shape.
    pub fn new(shape: Vec<usize>, weights: Vec<f32>) -> Result<Self> {
        let snapshot = Self { shape, weights };
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Number of weights a network of this shape carries, saturating at
    /// `usize::MAX` for shapes too large to address.
    pub fn weight_count(shape: &[usize]) -> usize {
        Self::checked_weight_count(shape).unwrap_or(usize::MAX)
    }

    /// Number of weights a network of this shape carries, `None` on overflow.
    pub fn checked_weight_count(shape: &[usize]) -> Option<usize> {
        shape
            .windows(2)
            .try_fold(0usize, |total, pair| total.checked_add(pair[0].checked_mul(pair[1])?))
    }

    /// Fails with a decoding error if the weights cannot fill the shape.
    ///
    /// A shape whose weight count overflows reports `expected` as
    /// `usize::MAX`.
    pub fn validate(&self) -> Result<()> {
        if self.shape.is_empty() {
            return Err(EvolutionError::EmptyShape);
        }
        let expected = Self::checked_weight_count(&self.shape);
        if expected != Some(self.weights.len()) {
            let expected = expected.unwrap_or(usize::MAX);
            return Err(EvolutionError::Decoding {
                shape: self.shape.clone(),
                expected,
                found: self.weights.len(),
            });
        }
        Ok(())
    }

    /// Same shape, every weight redrawn from `init`.
    pub fn randomized<R: Rng>(&self, init: &WeightInit, rng: &mut R) -> Self {
        Self {
            shape: self.shape.clone(),
            weights: self.weights.iter().map(|_| init.sample(rng)).collect(),
        }
    }

    /// Fails if `self` does not have exactly `expected` layer sizes.
    pub fn ensure_shape(&self, expected: &[usize]) -> Result<()> {
        if self.shape != expected {
            return Err(EvolutionError::TopologyMismatch {
                expected: expected.to_vec(),
                found: self.shape.clone(),
            });
        }
        Ok(())
    }
}

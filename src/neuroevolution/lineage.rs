//! History of generations.
//!
//! The last generation is the current one and accepts new genomes; earlier
//! ones are kept read-only for inspection.

use log::info;
use rand::Rng;

use super::error::{EvolutionError, Result};
use super::genome::Genome;
use super::generation::Generation;
use super::network::Network;
use super::params::Config;
use super::snapshot::Snapshot;

/// Ordered generations sharing one fixed topology.
#[derive(Debug, Clone)]
pub struct Lineage {
    generations: Vec<Generation>,
    layer_sizes: Vec<usize>,
}

impl Lineage {
    /// Creates an empty lineage whose genomes must have `layer_sizes`.
    pub fn new(layer_sizes: Vec<usize>) -> Self {
        Self {
            generations: Vec::new(),
            layer_sizes,
        }
    }

    /// Populates the first epoch with random networks and opens an empty
    /// generation to score them into.
    pub fn first_generation<R: Rng>(&mut self, config: &Config, rng: &mut R) -> Vec<Snapshot> {
        let snapshots = (0..config.params.population)
            .map(|_| {
                Network::perceptron(
                    &config.params.topology,
                    config.activation.clone(),
                    &config.weight_init,
                    rng,
                )
                .export_snapshot()
            })
            .collect();

        self.generations
            .push(Generation::new(config.params.score_sort));
        info!(
            "epoch 0: {} random networks of shape {:?}",
            config.params.population, self.layer_sizes
        );
        snapshots
    }

    /// Breeds the current generation into the next population and opens a
    /// new empty generation.
    ///
    /// The current generation becomes history only if breeding succeeds.
    pub fn next_generation<R: Rng>(&mut self, config: &Config, rng: &mut R) -> Result<Vec<Snapshot>> {
        let current = self.current().ok_or(EvolutionError::NoGenerations)?;
        let snapshots = current.generate_next(config, rng)?;

        info!(
            "epoch {}: bred {} networks from {} genomes, best score {}",
            self.generations.len(),
            snapshots.len(),
            current.len(),
            current.best().map_or(f64::NAN, Genome::score)
        );

        self.generations
            .push(Generation::new(config.params.score_sort));
        Ok(snapshots)
    }

    /// Ranks a genome into the current generation.
    pub fn add_genome(&mut self, genome: Genome) -> Result<()> {
        let current = self
            .generations
            .last_mut()
            .ok_or(EvolutionError::NoGenerations)?;
        genome.snapshot().ensure_shape(&self.layer_sizes)?;
        current.add_genome(genome);
        Ok(())
    }

    /// The generation accepting genomes, if any.
    pub fn current(&self) -> Option<&Generation> {
        self.generations.last()
    }

    /// All generations, oldest first.
    pub fn generations(&self) -> &[Generation] {
        &self.generations
    }

    /// Number of generations, the current one included.
    pub fn len(&self) -> usize {
        self.generations.len()
    }

    /// Whether no generation has been started.
    pub fn is_empty(&self) -> bool {
        self.generations.is_empty()
    }

    /// Zero-based index of the current generation.
    pub fn epoch(&self) -> Option<usize> {
        self.generations.len().checked_sub(1)
    }

    /// Layer sizes shared by every genome.
    pub fn layer_sizes(&self) -> &[usize] {
        &self.layer_sizes
    }
}

//! Ranked genomes of one epoch and the breeding that produces the next one.
//!
//! The next population is assembled in three stages:
//! - elites: the best genomes, copied unchanged
//! - fresh: random weights on the best genome's shape
//! - bred: children of ranked pairs, filling the remaining slots
//!
//! Breeding walks a widening window over the ranking. For `w = 1, 2, ...`
//! every genome ranked above `w` is paired with it, so the top genomes take
//! part in the most pairings. The window wraps when `w` reaches the last
//! rank, so the lowest ranked genome never breeds. With only two genomes the
//! window stops at `w = 1` instead.

use log::{debug, trace};
use rand::Rng;

use super::error::{EvolutionError, Result};
use super::genome::Genome;
use super::params::{Config, Params, ScoreSort};
use super::snapshot::Snapshot;

/// Genomes of one epoch, kept in rank order.
#[derive(Debug, Clone, Default)]
pub struct Generation {
    genomes: Vec<Genome>,
    score_sort: ScoreSort,
}

impl Generation {
    /// Creates an empty generation ranking in the given direction.
    pub fn new(score_sort: ScoreSort) -> Self {
        Self {
            genomes: Vec::new(),
            score_sort,
        }
    }

    /// Inserts a genome at its rank.
    ///
    /// A genome goes after every genome scoring at least as well, so equal
    /// scores keep their arrival order.
    pub fn add_genome(&mut self, genome: Genome) {
        let sort = self.score_sort;
        let position = self
            .genomes
            .partition_point(|ranked| !sort.ranks_ahead(genome.score(), ranked.score()));
        trace!(
            "ranked genome with score {} at {}/{}",
            genome.score(),
            position,
            self.genomes.len() + 1
        );
        self.genomes.insert(position, genome);
    }

    /// Genomes, best first.
    pub fn genomes(&self) -> &[Genome] {
        &self.genomes
    }

    /// The top ranked genome, if any.
    pub fn best(&self) -> Option<&Genome> {
        self.genomes.first()
    }

    /// Number of scored genomes.
    pub fn len(&self) -> usize {
        self.genomes.len()
    }

    /// Whether no genome has been scored yet.
    pub fn is_empty(&self) -> bool {
        self.genomes.is_empty()
    }

    /// Ranking direction of this generation.
    pub fn score_sort(&self) -> ScoreSort {
        self.score_sort
    }

    /// Produces `children` snapshots from two parents of identical shape.
    ///
    /// Each child is an independent uniform crossover of the parents followed
    /// by mutation.
    pub fn breed<R: Rng>(
        parent_a: &Genome,
        parent_b: &Genome,
        children: usize,
        params: &Params,
        rng: &mut R,
    ) -> Result<Vec<Snapshot>> {
        let (a, b) = (parent_a.snapshot(), parent_b.snapshot());
        b.ensure_shape(&a.shape)?;

        Ok((0..children)
            .map(|_| {
                let mut child = crossover(a, b, rng);
                mutate(&mut child, params.mutation_rate, params.mutation_range, rng);
                child
            })
            .collect())
    }

    /// Builds the snapshots of the next population, exactly
    /// `params.population` of them.
    ///
    /// Needs at least two genomes.
    pub fn generate_next<R: Rng>(&self, config: &Config, rng: &mut R) -> Result<Vec<Snapshot>> {
        let count = self.genomes.len();
        if count < 2 {
            return Err(EvolutionError::NotEnoughGenomes(count));
        }

        let params = &config.params;
        let population = params.population;
        let mut next = Vec::with_capacity(population);

        let elites = params.elite_count().min(population).min(count);
        next.extend(self.genomes[..elites].iter().map(|g| g.snapshot().clone()));

        let template = self.genomes[0].snapshot();
        let fresh = params.random_count().min(population - next.len());
        next.extend((0..fresh).map(|_| template.randomized(&config.weight_init, rng)));

        let children = params.children_per_pair();
        for (i, w) in breeding_pairs(count) {
            let room = population - next.len();
            if room == 0 {
                break;
            }
            let offspring = Self::breed(&self.genomes[i], &self.genomes[w], children, params, rng)?;
            next.extend(offspring.into_iter().take(room));
        }

        debug!(
            "next population: {} elites, {} fresh, {} bred from {} genomes",
            elites,
            fresh,
            next.len() - elites - fresh,
            count
        );
        Ok(next)
    }
}

/// Endless sequence of `(i, w)` rank pairs with `i < w`, grouped by `w`.
///
/// `w` runs up to `count - 2` before wrapping; two genomes still yield the
/// single pair `(0, 1)`. Needs `count >= 2`.
pub fn breeding_pairs(count: usize) -> impl Iterator<Item = (usize, usize)> {
    let window_end = count.saturating_sub(1).max(2);
    (1..window_end)
        .flat_map(|w| (0..w).map(move |i| (i, w)))
        .cycle()
}

/// Uniform crossover: each weight comes from `b` with probability 0.5,
/// otherwise from `a`.
pub fn crossover<R: Rng>(a: &Snapshot, b: &Snapshot, rng: &mut R) -> Snapshot {
    let weights = a
        .weights
        .iter()
        .zip(&b.weights)
        .map(|(&wa, &wb)| if rng.random_bool(0.5) { wb } else { wa })
        .collect();
    Snapshot {
        shape: a.shape.clone(),
        weights,
    }
}

/// Adds a uniform draw in `[-range, range]` to each weight with probability
/// `rate`.
pub fn mutate<R: Rng>(snapshot: &mut Snapshot, rate: f64, range: f32, rng: &mut R) {
    let range = range.abs();
    for weight in &mut snapshot.weights {
        if rng.random::<f64>() < rate {
            *weight += rng.random_range(-range..=range);
        }
    }
}

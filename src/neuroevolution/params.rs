//! Engine configuration.
//!
//! [`Params`] holds the numeric knobs and can be read from JSON. [`Config`]
//! pairs validated params with the injected [`Activation`] and
//! [`WeightInit`] behaviour.

use serde::{Deserialize, Serialize};

use super::error::{EvolutionError, Result};
use super::strategy::{Activation, WeightInit};

/// Layer layout shared by every network of a lineage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topology {
    /// Number of input neurons.
    pub inputs: usize,
    /// Sizes of the hidden layers, in order.
    pub hidden: Vec<usize>,
    /// Number of output neurons.
    pub outputs: usize,
}

impl Topology {
    /// Creates a topology from its three parts.
    pub fn new(inputs: usize, hidden: Vec<usize>, outputs: usize) -> Self {
        Self {
            inputs,
            hidden,
            outputs,
        }
    }

    /// Flattens the topology into per-layer neuron counts.
    pub fn layer_sizes(&self) -> Vec<usize> {
        let mut sizes = Vec::with_capacity(self.hidden.len() + 2);
        sizes.push(self.inputs);
        sizes.extend_from_slice(&self.hidden);
        sizes.push(self.outputs);
        sizes
    }
}

impl Default for Topology {
    fn default() -> Self {
        Self::new(1, vec![1], 1)
    }
}

/// Direction in which genomes are ranked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScoreSort {
    /// Highest score first.
    #[default]
    Descending,
    /// Lowest score first.
    Ascending,
}

impl ScoreSort {
    /// Whether `candidate` ranks strictly ahead of `incumbent`.
    #[inline]
    pub fn ranks_ahead(self, candidate: f64, incumbent: f64) -> bool {
        match self {
            ScoreSort::Descending => candidate > incumbent,
            ScoreSort::Ascending => candidate < incumbent,
        }
    }
}

/// Numeric evolution parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Network layout.
    pub topology: Topology,
    /// Networks per generation.
    pub population: usize,
    /// Fraction of the population copied unchanged from the best genomes.
    pub elitism: f64,
    /// Fraction of the population filled with freshly randomised networks.
    pub random_behaviour: f64,
    /// Per-weight probability of mutation after crossover.
    pub mutation_rate: f64,
    /// Mutations add a uniform draw in `[-mutation_range, mutation_range]`.
    pub mutation_range: f32,
    /// Ranking direction.
    pub score_sort: ScoreSort,
    /// Children produced per breeding pair. Zero is treated as one.
    pub children_per_pair: usize,
    /// Seed for the engine RNG. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            topology: Topology::default(),
            population: 100,
            elitism: 0.2,
            random_behaviour: 0.2,
            mutation_rate: 0.1,
            mutation_range: 0.5,
            score_sort: ScoreSort::Descending,
            children_per_pair: 1,
            seed: None,
        }
    }
}

impl Params {
    /// Parses params from JSON. Missing keys take their default value.
    pub fn from_json(json: &str) -> Result<Self> {
        let params: Params = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    /// Checks every range constraint.
    pub fn validate(&self) -> Result<()> {
        if self.population < 1 {
            return Err(invalid("population must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.elitism) {
            return Err(invalid(format!("elitism {} outside [0, 1]", self.elitism)));
        }
        if !(0.0..=1.0).contains(&self.random_behaviour) {
            return Err(invalid(format!(
                "random_behaviour {} outside [0, 1]",
                self.random_behaviour
            )));
        }
        if self.elitism + self.random_behaviour > 1.0 {
            return Err(invalid(format!(
                "elitism + random_behaviour = {} exceeds 1",
                self.elitism + self.random_behaviour
            )));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(invalid(format!(
                "mutation_rate {} outside [0, 1]",
                self.mutation_rate
            )));
        }
        if !self.mutation_range.is_finite() || self.mutation_range < 0.0 {
            return Err(invalid(format!(
                "mutation_range {} must be a finite non-negative number",
                self.mutation_range
            )));
        }
        if self.topology.inputs == 0 || self.topology.outputs == 0 {
            return Err(invalid("topology needs at least one input and one output"));
        }
        if self.topology.hidden.contains(&0) {
            return Err(invalid("hidden layers cannot be empty"));
        }
        Ok(())
    }

    /// Children per breeding pair, clamped to at least one.
    pub fn children_per_pair(&self) -> usize {
        self.children_per_pair.max(1)
    }

    /// Number of genomes carried over unchanged.
    pub fn elite_count(&self) -> usize {
        fraction_of(self.elitism, self.population)
    }

    /// Number of freshly randomised snapshots per generation.
    pub fn random_count(&self) -> usize {
        fraction_of(self.random_behaviour, self.population)
    }
}

fn fraction_of(fraction: f64, population: usize) -> usize {
    (fraction * population as f64).round() as usize
}

fn invalid(message: impl Into<String>) -> EvolutionError {
    EvolutionError::Configuration(message.into())
}

/// Validated params plus injected behaviour.
///
/// Read-only once handed to the engine.
#[derive(Debug, Clone)]
pub struct Config {
    /// Numeric parameters.
    pub params: Params,
    /// Activation used by every network.
    pub activation: Activation,
    /// Weight sampler for fresh networks and random snapshots.
    pub weight_init: WeightInit,
}

impl Config {
    /// Validates `params` and pairs them with the default sigmoid activation
    /// and uniform `[-1, 1]` weight sampler.
    pub fn new(params: Params) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            params,
            activation: Activation::default(),
            weight_init: WeightInit::default(),
        })
    }

    /// Replaces the activation function.
    #[must_use]
    pub fn with_activation(mut self, activation: Activation) -> Self {
        self.activation = activation;
        self
    }

    /// Replaces the weight sampler.
    #[must_use]
    pub fn with_weight_init(mut self, weight_init: WeightInit) -> Self {
        self.weight_init = weight_init;
        self
    }

    /// Layer sizes every network and genome must have.
    pub fn layer_sizes(&self) -> Vec<usize> {
        self.params.topology.layer_sizes()
    }
}

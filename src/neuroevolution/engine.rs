//! Public entry point driven by the simulation.
//!
//! Each epoch the caller asks for a population of networks, runs one agent
//! per network, and reports every agent's score exactly once when it is
//! eliminated. The next call to [`Neuroevolution::next_generation`] breeds
//! the scored networks into a new population.

use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::error::Result;
use super::genome::Genome;
use super::lineage::Lineage;
use super::network::Network;
use super::params::{Config, Params};

/// Genetic algorithm over fixed-topology perceptrons.
#[derive(Debug)]
pub struct Neuroevolution {
    config: Config,
    lineage: Lineage,
    rng: StdRng,
}

impl Neuroevolution {
    /// Creates an engine with default strategies after validating `params`.
    pub fn new(params: Params) -> Result<Self> {
        Ok(Self::with_config(Config::new(params)?))
    }

    /// Creates an engine from an already validated configuration.
    pub fn with_config(config: Config) -> Self {
        let rng = match config.params.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        info!(
            "neuroevolution: population {}, layers {:?}, activation {}, weights {}",
            config.params.population,
            config.layer_sizes(),
            config.activation.name(),
            config.weight_init.name()
        );
        Self {
            lineage: Lineage::new(config.layer_sizes()),
            config,
            rng,
        }
    }

    /// Discards every generation. The next call to
    /// [`next_generation`](Self::next_generation) starts from random networks.
    pub fn restart(&mut self) {
        info!("restarting after {} generation(s)", self.lineage.len());
        self.lineage = Lineage::new(self.config.layer_sizes());
    }

    /// Returns the networks of the next epoch.
    ///
    /// The order is stable: the caller may pair the networks with its own
    /// agents by index.
    pub fn next_generation(&mut self) -> Result<Vec<Network>> {
        let snapshots = if self.lineage.is_empty() {
            self.lineage.first_generation(&self.config, &mut self.rng)
        } else {
            self.lineage.next_generation(&self.config, &mut self.rng)?
        };

        snapshots
            .iter()
            .map(|snapshot| Network::from_snapshot(snapshot, self.config.activation.clone()))
            .collect()
    }

    /// Records the score earned by `network` in the current epoch.
    ///
    /// Call at most once per network per epoch.
    pub fn network_score(&mut self, network: &Network, score: f64) -> Result<()> {
        let genome = Genome::new(score, network.export_snapshot())?;
        self.lineage.add_genome(genome)
    }

    /// Generation history.
    pub fn lineage(&self) -> &Lineage {
        &self.lineage
    }

    /// Active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Zero-based index of the running epoch, `None` before the first one.
    pub fn epoch(&self) -> Option<usize> {
        self.lineage.epoch()
    }

    /// Best score reported so far in the running epoch.
    pub fn best_score(&self) -> Option<f64> {
        self.lineage.current()?.best().map(Genome::score)
    }
}

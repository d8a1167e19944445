//! # Neuroevo - Neuroevolution for Real-Time Agents
//!
//! Evolves small feedforward networks with a genetic algorithm. A simulation
//! drives one network per agent every tick and reports a fitness score when
//! the agent is eliminated; the engine ranks the scored networks and breeds
//! the next population from them.
//!
//! ## Features
//!
//! - Layered perceptrons with pluggable activation (sigmoid by default)
//! - Flat, shape-tagged weight snapshots for cloning and reconstruction
//! - Stable score ranking in either direction
//! - Elitism, fresh random networks, uniform crossover and mutation
//! - Seeded, reproducible runs
//!
//! ## Core Modules
//!
//! - [`neuroevolution::network`] - Network evaluation and snapshots
//! - [`neuroevolution::generation`] - Ranking and breeding
//! - [`neuroevolution::lineage`] - Generation history
//! - [`neuroevolution::engine`] - The API a simulation drives

/// Neuroevolution engine and its building blocks.
pub mod neuroevolution {
    /// Public façade driven by the simulation.
    pub mod engine;
    /// Error taxonomy.
    pub mod error;
    /// Ranked genomes and breeding.
    pub mod generation;
    /// Scored snapshots.
    pub mod genome;
    /// Ordered generation history.
    pub mod lineage;
    /// Layered perceptron.
    pub mod network;
    /// Numeric parameters and injected behaviour.
    pub mod params;
    /// Flattened network weights.
    pub mod snapshot;
    /// Activation functions and weight samplers.
    pub mod strategy;
}

pub use neuroevolution::engine::Neuroevolution;
pub use neuroevolution::error::{ErrorKind, EvolutionError, Result};
pub use neuroevolution::network::Network;
pub use neuroevolution::params::{Config, Params, ScoreSort, Topology};
pub use neuroevolution::snapshot::Snapshot;
pub use neuroevolution::strategy::{Activation, WeightInit};

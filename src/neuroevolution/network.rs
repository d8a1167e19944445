//! Feedforward network evaluated by the agents the engine controls.
//!
//! A network is a list of fully connected layers. Layer `i` stores its
//! incoming weights as an `(neurons × previous neurons)` matrix, so row `j`
//! holds the weights of neuron `j`. Layer 0 is the input layer and has no
//! weights.

use ndarray::{Array1, Array2, ArrayView1};
use rand::Rng;

use super::error::{EvolutionError, Result};
use super::params::Topology;
use super::snapshot::Snapshot;
use super::strategy::{Activation, WeightInit};

/// One layer of neurons.
#[derive(Debug, Clone)]
pub struct Layer {
    /// Position in the network, 0 for the input layer.
    pub index: usize,
    /// Current neuron values.
    pub values: Array1<f32>,
    /// Incoming weights (`neurons × previous neurons`).
    pub weights: Array2<f32>,
}

/// Read-only view of a single neuron.
#[derive(Debug, Clone, Copy)]
pub struct Neuron<'a> {
    /// Last computed (or assigned) value.
    pub value: f32,
    /// One weight per neuron of the previous layer.
    pub weights: ArrayView1<'a, f32>,
}

impl Layer {
    fn from_weights(index: usize, weights: Array2<f32>) -> Self {
        Self {
            index,
            values: Array1::zeros(weights.nrows()),
            weights,
        }
    }

    /// Number of neurons in this layer.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the layer has no neurons.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns neuron `j`, if any.
    pub fn neuron(&self, j: usize) -> Option<Neuron<'_>> {
        (j < self.len()).then(|| Neuron {
            value: self.values[j],
            weights: self.weights.row(j),
        })
    }
}

/// A layered perceptron.
#[derive(Debug, Clone)]
pub struct Network {
    layers: Vec<Layer>,
    activation: Activation,
}

impl Network {
    /// Creates a network with no layers.
    pub fn new(activation: Activation) -> Self {
        Self {
            layers: Vec::new(),
            activation,
        }
    }

    /// Creates a randomly weighted network laid out as `topology`.
    pub fn perceptron<R: Rng>(
        topology: &Topology,
        activation: Activation,
        init: &WeightInit,
        rng: &mut R,
    ) -> Self {
        let mut network = Self::new(activation);
        network.populate(&topology.layer_sizes(), init, rng);
        network
    }

    /// Rebuilds a network from a snapshot.
    pub fn from_snapshot(snapshot: &Snapshot, activation: Activation) -> Result<Self> {
        let mut network = Self::new(activation);
        network.import_snapshot(snapshot)?;
        Ok(network)
    }

    /// Replaces all layers with freshly sampled ones of the given sizes.
    pub fn populate<R: Rng>(&mut self, layer_sizes: &[usize], init: &WeightInit, rng: &mut R) {
        let mut previous = 0;
        self.layers = layer_sizes
            .iter()
            .enumerate()
            .map(|(index, &size)| {
                let weights = Array2::from_shape_simple_fn((size, previous), || init.sample(rng));
                previous = size;
                Layer::from_weights(index, weights)
            })
            .collect();
    }

    /// Runs a forward pass and returns the output layer values.
    ///
    /// `inputs[k]` is assigned to input neuron `k`. Extra inputs are ignored;
    /// input neurons without a matching value keep their previous value.
    pub fn compute(&mut self, inputs: &[f32]) -> Array1<f32> {
        let Some((input_layer, rest)) = self.layers.split_first_mut() else {
            return Array1::zeros(0);
        };

        for (value, &input) in input_layer.values.iter_mut().zip(inputs) {
            *value = input;
        }

        let activation = &self.activation;
        let mut signal = input_layer.values.clone();
        for layer in rest.iter_mut() {
            layer.values = layer.weights.dot(&signal).mapv(|sum| activation.apply(sum));
            signal.clone_from(&layer.values);
        }

        signal
    }

    /// Flattens the network into a snapshot.
    pub fn export_snapshot(&self) -> Snapshot {
        let shape = self.shape();
        let mut weights = Vec::with_capacity(Snapshot::weight_count(&shape));
        for layer in &self.layers {
            weights.extend(layer.weights.iter().copied());
        }
        Snapshot { shape, weights }
    }

    /// Replaces the layers with those described by `snapshot`.
    ///
    /// On error the network is left untouched.
    pub fn import_snapshot(&mut self, snapshot: &Snapshot) -> Result<()> {
        snapshot.validate()?;

        let mut layers = Vec::with_capacity(snapshot.shape.len());
        let mut offset = 0;
        let mut previous = 0;
        let decoding_error = || EvolutionError::Decoding {
            shape: snapshot.shape.clone(),
            expected: Snapshot::weight_count(&snapshot.shape),
            found: snapshot.weights.len(),
        };
        for (index, &size) in snapshot.shape.iter().enumerate() {
            let count = size.checked_mul(previous).ok_or_else(decoding_error)?;
            let layer_weights = snapshot
                .weights
                .get(offset..offset + count)
                .ok_or_else(decoding_error)?;
            let weights = Array2::from_shape_vec((size, previous), layer_weights.to_vec())
                .map_err(|_| decoding_error())?;
            layers.push(Layer::from_weights(index, weights));
            offset += count;
            previous = size;
        }

        self.layers = layers;
        Ok(())
    }

    /// Neuron count per layer.
    pub fn shape(&self) -> Vec<usize> {
        self.layers.iter().map(Layer::len).collect()
    }

    /// All layers, input first.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// The activation this network applies.
    pub fn activation(&self) -> &Activation {
        &self.activation
    }
}

//! Injected behaviour: neuron activation and weight initialisation.
//!
//! Both are cheap to clone and can be shared between every network of a
//! population.

use std::fmt;
use std::sync::Arc;

use rand::{Rng, RngCore};

use super::error::{EvolutionError, Result};

type ActivationFn = dyn Fn(f32) -> f32 + Send + Sync;
type InitFn = dyn Fn(&mut dyn RngCore) -> f32 + Send + Sync;

/// Activation function applied to every non-input neuron.
#[derive(Clone)]
pub struct Activation {
    name: &'static str,
    func: Arc<ActivationFn>,
}

impl Activation {
    /// Logistic sigmoid `1 / (1 + e^-x)`.
    pub fn sigmoid() -> Self {
        Self::named("sigmoid", |x| 1.0 / (1.0 + (-x).exp()))
    }

    /// Hyperbolic tangent.
    pub fn tanh() -> Self {
        Self::named("tanh", f32::tanh)
    }

    /// Rectified linear unit.
    pub fn relu() -> Self {
        Self::named("relu", |x| x.max(0.0))
    }

    /// Wraps an arbitrary function.
    pub fn custom(func: impl Fn(f32) -> f32 + Send + Sync + 'static) -> Self {
        Self::named("custom", func)
    }

    fn named(name: &'static str, func: impl Fn(f32) -> f32 + Send + Sync + 'static) -> Self {
        Self {
            name,
            func: Arc::new(func),
        }
    }

    /// Applies the activation to a weighted sum.
    #[inline]
    pub fn apply(&self, x: f32) -> f32 {
        (self.func)(x)
    }

    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Default for Activation {
    fn default() -> Self {
        Self::sigmoid()
    }
}

impl fmt::Debug for Activation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Activation").field(&self.name).finish()
    }
}

/// Source of fresh weights for newly populated networks and random snapshots.
#[derive(Clone)]
pub struct WeightInit {
    name: &'static str,
    func: Arc<InitFn>,
}

impl WeightInit {
    /// Uniform draw in `[-scale, scale]`. The scale must be finite.
    pub fn uniform(scale: f32) -> Result<Self> {
        if !scale.is_finite() {
            return Err(EvolutionError::Configuration(format!(
                "uniform weight scale {scale} must be finite"
            )));
        }
        Ok(Self::uniform_unchecked(scale.abs()))
    }

    fn uniform_unchecked(scale: f32) -> Self {
        Self::named("uniform", move |rng| rng.random_range(-scale..=scale))
    }

    /// Always yields `value`. Handy for reproducible fixtures.
    pub fn constant(value: f32) -> Self {
        Self::named("constant", move |_| value)
    }

    /// Wraps an arbitrary sampler.
    pub fn custom(func: impl Fn(&mut dyn RngCore) -> f32 + Send + Sync + 'static) -> Self {
        Self::named("custom", func)
    }

    fn named(
        name: &'static str,
        func: impl Fn(&mut dyn RngCore) -> f32 + Send + Sync + 'static,
    ) -> Self {
        Self {
            name,
            func: Arc::new(func),
        }
    }

    /// Draws one weight.
    #[inline]
    pub fn sample<R: Rng>(&self, rng: &mut R) -> f32 {
        (self.func)(rng)
    }

    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Default for WeightInit {
    fn default() -> Self {
        Self::uniform_unchecked(1.0)
    }
}

impl fmt::Debug for WeightInit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("WeightInit").field(&self.name).finish()
    }
}

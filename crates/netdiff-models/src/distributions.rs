//! Random value generators used by random initialization.

use netdiff_core::errors::{DiffusionError, ErrorInfo};
use netdiff_core::{AttrValue, RngHandle};
use serde::{Deserialize, Serialize};

/// Uniform choice over an explicit, non-empty list of values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscreteState {
    values: Vec<AttrValue>,
}

impl DiscreteState {
    /// Creates the distribution. An empty value list is rejected.
    pub fn new(values: Vec<AttrValue>) -> Result<Self, DiffusionError> {
        if values.is_empty() {
            return Err(DiffusionError::Rng(ErrorInfo::new(
                "empty-distribution",
                "discrete distribution needs at least one value",
            )));
        }
        Ok(Self { values })
    }

    /// Convenience constructor for integer states.
    pub fn integers(values: impl IntoIterator<Item = i64>) -> Result<Self, DiffusionError> {
        Self::new(values.into_iter().map(AttrValue::Int).collect())
    }

    /// Values the distribution chooses from, in declaration order.
    pub fn values(&self) -> &[AttrValue] {
        &self.values
    }

    /// Draws one value.
    pub fn random(&self, rng: &mut RngHandle) -> AttrValue {
        self.values[rng.index(self.values.len())].clone()
    }
}

/// Uniform draws from the half-open interval `[lo, hi)`.
///
/// `lo < hi` is the caller's responsibility.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContinuesState {
    /// Inclusive lower bound.
    pub lo: f64,
    /// Exclusive upper bound.
    pub hi: f64,
}

impl ContinuesState {
    /// Creates the distribution.
    pub fn new(lo: f64, hi: f64) -> Self {
        Self { lo, hi }
    }

    /// Draws one value.
    pub fn random(&self, rng: &mut RngHandle) -> f64 {
        self.lo + rng.unit() * (self.hi - self.lo)
    }

    /// Draws `count` independent values.
    pub fn random_batch(&self, rng: &mut RngHandle, count: usize) -> Vec<f64> {
        (0..count).map(|_| self.random(rng)).collect()
    }
}

/// Either kind of state distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StateDistribution {
    /// Finite set of values.
    Discrete(DiscreteState),
    /// Real interval.
    Continuous(ContinuesState),
}

impl StateDistribution {
    /// Draws one attribute value.
    pub fn sample(&self, rng: &mut RngHandle) -> AttrValue {
        match self {
            StateDistribution::Discrete(state) => state.random(rng),
            StateDistribution::Continuous(state) => AttrValue::Float(state.random(rng)),
        }
    }
}

use std::collections::BTreeSet;

use netdiff_core::{AttrValue, NodeId};
use serde::{Deserialize, Serialize};

/// Infection probability used by SIS/SIR when `prob` is not supplied.
pub const DEFAULT_INFECTION_PROB: f64 = 0.5;

/// Arguments bag passed to every action. Each action reads the fields it
/// recognizes and ignores the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ActionArgs {
    /// Number of synchronous steps; `0` leaves the graph untouched.
    pub steps: usize,
    /// Fraction of active neighbours required by the uniform threshold rule.
    pub threshold: f64,
    /// Number of discrete states of the UPOD models.
    pub states: usize,
    /// Infection probability (SIS/SIR) or per-node coverage (random init).
    pub prob: Option<f64>,
    /// Infectious duration assigned on infection.
    pub itime: i64,
    /// Propagate DeGroot influence against edge direction.
    pub transpose: bool,
    /// Clip DeGroot results to `[0, 1]`.
    pub clip: bool,
    /// Literal value written by the `init` action.
    pub init: Option<AttrValue>,
    /// Nodes targeted by the `init` action.
    pub selected: BTreeSet<NodeId>,
}

impl Default for ActionArgs {
    fn default() -> Self {
        Self {
            steps: 1,
            threshold: 0.5,
            states: 2,
            prob: None,
            itime: 2,
            transpose: false,
            clip: false,
            init: None,
            selected: BTreeSet::new(),
        }
    }
}

impl ActionArgs {
    /// Default arguments with the given step count.
    pub fn steps(steps: usize) -> Self {
        Self {
            steps,
            ..Self::default()
        }
    }

    /// Infection probability for the epidemic rules.
    pub fn infection_prob(&self) -> f64 {
        self.prob.unwrap_or(DEFAULT_INFECTION_PROB)
    }
}

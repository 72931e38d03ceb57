//! SIS and SIR countdown epidemics.
//!
//! A state of `0` is susceptible and a positive state is infectious with that
//! many steps left. In the SIR variant `-1` marks recovered nodes and never
//! changes again.

use netdiff_core::errors::DiffusionError;
use netdiff_core::{Directedness, RngHandle};
use netdiff_graph::AttrGraph;

use crate::state::{commit, neighbor_index, read_discrete};

/// Recovered state of the SIR model.
pub const RECOVERED: i64 = -1;

/// Which compartment an expiring infection moves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    /// Back to susceptible (SIS).
    Susceptible,
    /// Recovered and immune (SIR).
    Immune,
}

/// Epidemic parameters of one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpidemicParams {
    /// Infection probability per infectious neighbour.
    pub prob: f64,
    /// State assigned on infection.
    pub itime: i64,
    /// Compartment entered when the countdown expires.
    pub recovery: Recovery,
}

/// Probability that at least one of `exposures` independent contacts infects.
pub fn infection_probability(prob: f64, exposures: usize) -> f64 {
    if exposures == 0 {
        return 0.0;
    }
    let exposures = i32::try_from(exposures).unwrap_or(i32::MAX);
    1.0 - (1.0 - prob).powi(exposures)
}

fn countdown(state: i64, recovery: Recovery) -> i64 {
    match (state, recovery) {
        (1, Recovery::Immune) => RECOVERED,
        (s, _) if s > 0 => s - 1,
        (s, _) => s,
    }
}

/// Runs `steps` synchronous epidemic steps on `key`.
///
/// Susceptible nodes draw once per step, and only when at least one
/// neighbour is infectious, in node order.
pub fn epidemic_update(
    graph: &mut AttrGraph,
    view_as: Directedness,
    key: &str,
    params: EpidemicParams,
    steps: usize,
    rng: &mut RngHandle,
) -> Result<(), DiffusionError> {
    if steps == 0 {
        return Ok(());
    }
    let neighbors = neighbor_index(graph.view(view_as));
    let mut state = read_discrete(graph, key)?;
    for _ in 0..steps {
        let mut next = Vec::with_capacity(state.len());
        for (adjacent, &current) in neighbors.iter().zip(&state) {
            let value = if current == 0 {
                let infectious = adjacent.iter().filter(|&&pos| state[pos] >= 1).count();
                let p = infection_probability(params.prob, infectious);
                if infectious > 0 && rng.unit() < p {
                    params.itime
                } else {
                    0
                }
            } else {
                countdown(current, params.recovery)
            };
            next.push(value);
        }
        state = next;
    }
    commit(graph, key, state);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn independent_trials_formula() {
        assert_eq!(infection_probability(0.3, 0), 0.0);
        assert!((infection_probability(0.5, 2) - 0.75).abs() < 1e-12);
        assert_eq!(infection_probability(1.0, 1), 1.0);
    }

    #[test]
    fn countdown_ends_in_the_recovery_compartment() {
        assert_eq!(countdown(3, Recovery::Susceptible), 2);
        assert_eq!(countdown(1, Recovery::Susceptible), 0);
        assert_eq!(countdown(1, Recovery::Immune), RECOVERED);
        assert_eq!(countdown(RECOVERED, Recovery::Immune), RECOVERED);
    }
}

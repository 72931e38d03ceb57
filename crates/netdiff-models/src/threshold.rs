//! Uniform and weighted threshold cascades.

use netdiff_core::errors::DiffusionError;
use netdiff_core::Directedness;
use netdiff_graph::{AttrGraph, WEIGHT_KEY};

use crate::state::{commit, neighbor_index, read_continuous, weighted_neighbor_index};

/// Node attribute holding the weighted-threshold activation level.
pub const WEIGHTED_THRESHOLD_KEY: &str = "thw_th";

/// Values above this are counted as active.
const ACTIVE_LEVEL: f64 = 0.5;

/// One step of the uniform threshold rule for a single node.
///
/// A node without neighbours does not meet a positive threshold and becomes
/// inactive; with a threshold of zero or less it becomes active.
pub fn uniform_next(active: usize, total: usize, threshold: f64) -> i64 {
    if total == 0 {
        return i64::from(threshold <= 0.0);
    }
    i64::from(active as f64 >= threshold * total as f64)
}

/// Runs `steps` synchronous uniform-threshold steps on `key`.
///
/// A node becomes active when at least `threshold` of its neighbours are
/// active and inactive otherwise.
pub fn threshold_uniform_update(
    graph: &mut AttrGraph,
    view_as: Directedness,
    key: &str,
    threshold: f64,
    steps: usize,
) -> Result<(), DiffusionError> {
    if steps == 0 {
        return Ok(());
    }
    let neighbors = neighbor_index(graph.view(view_as));
    let mut state = read_continuous(graph, key)?;
    for _ in 0..steps {
        state = neighbors
            .iter()
            .map(|adjacent| {
                let active = adjacent
                    .iter()
                    .filter(|&&pos| state[pos] > ACTIVE_LEVEL)
                    .count();
                uniform_next(active, adjacent.len(), threshold) as f64
            })
            .collect();
    }
    commit(graph, key, state.into_iter().map(|v| v as i64).collect::<Vec<_>>());
    Ok(())
}

/// Runs `steps` synchronous weighted-threshold steps on `key`.
///
/// A node becomes active when the summed weight of the edges to its active
/// neighbours exceeds its own `thw_th`.
pub fn threshold_weighted_update(
    graph: &mut AttrGraph,
    view_as: Directedness,
    key: &str,
    steps: usize,
) -> Result<(), DiffusionError> {
    if steps == 0 {
        return Ok(());
    }
    let neighbors = weighted_neighbor_index(graph.view(view_as), WEIGHT_KEY)?;
    let thresholds = read_continuous(graph, WEIGHTED_THRESHOLD_KEY)?;
    let mut state = read_continuous(graph, key)?;
    for _ in 0..steps {
        state = neighbors
            .iter()
            .zip(&thresholds)
            .map(|(adjacent, threshold)| {
                let support: f64 = adjacent
                    .iter()
                    .filter(|(pos, _)| state[*pos] > ACTIVE_LEVEL)
                    .map(|(_, weight)| weight)
                    .sum();
                if support > *threshold {
                    1.0
                } else {
                    0.0
                }
            })
            .collect();
    }
    commit(graph, key, state.into_iter().map(|v| v as i64).collect::<Vec<_>>());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn isolated_nodes_only_activate_without_a_threshold() {
        assert_eq!(uniform_next(0, 0, 0.5), 0);
        assert_eq!(uniform_next(0, 0, 0.0), 1);
        assert_eq!(uniform_next(0, 0, -0.2), 1);
    }

    #[test]
    fn threshold_is_inclusive() {
        assert_eq!(uniform_next(2, 4, 0.5), 1);
        assert_eq!(uniform_next(1, 4, 0.5), 0);
        assert_eq!(uniform_next(0, 3, 0.0), 1);
    }
}

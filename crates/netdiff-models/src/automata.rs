//! Tri-state threshold automata.

use netdiff_core::errors::DiffusionError;
use netdiff_core::Directedness;
use netdiff_graph::AttrGraph;

use crate::state::{commit, neighbor_index, read_discrete};

/// Neighbour tally of a single node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Support {
    /// Neighbours in state `1`.
    pub positive: usize,
    /// Neighbours in state `-1`.
    pub negative: usize,
    /// All neighbours.
    pub total: usize,
}

impl Support {
    /// Counts the states of the given neighbours.
    pub fn tally(states: impl IntoIterator<Item = i64>) -> Self {
        let mut support = Support::default();
        for state in states {
            support.total += 1;
            match state {
                1 => support.positive += 1,
                -1 => support.negative += 1,
                _ => {}
            }
        }
        support
    }

    fn all_positive(&self) -> bool {
        self.total > 0 && self.positive == self.total
    }

    fn all_negative(&self) -> bool {
        self.total > 0 && self.negative == self.total
    }

    fn weak_positive(&self) -> bool {
        self.positive > 0 && self.negative == 0
    }

    fn weak_negative(&self) -> bool {
        self.negative > 0 && self.positive == 0
    }
}

/// Transition table of the automaton.
///
/// | state | all negative | weak negative | all positive | weak positive |
/// |-------|--------------|---------------|--------------|---------------|
/// | `1`   | `-1`         | `0`           | `1`          | `1`           |
/// | `-1`  | `-1`         | `-1`          | `1`          | `0`           |
/// | `0`   | `-1`         | `0`           | `1`          | `0`           |
///
/// Any other state is left as is.
pub fn automata_next(state: i64, support: Support) -> i64 {
    match state {
        1 if support.all_negative() => -1,
        1 if support.weak_negative() => 0,
        -1 if support.all_positive() => 1,
        -1 if support.weak_positive() => 0,
        0 if support.all_positive() => 1,
        0 if support.all_negative() => -1,
        other => other,
    }
}

/// Runs `steps` synchronous automaton steps on `key`.
pub fn threshold_automata_update(
    graph: &mut AttrGraph,
    view_as: Directedness,
    key: &str,
    steps: usize,
) -> Result<(), DiffusionError> {
    if steps == 0 {
        return Ok(());
    }
    let neighbors = neighbor_index(graph.view(view_as));
    let mut state = read_discrete(graph, key)?;
    for _ in 0..steps {
        state = neighbors
            .iter()
            .zip(&state)
            .map(|(adjacent, current)| {
                let support = Support::tally(adjacent.iter().map(|&pos| state[pos]));
                automata_next(*current, support)
            })
            .collect();
    }
    commit(graph, key, state);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unanimous_opposition_flips_the_state() {
        assert_eq!(automata_next(1, Support::tally([-1, -1])), -1);
        assert_eq!(automata_next(-1, Support::tally([1])), 1);
    }

    #[test]
    fn unopposed_minority_moves_to_neutral() {
        assert_eq!(automata_next(1, Support::tally([-1, 0])), 0);
        assert_eq!(automata_next(-1, Support::tally([1, 0, 0])), 0);
        assert_eq!(automata_next(0, Support::tally([1, 0])), 0);
    }

    #[test]
    fn mixed_or_missing_support_keeps_the_state() {
        assert_eq!(automata_next(1, Support::tally([1, -1])), 1);
        assert_eq!(automata_next(0, Support::tally([])), 0);
        assert_eq!(automata_next(-1, Support::tally([])), -1);
    }
}

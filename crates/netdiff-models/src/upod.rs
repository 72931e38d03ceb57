//! Majority and unanimity consensus over `states` discrete opinions.

use netdiff_core::errors::{DiffusionError, ErrorInfo};
use netdiff_core::Directedness;
use netdiff_graph::AttrGraph;

use crate::state::{commit, neighbor_index, read_discrete};

/// Adoption rule of a UPOD model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Consensus {
    /// Adopt the strict plurality state.
    Majority,
    /// Adopt a state only when every neighbour holds it.
    Unanimity,
}

impl Consensus {
    /// Picks the state to adopt from per-state neighbour counts.
    pub fn adopt(&self, counts: &[usize]) -> Option<usize> {
        match self {
            Consensus::Majority => {
                let mut best: Option<(usize, usize)> = None;
                let mut runner_up = 0;
                for (state, &count) in counts.iter().enumerate() {
                    match best {
                        Some((_, top)) if count > top => {
                            runner_up = top;
                            best = Some((state, count));
                        }
                        Some(_) => runner_up = runner_up.max(count),
                        None => best = Some((state, count)),
                    }
                }
                best.filter(|&(_, top)| top > runner_up)
                    .map(|(state, _)| state)
            }
            Consensus::Unanimity => {
                let total: usize = counts.iter().sum();
                if total == 0 {
                    return None;
                }
                counts.iter().position(|&count| count == total)
            }
        }
    }
}

/// Tallies neighbour states into `states` buckets.
pub fn tally(
    neighbor_states: impl IntoIterator<Item = i64>,
    states: usize,
) -> Result<Vec<usize>, i64> {
    let mut counts = vec![0; states];
    for state in neighbor_states {
        let bucket = usize::try_from(state)
            .ok()
            .filter(|&bucket| bucket < states)
            .ok_or(state)?;
        counts[bucket] += 1;
    }
    Ok(counts)
}

/// Runs `steps` synchronous consensus steps on `key`.
pub fn upod_update(
    graph: &mut AttrGraph,
    view_as: Directedness,
    key: &str,
    consensus: Consensus,
    states: usize,
    steps: usize,
) -> Result<(), DiffusionError> {
    if states < 2 {
        return Err(DiffusionError::Config(
            ErrorInfo::new("invalid-argument", "consensus models need at least two states")
                .with_context("states", states),
        ));
    }
    if steps == 0 {
        return Ok(());
    }
    let neighbors = neighbor_index(graph.view(view_as));
    let mut state = read_discrete(graph, key)?;
    for _ in 0..steps {
        let mut next = Vec::with_capacity(state.len());
        for (node, (adjacent, &current)) in neighbors.iter().zip(&state).enumerate() {
            let counts = tally(adjacent.iter().map(|&pos| state[pos]), states).map_err(|found| {
                let id = graph
                    .nodes()
                    .nth(node)
                    .map(ToString::to_string)
                    .unwrap_or_default();
                DiffusionError::Model(
                    ErrorInfo::new("state-out-of-range", "neighbour state outside [0, states)")
                        .with_context("node", id)
                        .with_context("state", found)
                        .with_context("states", states),
                )
            })?;
            let adopted = consensus
                .adopt(&counts)
                .and_then(|bucket| i64::try_from(bucket).ok());
            next.push(adopted.unwrap_or(current));
        }
        state = next;
    }
    commit(graph, key, state);
    Ok(())
}

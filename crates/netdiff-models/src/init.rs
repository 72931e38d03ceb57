//! Random and selected-node initialization.

use std::collections::BTreeSet;

use netdiff_core::errors::{DiffusionError, ErrorInfo};
use netdiff_core::{AttrValue, NodeId, RngHandle};
use netdiff_graph::AttrGraph;
use tracing::warn;

use crate::distributions::StateDistribution;

/// Assigns fresh draws from `distribution` to `key`.
///
/// With `coverage = None` every node is drawn; otherwise each node is
/// included independently with probability `coverage` and the others keep
/// their value. Returns the number of nodes that were assigned.
pub fn random_init(
    graph: &mut AttrGraph,
    key: &str,
    distribution: &StateDistribution,
    coverage: Option<f64>,
    rng: &mut RngHandle,
) -> usize {
    let mut assigned = 0;
    for (_, attrs) in graph.nodes_with_attrs_mut() {
        if let Some(p) = coverage {
            if rng.unit() >= p {
                continue;
            }
        }
        attrs.insert(key.to_string(), distribution.sample(rng));
        assigned += 1;
    }
    assigned
}

/// Writes the literal `value` under `key` on the `selected` nodes.
///
/// Identifiers missing from the graph are logged and skipped. Returns the
/// number of nodes that were assigned.
pub fn selected_init(
    graph: &mut AttrGraph,
    key: &str,
    selected: &BTreeSet<NodeId>,
    value: Option<&AttrValue>,
) -> Result<usize, DiffusionError> {
    let value = value.ok_or_else(|| {
        DiffusionError::Config(
            ErrorInfo::new("missing-init", "init action requires an init value")
                .with_context("key", key),
        )
    })?;
    let mut assigned = 0;
    for id in selected {
        match graph.node_attrs_mut(id) {
            Ok(attrs) => {
                attrs.insert(key.to_string(), value.clone());
                assigned += 1;
            }
            Err(_) => warn!(node = %id, key, "selected node not in graph; skipped"),
        }
    }
    Ok(assigned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distributions::DiscreteState;

    #[test]
    fn zero_coverage_assigns_nothing() {
        let mut graph = AttrGraph::undirected();
        graph.add_edge("a", "b");
        let dist = StateDistribution::Discrete(DiscreteState::integers([1]).unwrap());
        let mut rng = RngHandle::from_seed(2);
        assert_eq!(random_init(&mut graph, "thu", &dist, Some(0.0), &mut rng), 0);
        assert_eq!(random_init(&mut graph, "thu", &dist, None, &mut rng), 2);
        assert_eq!(graph.node_attr(&"b".into(), "thu"), Some(&AttrValue::Int(1)));
    }

    #[test]
    fn missing_init_value_is_a_config_error() {
        let mut graph = AttrGraph::undirected();
        graph.add_node("a");
        let err = selected_init(&mut graph, "deg", &BTreeSet::new(), None).unwrap_err();
        assert!(err.is_config());
        assert_eq!(err.code(), "missing-init");
    }
}

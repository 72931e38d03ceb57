//! Snapshot and commit helpers shared by the update rules.
//!
//! Rules read the model key of every node into a vector ordered like
//! [`AttrGraph::nodes`], iterate their steps on plain vectors and write the
//! result back once. A failing rule therefore never leaves a partially
//! committed step behind.

use netdiff_core::errors::{DiffusionError, ErrorInfo};
use netdiff_core::{AttrValue, NodeId};
use netdiff_graph::{AttrGraph, GraphView};

pub(crate) fn missing_attribute(node: &NodeId, key: &str) -> DiffusionError {
    DiffusionError::Model(
        ErrorInfo::new("missing-attribute", "node is missing a state attribute")
            .with_context("node", node)
            .with_context("key", key)
            .with_hint("normalize the graph before applying rules"),
    )
}

fn attribute_type(node: &NodeId, key: &str, value: &AttrValue, expected: &str) -> DiffusionError {
    DiffusionError::Model(
        ErrorInfo::new("attribute-type", "state attribute has the wrong type")
            .with_context("node", node)
            .with_context("key", key)
            .with_context("found", value.kind())
            .with_context("expected", expected),
    )
}

/// Reads `key` of every node as a real number.
pub(crate) fn read_continuous(graph: &AttrGraph, key: &str) -> Result<Vec<f64>, DiffusionError> {
    graph
        .nodes_with_attrs()
        .map(|(id, attrs)| {
            let value = attrs.get(key).ok_or_else(|| missing_attribute(id, key))?;
            value
                .as_f64()
                .ok_or_else(|| attribute_type(id, key, value, "number"))
        })
        .collect()
}

/// Reads `key` of every node as an integer state.
pub(crate) fn read_discrete(graph: &AttrGraph, key: &str) -> Result<Vec<i64>, DiffusionError> {
    graph
        .nodes_with_attrs()
        .map(|(id, attrs)| {
            let value = attrs.get(key).ok_or_else(|| missing_attribute(id, key))?;
            value
                .as_i64()
                .ok_or_else(|| attribute_type(id, key, value, "integer"))
        })
        .collect()
}

/// Writes one value per node, in node order.
pub(crate) fn commit<V>(graph: &mut AttrGraph, key: &str, values: Vec<V>)
where
    V: Into<AttrValue>,
{
    for ((_, attrs), value) in graph.nodes_with_attrs_mut().zip(values) {
        attrs.insert(key.to_string(), value.into());
    }
}

/// Neighbour positions of every node under `view`.
pub(crate) fn neighbor_index(view: GraphView<'_>) -> Vec<Vec<usize>> {
    let graph = view.graph();
    graph
        .nodes()
        .map(|id| {
            view.neighbors(id)
                .into_iter()
                .filter_map(|neighbor| graph.node_position(neighbor))
                .collect()
        })
        .collect()
}

/// Neighbour positions with the numeric edge attribute `key`.
pub(crate) fn weighted_neighbor_index(
    view: GraphView<'_>,
    key: &str,
) -> Result<Vec<Vec<(usize, f64)>>, DiffusionError> {
    let graph = view.graph();
    graph
        .nodes()
        .map(|id| {
            view.neighbors(id)
                .into_iter()
                .filter_map(|neighbor| graph.node_position(neighbor).map(|pos| (neighbor, pos)))
                .map(|(neighbor, pos)| {
                    let weight = view.weight(id, neighbor, key).ok_or_else(|| {
                        DiffusionError::Model(
                            ErrorInfo::new("missing-attribute", "edge is missing a weight")
                                .with_context("source", id)
                                .with_context("target", neighbor)
                                .with_context("key", key),
                        )
                    })?;
                    Ok((pos, weight))
                })
                .collect()
        })
        .collect()
}

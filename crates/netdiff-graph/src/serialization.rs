use netdiff_core::errors::{DiffusionError, ErrorInfo};
use netdiff_core::{Attrs, Directedness, NodeId};
use serde::{Deserialize, Serialize};

use crate::graph::AttrGraph;

/// Serializes the graph to node-link JSON.
pub fn graph_to_json(graph: &AttrGraph) -> Result<String, DiffusionError> {
    let serializable = SerializableGraph::from_graph(graph);
    serde_json::to_string_pretty(&serializable)
        .map_err(|err| DiffusionError::Serde(ErrorInfo::new("serialize-json", err.to_string())))
}

/// Restores a graph from node-link JSON.
///
/// Edges must reference listed nodes; attribute maps may be omitted and
/// `links` is accepted as an alias for `edges`.
pub fn graph_from_json(json: &str) -> Result<AttrGraph, DiffusionError> {
    let serializable: SerializableGraph = serde_json::from_str(json)
        .map_err(|err| DiffusionError::Serde(ErrorInfo::new("deserialize-json", err.to_string())))?;
    serializable.into_graph()
}

#[derive(Debug, Serialize, Deserialize)]
struct SerializableGraph {
    #[serde(default)]
    directed: bool,
    nodes: Vec<SerializableNode>,
    #[serde(default, alias = "links")]
    edges: Vec<SerializableEdge>,
}

#[derive(Debug, Serialize, Deserialize)]
struct SerializableNode {
    id: NodeId,
    #[serde(default, skip_serializing_if = "Attrs::is_empty")]
    attrs: Attrs,
}

#[derive(Debug, Serialize, Deserialize)]
struct SerializableEdge {
    source: NodeId,
    target: NodeId,
    #[serde(default, skip_serializing_if = "Attrs::is_empty")]
    attrs: Attrs,
}

impl SerializableGraph {
    fn from_graph(graph: &AttrGraph) -> Self {
        Self {
            directed: graph.is_directed(),
            nodes: graph
                .nodes_with_attrs()
                .map(|(id, attrs)| SerializableNode {
                    id: id.clone(),
                    attrs: attrs.clone(),
                })
                .collect(),
            edges: graph
                .edges()
                .map(|(source, target, attrs)| SerializableEdge {
                    source: source.clone(),
                    target: target.clone(),
                    attrs: attrs.clone(),
                })
                .collect(),
        }
    }

    fn into_graph(self) -> Result<AttrGraph, DiffusionError> {
        let directedness = if self.directed {
            Directedness::Directed
        } else {
            Directedness::Undirected
        };
        let mut graph = AttrGraph::new(directedness);
        for node in self.nodes {
            graph.add_node_with(node.id, node.attrs);
        }
        for edge in self.edges {
            for endpoint in [&edge.source, &edge.target] {
                if !graph.contains_node(endpoint) {
                    return Err(DiffusionError::Serde(
                        ErrorInfo::new("unknown-node", "edge references a node that is not listed")
                            .with_context("node", endpoint),
                    ));
                }
            }
            graph.add_edge_with(edge.source, edge.target, edge.attrs);
        }
        Ok(graph)
    }
}

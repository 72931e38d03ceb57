use indexmap::IndexSet;
use netdiff_core::{Attrs, Directedness, NodeId};

use crate::graph::AttrGraph;

/// Borrowed reinterpretation of an [`AttrGraph`] under a model's directedness.
///
/// | stored     | viewed     | neighbours of `u`                      |
/// |------------|------------|----------------------------------------|
/// | directed   | directed   | successors                             |
/// | directed   | undirected | successors, then unseen predecessors   |
/// | undirected | either     | adjacent nodes                         |
#[derive(Debug, Clone, Copy)]
pub struct GraphView<'a> {
    graph: &'a AttrGraph,
    directedness: Directedness,
}

impl<'a> GraphView<'a> {
    pub(crate) fn new(graph: &'a AttrGraph, directedness: Directedness) -> Self {
        Self {
            graph,
            directedness,
        }
    }

    /// Directedness the graph is viewed with.
    pub fn directedness(&self) -> Directedness {
        self.directedness
    }

    /// The underlying graph.
    pub fn graph(&self) -> &'a AttrGraph {
        self.graph
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = &'a NodeId> + 'a {
        self.graph.nodes()
    }

    /// Neighbours of `node` under this view, in first-seen order.
    pub fn neighbors(&self, node: &NodeId) -> Vec<&'a NodeId> {
        let graph = self.graph;
        match (graph.directedness(), self.directedness) {
            (Directedness::Directed, Directedness::Undirected) => {
                let mut seen: IndexSet<&'a NodeId> = graph.successors(node).collect();
                seen.extend(graph.predecessors(node));
                seen.into_iter().collect()
            }
            _ => graph.successors(node).collect(),
        }
    }

    /// Number of neighbours of `node` under this view.
    pub fn degree(&self, node: &NodeId) -> usize {
        self.neighbors(node).len()
    }

    /// Attributes of the edge between `source` and `target` under this view.
    ///
    /// An undirected view of a directed graph falls back to the reverse
    /// orientation when only `target -> source` is stored.
    pub fn edge_attrs(&self, source: &NodeId, target: &NodeId) -> Option<&'a Attrs> {
        let graph = self.graph;
        match (graph.directedness(), self.directedness) {
            (Directedness::Directed, Directedness::Undirected) => graph
                .edge_attrs(source, target)
                .or_else(|| graph.edge_attrs(target, source)),
            _ => graph.edge_attrs(source, target),
        }
    }

    /// Numeric edge attribute `key`, if present and numeric.
    pub fn weight(&self, source: &NodeId, target: &NodeId, key: &str) -> Option<f64> {
        self.edge_attrs(source, target)
            .and_then(|attrs| attrs.get(key))
            .and_then(|value| value.as_f64())
    }

    /// Edges under this view.
    ///
    /// A directed view of an undirected graph yields both orientations; an
    /// undirected view of a directed graph yields each node pair once.
    pub fn edges(&self) -> Vec<(&'a NodeId, &'a NodeId, &'a Attrs)> {
        let graph = self.graph;
        match (graph.directedness(), self.directedness) {
            (Directedness::Undirected, Directedness::Directed) => {
                let mut out = Vec::with_capacity(graph.edge_count() * 2);
                for (source, target, attrs) in graph.edges() {
                    out.push((source, target, attrs));
                    if source != target {
                        out.push((target, source, attrs));
                    }
                }
                out
            }
            (Directedness::Directed, Directedness::Undirected) => {
                let mut pairs: IndexSet<(&NodeId, &NodeId)> = IndexSet::new();
                let mut out = Vec::with_capacity(graph.edge_count());
                for (source, target, attrs) in graph.edges() {
                    let key = if source <= target {
                        (source, target)
                    } else {
                        (target, source)
                    };
                    if pairs.insert(key) {
                        out.push((source, target, attrs));
                    }
                }
                out
            }
            _ => graph.edges().collect(),
        }
    }
}

use indexmap::IndexMap;
use netdiff_core::errors::{DiffusionError, ErrorInfo};
use netdiff_core::{AttrValue, Attrs, Directedness, NodeId};

use crate::view::GraphView;

/// Node attribute holding the canonical 2-D position.
pub const POS_KEY: &str = "pos";
/// Node attribute holding a cached layout coordinate.
pub const LAYOUT_KEY: &str = "layout";
/// Edge attribute holding the influence weight.
pub const WEIGHT_KEY: &str = "weight";

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct EdgeRecord {
    pub(crate) source: NodeId,
    pub(crate) target: NodeId,
    pub(crate) attrs: Attrs,
}

/// Mutable attributed graph, directed or undirected.
///
/// Edges live in a single arena; adjacency maps point into it so that an
/// undirected edge is stored once and seen from both endpoints. For undirected
/// graphs `pred` is left empty and `succ` holds the symmetric neighbourhood.
#[derive(Debug, Clone, PartialEq)]
pub struct AttrGraph {
    directedness: Directedness,
    nodes: IndexMap<NodeId, Attrs>,
    succ: IndexMap<NodeId, IndexMap<NodeId, usize>>,
    pred: IndexMap<NodeId, IndexMap<NodeId, usize>>,
    edges: Vec<EdgeRecord>,
}

impl AttrGraph {
    /// Creates an empty graph.
    pub fn new(directedness: Directedness) -> Self {
        Self {
            directedness,
            nodes: IndexMap::new(),
            succ: IndexMap::new(),
            pred: IndexMap::new(),
            edges: Vec::new(),
        }
    }

    /// Creates an empty directed graph.
    pub fn directed() -> Self {
        Self::new(Directedness::Directed)
    }

    /// Creates an empty undirected graph.
    pub fn undirected() -> Self {
        Self::new(Directedness::Undirected)
    }

    /// Returns whether the stored graph is directed.
    pub fn directedness(&self) -> Directedness {
        self.directedness
    }

    /// Shorthand for `directedness().is_directed()`.
    pub fn is_directed(&self) -> bool {
        self.directedness.is_directed()
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of stored edges (an undirected edge counts once).
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Adds a node without attributes. Returns false if it already existed.
    pub fn add_node(&mut self, id: impl Into<NodeId>) -> bool {
        let id = id.into();
        if self.nodes.contains_key(&id) {
            return false;
        }
        self.succ.insert(id.clone(), IndexMap::new());
        if self.is_directed() {
            self.pred.insert(id.clone(), IndexMap::new());
        }
        self.nodes.insert(id, Attrs::new());
        true
    }

    /// Adds a node, merging `attrs` into any existing attributes.
    pub fn add_node_with(&mut self, id: impl Into<NodeId>, attrs: Attrs) {
        let id = id.into();
        self.add_node(id.clone());
        if let Some(existing) = self.nodes.get_mut(&id) {
            existing.extend(attrs);
        }
    }

    /// Adds an edge without attributes, creating missing endpoints.
    pub fn add_edge(&mut self, source: impl Into<NodeId>, target: impl Into<NodeId>) {
        self.add_edge_with(source, target, Attrs::new());
    }

    /// Adds an edge carrying a `weight` attribute.
    pub fn add_weighted_edge(
        &mut self,
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
        weight: f64,
    ) {
        let mut attrs = Attrs::new();
        attrs.insert(WEIGHT_KEY.to_string(), AttrValue::Float(weight));
        self.add_edge_with(source, target, attrs);
    }

    /// Adds an edge, creating missing endpoints. Adding an existing edge
    /// merges the attributes into the stored ones.
    pub fn add_edge_with(
        &mut self,
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
        attrs: Attrs,
    ) {
        let source = source.into();
        let target = target.into();
        self.add_node(source.clone());
        self.add_node(target.clone());
        if let Some(index) = self.edge_index(&source, &target) {
            self.edges[index].attrs.extend(attrs);
            return;
        }
        let index = self.edges.len();
        self.edges.push(EdgeRecord {
            source: source.clone(),
            target: target.clone(),
            attrs,
        });
        if let Some(out) = self.succ.get_mut(&source) {
            out.insert(target.clone(), index);
        }
        if self.is_directed() {
            if let Some(incoming) = self.pred.get_mut(&target) {
                incoming.insert(source, index);
            }
        } else if let Some(back) = self.succ.get_mut(&target) {
            back.insert(source, index);
        }
    }

    /// Returns true if the node exists.
    pub fn contains_node(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Returns true if the edge exists in the stored orientation
    /// (either orientation for undirected graphs).
    pub fn contains_edge(&self, source: &NodeId, target: &NodeId) -> bool {
        self.edge_index(source, target).is_some()
    }

    /// Iterates node identifiers in insertion order.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = &NodeId> + '_ {
        self.nodes.keys()
    }

    /// Iterates nodes with their attributes in insertion order.
    pub fn nodes_with_attrs(&self) -> impl ExactSizeIterator<Item = (&NodeId, &Attrs)> + '_ {
        self.nodes.iter()
    }

    /// Iterates nodes with mutable attribute maps.
    pub fn nodes_with_attrs_mut(
        &mut self,
    ) -> impl ExactSizeIterator<Item = (&NodeId, &mut Attrs)> + '_ {
        self.nodes.iter_mut()
    }

    /// Position of the node in iteration order.
    pub fn node_position(&self, id: &NodeId) -> Option<usize> {
        self.nodes.get_index_of(id)
    }

    /// Returns the attributes of a node.
    pub fn node_attrs(&self, id: &NodeId) -> Result<&Attrs, DiffusionError> {
        self.nodes.get(id).ok_or_else(|| unknown_node(id))
    }

    /// Returns the mutable attributes of a node.
    pub fn node_attrs_mut(&mut self, id: &NodeId) -> Result<&mut Attrs, DiffusionError> {
        self.nodes.get_mut(id).ok_or_else(|| unknown_node(id))
    }

    /// Returns a single node attribute if both node and key exist.
    pub fn node_attr(&self, id: &NodeId, key: &str) -> Option<&AttrValue> {
        self.nodes.get(id).and_then(|attrs| attrs.get(key))
    }

    /// Sets a single node attribute.
    pub fn set_node_attr(
        &mut self,
        id: &NodeId,
        key: &str,
        value: impl Into<AttrValue>,
    ) -> Result<(), DiffusionError> {
        self.node_attrs_mut(id)?
            .insert(key.to_string(), value.into());
        Ok(())
    }

    /// Iterates edges as `(source, target, attrs)` in insertion order.
    pub fn edges(&self) -> impl ExactSizeIterator<Item = (&NodeId, &NodeId, &Attrs)> + '_ {
        self.edges
            .iter()
            .map(|edge| (&edge.source, &edge.target, &edge.attrs))
    }

    /// Iterates edges with mutable attribute maps.
    pub fn edges_mut(
        &mut self,
    ) -> impl ExactSizeIterator<Item = (&NodeId, &NodeId, &mut Attrs)> + '_ {
        self.edges
            .iter_mut()
            .map(|edge| (&edge.source, &edge.target, &mut edge.attrs))
    }

    /// Returns the attributes of the edge `source -> target`.
    pub fn edge_attrs(&self, source: &NodeId, target: &NodeId) -> Option<&Attrs> {
        self.edge_index(source, target)
            .map(|index| &self.edges[index].attrs)
    }

    /// Returns the mutable attributes of the edge `source -> target`.
    pub fn edge_attrs_mut(&mut self, source: &NodeId, target: &NodeId) -> Option<&mut Attrs> {
        let index = self.edge_index(source, target)?;
        Some(&mut self.edges[index].attrs)
    }

    /// Returns a single edge attribute if both edge and key exist.
    pub fn edge_attr(&self, source: &NodeId, target: &NodeId, key: &str) -> Option<&AttrValue> {
        self.edge_attrs(source, target)
            .and_then(|attrs| attrs.get(key))
    }

    /// Sets a single edge attribute on an existing edge.
    pub fn set_edge_attr(
        &mut self,
        source: &NodeId,
        target: &NodeId,
        key: &str,
        value: impl Into<AttrValue>,
    ) -> Result<(), DiffusionError> {
        let attrs = self.edge_attrs_mut(source, target).ok_or_else(|| {
            DiffusionError::Graph(
                ErrorInfo::new("unknown-edge", "edge does not exist")
                    .with_context("source", source)
                    .with_context("target", target),
            )
        })?;
        attrs.insert(key.to_string(), value.into());
        Ok(())
    }

    /// Nodes reachable over one outgoing edge (all neighbours when undirected).
    pub fn successors<'a>(&'a self, id: &NodeId) -> impl Iterator<Item = &'a NodeId> + 'a {
        self.succ.get(id).into_iter().flat_map(|out| out.keys())
    }

    /// Nodes with an edge into `id` (all neighbours when undirected).
    pub fn predecessors<'a>(&'a self, id: &NodeId) -> impl Iterator<Item = &'a NodeId> + 'a {
        let map = if self.is_directed() {
            self.pred.get(id)
        } else {
            self.succ.get(id)
        };
        map.into_iter().flat_map(|incoming| incoming.keys())
    }

    /// Reinterprets the graph with the given directedness without copying.
    pub fn view(&self, directedness: Directedness) -> GraphView<'_> {
        GraphView::new(self, directedness)
    }

    /// Returns a directed copy. Each undirected edge becomes two directed
    /// edges carrying the same attributes; directed graphs are cloned.
    pub fn to_directed(&self) -> AttrGraph {
        if self.is_directed() {
            return self.clone();
        }
        let mut directed = AttrGraph::directed();
        for (id, attrs) in &self.nodes {
            directed.add_node_with(id.clone(), attrs.clone());
        }
        for edge in &self.edges {
            directed.add_edge_with(edge.source.clone(), edge.target.clone(), edge.attrs.clone());
            if edge.source != edge.target {
                directed.add_edge_with(
                    edge.target.clone(),
                    edge.source.clone(),
                    edge.attrs.clone(),
                );
            }
        }
        directed
    }

    pub(crate) fn edge_index(&self, source: &NodeId, target: &NodeId) -> Option<usize> {
        self.succ
            .get(source)
            .and_then(|out| out.get(target))
            .copied()
    }
}

impl Default for AttrGraph {
    fn default() -> Self {
        Self::undirected()
    }
}

fn unknown_node(id: &NodeId) -> DiffusionError {
    DiffusionError::Graph(
        ErrorInfo::new("unknown-node", "node does not exist").with_context("node", id),
    )
}

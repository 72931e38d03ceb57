#![deny(missing_docs)]

//! Attributed graph state store for the netdiff diffusion engine.
//!
//! [`AttrGraph`] owns nodes and edges together with their attribute maps and
//! preserves insertion order, which fixes the row/column order of adjacency
//! matrices and the iteration order of every update rule. Models read the
//! graph through a [`GraphView`], which reinterprets a directed graph as
//! undirected (or the reverse) without copying node or edge data.

mod graph;
mod hash;
mod layout;
mod serialization;
mod view;

pub use graph::{AttrGraph, LAYOUT_KEY, POS_KEY, WEIGHT_KEY};
pub use hash::canonical_hash;
pub use layout::{
    compute_layout, rescale_layout, spring_layout, update_layout, LayoutAlgorithm,
    SPRING_ITERATIONS,
};
pub use serialization::{graph_from_json, graph_to_json};
pub use view::GraphView;

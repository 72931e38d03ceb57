//! DeGroot averaging and stochastic edge-weight normalization.

use indexmap::IndexMap;
use nalgebra::{DMatrix, DVector};
use netdiff_core::errors::DiffusionError;
use netdiff_core::{AttrValue, Attrs, Directedness, NodeId};
use netdiff_graph::{AttrGraph, GraphView, WEIGHT_KEY};

use crate::state::{commit, read_continuous};

/// Weighted adjacency matrix of `view`: `M[u][v] = w(u -> v)`, rows and
/// columns in node order. Edges without a numeric weight count as `1`.
pub fn adjacency_matrix(view: GraphView<'_>) -> DMatrix<f64> {
    let graph = view.graph();
    let n = graph.node_count();
    let mut matrix = DMatrix::<f64>::zeros(n, n);
    for (source, target, attrs) in view.edges() {
        let (Some(i), Some(j)) = (graph.node_position(source), graph.node_position(target)) else {
            continue;
        };
        let weight = attrs
            .get(WEIGHT_KEY)
            .and_then(AttrValue::as_f64)
            .unwrap_or(1.0);
        matrix[(i, j)] = weight;
        if !view.directedness().is_directed() {
            matrix[(j, i)] = weight;
        }
    }
    matrix
}

/// Raises a square matrix to a non-negative integer power by repeated squaring.
pub fn matrix_power(matrix: &DMatrix<f64>, exponent: usize) -> DMatrix<f64> {
    let n = matrix.nrows();
    let mut result = DMatrix::<f64>::identity(n, n);
    let mut base = matrix.clone();
    let mut remaining = exponent;
    while remaining > 0 {
        if remaining & 1 == 1 {
            result = &result * &base;
        }
        remaining >>= 1;
        if remaining > 0 {
            base = &base * &base;
        }
    }
    result
}

/// Applies `steps` DeGroot updates at once: `s' = M^steps · s`.
///
/// The matrix is used as stored; callers wanting row-stochastic averaging run
/// [`stochastic_normalize`] first.
pub fn degroot_update(
    graph: &mut AttrGraph,
    view_as: Directedness,
    key: &str,
    steps: usize,
    transpose: bool,
    clip: bool,
) -> Result<(), DiffusionError> {
    if steps == 0 {
        return Ok(());
    }
    let state = DVector::from_vec(read_continuous(graph, key)?);
    let mut matrix = adjacency_matrix(graph.view(view_as));
    if transpose {
        matrix = matrix.transpose();
    }
    let next = matrix_power(&matrix, steps) * state;
    let values: Vec<f64> = next
        .iter()
        .map(|value| if clip { value.clamp(0.0, 1.0) } else { *value })
        .collect();
    commit(graph, key, values);
    Ok(())
}

/// Rescales the outgoing weights of every node to sum to one.
///
/// Undirected graphs are first converted to directed ones (each edge becomes
/// two edges with the same weight); in that case the new graph is returned and
/// the input is left untouched. Nodes whose outgoing weights sum to zero keep
/// their weights.
pub fn stochastic_normalize(graph: &mut AttrGraph) -> Option<AttrGraph> {
    if graph.is_directed() {
        normalize_rows(graph);
        None
    } else {
        let mut directed = graph.to_directed();
        normalize_rows(&mut directed);
        Some(directed)
    }
}

fn normalize_rows(graph: &mut AttrGraph) {
    let mut totals: IndexMap<NodeId, f64> = IndexMap::new();
    for (source, _, attrs) in graph.edges() {
        *totals.entry(source.clone()).or_insert(0.0) += edge_weight(attrs);
    }
    for (source, _, attrs) in graph.edges_mut() {
        let total = totals.get(source).copied().unwrap_or(0.0);
        if total > 0.0 {
            let weight = edge_weight(attrs) / total;
            attrs.insert(WEIGHT_KEY.to_string(), AttrValue::Float(weight));
        }
    }
}

fn edge_weight(attrs: &Attrs) -> f64 {
    attrs
        .get(WEIGHT_KEY)
        .and_then(AttrValue::as_f64)
        .unwrap_or(1.0)
}

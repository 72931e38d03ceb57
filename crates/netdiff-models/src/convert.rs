//! Threshold to automata conversion.
//!
//! Every weighted influence edge `src -> dst` of a weighted-threshold graph is
//! replaced by unit-weight gadgets driving a tri-state automaton. With the
//! weight `w` and the threshold `t` of `src` discretized to integers and
//! `L = lcm(w, t)`, one edge yields:
//!
//! * `L / w` fans. Each fan is an `entry` node listening to `dst` and an
//!   `exit` node listening to `entry`.
//! * Two counter nodes per fan. Each counter listens to the fan's `exit` and
//!   `src` listens to both counters.
//! * `L / t` threshold-bound nodes, each listened to by `dst` and fixed at `-1`.
//!
//! Gadget counts must match exactly; the conversion allocates
//! `O(L / w + L / t)` nodes per edge, so fine-grained weight ratios produce
//! large graphs.

use netdiff_core::errors::{DiffusionError, ErrorInfo};
use netdiff_core::{AttrValue, Attrs, Directedness, NodeId};
use netdiff_graph::AttrGraph;
use serde::Serialize;
use tracing::info;

use crate::state::missing_attribute;

/// Fixed-point base used to discretize weights and thresholds.
pub const DISCRETIZATION_BASE: i64 = 1000;

/// State key of the generated automaton.
pub const AUTOMATA_KEY: &str = "tha";

const SNAP_TOLERANCE: f64 = 1e-9;

/// A pair of helper nodes relaying the state of an edge target back to its source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FanGadget {
    /// Helper listening to the original edge target.
    pub entry: NodeId,
    /// Helper listening to `entry`.
    pub exit: NodeId,
    /// Original edge source fed by the fan's counters.
    pub target: NodeId,
}

/// Gadgets generated for one original edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EdgeGadgets {
    /// Original edge source.
    pub source: NodeId,
    /// Original edge target.
    pub target: NodeId,
    /// Discretized edge weight.
    pub weight: i64,
    /// Discretized threshold of `source`.
    pub threshold: i64,
    /// `lcm(weight, threshold)`.
    pub lcm: i64,
    /// `lcm / weight` fans.
    pub fans: Vec<FanGadget>,
    /// `2 * lcm / weight` counter nodes.
    pub counters: Vec<NodeId>,
    /// `lcm / threshold` bound nodes.
    pub bounds: Vec<NodeId>,
}

/// Result of [`convert`]: the new directed graph and the per-edge gadget report.
#[derive(Debug, Clone)]
pub struct Conversion {
    /// Converted graph carrying the automaton state under `tha`.
    pub graph: AttrGraph,
    /// One entry per original directed edge, in edge order.
    pub edges: Vec<EdgeGadgets>,
}

impl Conversion {
    /// Number of nodes added on top of the original ones.
    pub fn generated_nodes(&self) -> usize {
        self.edges
            .iter()
            .map(|edge| edge.fans.len() * 2 + edge.counters.len() + edge.bounds.len())
            .sum()
    }
}

/// Scales by [`DISCRETIZATION_BASE`] and truncates. Products within `1e-9`
/// of an integer snap to it so that values like `0.29` discretize to `290`.
pub fn discretize(value: f64) -> i64 {
    let scaled = value * DISCRETIZATION_BASE as f64;
    let nearest = scaled.round();
    if (scaled - nearest).abs() < SNAP_TOLERANCE {
        nearest as i64
    } else {
        scaled.trunc() as i64
    }
}

/// Greatest common divisor of two positive integers.
pub fn gcd(mut a: i64, mut b: i64) -> i64 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a.abs()
}

/// Least common multiple of two positive integers, `None` on overflow.
pub fn lcm(a: i64, b: i64) -> Option<i64> {
    (a / gcd(a, b)).checked_mul(b)
}

struct PlannedEdge {
    source: NodeId,
    target: NodeId,
    weight: i64,
    threshold: i64,
    lcm: i64,
}

/// Converts a weighted-threshold graph into a unit-weight automaton graph.
///
/// Reads edge weights from `weight_key`, the threshold of each edge source
/// from `threshold_key` and the current activation from `value_key`. The
/// input graph is not modified. Original nodes keep their attributes and
/// start at `1` when their value exceeds `0.5` and at `-1` otherwise.
pub fn convert(
    graph: &AttrGraph,
    threshold_key: &str,
    weight_key: &str,
    value_key: &str,
) -> Result<Conversion, DiffusionError> {
    let view = graph.view(Directedness::Directed);
    let mut plan = Vec::new();
    for (source, target, attrs) in view.edges() {
        let raw_weight = attrs
            .get(weight_key)
            .and_then(AttrValue::as_f64)
            .ok_or_else(|| {
                missing_attribute(source, weight_key).with_context("target", target)
            })?;
        let raw_threshold = graph
            .node_attr(source, threshold_key)
            .and_then(AttrValue::as_f64)
            .ok_or_else(|| missing_attribute(source, threshold_key))?;
        let weight = discretize(raw_weight);
        if weight <= 0 {
            return Err(DiffusionError::Conversion(
                ErrorInfo::new("zero-weight", "edge weight discretizes to zero or less")
                    .with_context("source", source)
                    .with_context("target", target)
                    .with_context("weight", raw_weight)
                    .with_hint("weights must be at least 1/1000"),
            ));
        }
        let threshold = discretize(raw_threshold);
        if threshold <= 0 {
            return Err(DiffusionError::Conversion(
                ErrorInfo::new("zero-threshold", "threshold discretizes to zero or less")
                    .with_context("node", source)
                    .with_context("threshold", raw_threshold)
                    .with_hint("thresholds must be at least 1/1000"),
            ));
        }
        let Some(multiple) = lcm(weight, threshold) else {
            return Err(DiffusionError::Conversion(
                ErrorInfo::new("gadget-overflow", "gadget count overflows a 64-bit integer")
                    .with_context("source", source)
                    .with_context("target", target)
                    .with_context("weight", weight)
                    .with_context("threshold", threshold)
                    .with_hint("use coarser weights and thresholds"),
            ));
        };
        plan.push(PlannedEdge {
            source: source.clone(),
            target: target.clone(),
            weight,
            threshold,
            lcm: multiple,
        });
    }

    let mut converted = AttrGraph::directed();
    for (id, attrs) in graph.nodes_with_attrs() {
        let value = attrs
            .get(value_key)
            .and_then(AttrValue::as_f64)
            .ok_or_else(|| missing_attribute(id, value_key))?;
        let mut attrs = attrs.clone();
        attrs.insert(
            AUTOMATA_KEY.to_string(),
            AttrValue::Int(if value > 0.5 { 1 } else { -1 }),
        );
        converted.add_node_with(id.clone(), attrs);
    }

    let mut edges = Vec::with_capacity(plan.len());
    for edge in plan {
        edges.push(build_gadgets(&mut converted, edge));
    }

    let report = Conversion {
        graph: converted,
        edges,
    };
    info!(
        edges = report.edges.len(),
        generated_nodes = report.generated_nodes(),
        nodes = report.graph.node_count(),
        links = report.graph.edge_count(),
        "threshold graph converted to automata"
    );
    Ok(report)
}

fn build_gadgets(graph: &mut AttrGraph, edge: PlannedEdge) -> EdgeGadgets {
    let multiple = edge.lcm;
    let fan_count = multiple / edge.weight;
    let bound_count = multiple / edge.threshold;
    let stem = format!("{}>{}", edge.source, edge.target);

    let mut fans = Vec::new();
    let mut counters = Vec::new();
    for index in 0..fan_count {
        let entry = add_helper(graph, format!("{stem}:fan{index}:entry"), 0);
        let exit = add_helper(graph, format!("{stem}:fan{index}:exit"), 0);
        link(graph, &entry, &edge.target);
        link(graph, &exit, &entry);
        for side in 0..2 {
            let counter = add_helper(graph, format!("{stem}:fan{index}:count{side}"), 0);
            link(graph, &counter, &exit);
            link(graph, &edge.source, &counter);
            counters.push(counter);
        }
        fans.push(FanGadget {
            entry,
            exit,
            target: edge.source.clone(),
        });
    }

    let mut bounds = Vec::new();
    for index in 0..bound_count {
        let bound = add_helper(graph, format!("{stem}:bound{index}"), -1);
        link(graph, &edge.target, &bound);
        bounds.push(bound);
    }

    EdgeGadgets {
        source: edge.source,
        target: edge.target,
        weight: edge.weight,
        threshold: edge.threshold,
        lcm: multiple,
        fans,
        counters,
        bounds,
    }
}

fn add_helper(graph: &mut AttrGraph, base: String, state: i64) -> NodeId {
    let mut id = NodeId::new(base);
    while graph.contains_node(&id) {
        id = NodeId::new(format!("{id}'"));
    }
    let mut attrs = Attrs::new();
    attrs.insert(AUTOMATA_KEY.to_string(), AttrValue::Int(state));
    graph.add_node_with(id.clone(), attrs);
    id
}

fn link(graph: &mut AttrGraph, source: &NodeId, target: &NodeId) {
    graph.add_weighted_edge(source.clone(), target.clone(), 1.0);
}

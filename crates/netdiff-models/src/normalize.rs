use netdiff_core::{AttrValue, Attrs, RngHandle};
use netdiff_graph::{
    spring_layout, AttrGraph, LAYOUT_KEY, POS_KEY, SPRING_ITERATIONS, WEIGHT_KEY,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default value of every recognized model state key.
pub fn state_defaults() -> [(&'static str, AttrValue); 10] {
    [
        ("thu", AttrValue::Int(0)),
        ("thu_th", AttrValue::Float(0.5)),
        ("thw", AttrValue::Int(0)),
        ("thw_th", AttrValue::Float(0.5)),
        ("tha", AttrValue::Int(0)),
        ("deg", AttrValue::Float(0.0)),
        ("sis", AttrValue::Int(0)),
        ("sir", AttrValue::Int(0)),
        ("upodmaj", AttrValue::Int(0)),
        ("upoduna", AttrValue::Int(0)),
    ]
}

/// Knobs of the fallback layout used for nodes without coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeOptions {
    /// Seed of the spring layout.
    pub layout_seed: u64,
    /// Spring layout iterations.
    pub spring_iterations: usize,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            layout_seed: 0,
            spring_iterations: SPRING_ITERATIONS,
        }
    }
}

/// What [`normalize_with`] filled in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NormalizeReport {
    /// Nodes that received a `pos` coordinate.
    pub positioned: usize,
    /// Node attributes set to their default.
    pub defaulted: usize,
    /// Edges that received `weight = 1`.
    pub weighted: usize,
}

impl NormalizeReport {
    /// True when nothing had to be filled in.
    pub fn is_noop(&self) -> bool {
        self.positioned == 0 && self.defaulted == 0 && self.weighted == 0
    }
}

/// [`normalize_with`] using default options.
pub fn normalize(graph: &mut AttrGraph) -> NormalizeReport {
    normalize_with(graph, &NormalizeOptions::default())
}

/// Fills in every attribute the update rules rely on.
///
/// Nodes without `pos` or `layout` get a `pos` from a single spring layout,
/// computed only if at least one node needs it. Missing state keys get their
/// defaults and edges without a weight get `1`. Running it twice is a no-op.
pub fn normalize_with(graph: &mut AttrGraph, options: &NormalizeOptions) -> NormalizeReport {
    let mut report = NormalizeReport::default();

    let needs_layout = graph
        .nodes_with_attrs()
        .any(|(_, attrs)| !has_position(attrs));
    if needs_layout {
        let mut rng = RngHandle::from_seed(options.layout_seed);
        let layout = spring_layout(graph, &mut rng, options.spring_iterations);
        for (id, attrs) in graph.nodes_with_attrs_mut() {
            if has_position(attrs) {
                continue;
            }
            if let Some(point) = layout.get(id) {
                attrs.insert(POS_KEY.to_string(), AttrValue::Point(*point));
                report.positioned += 1;
            }
        }
    }

    let defaults = state_defaults();
    for (_, attrs) in graph.nodes_with_attrs_mut() {
        for (key, value) in &defaults {
            if !attrs.contains_key(*key) {
                attrs.insert((*key).to_string(), value.clone());
                report.defaulted += 1;
            }
        }
    }

    for (_, _, attrs) in graph.edges_mut() {
        if !attrs.contains_key(WEIGHT_KEY) {
            attrs.insert(WEIGHT_KEY.to_string(), AttrValue::Float(1.0));
            report.weighted += 1;
        }
    }

    if !report.is_noop() {
        debug!(
            positioned = report.positioned,
            defaulted = report.defaulted,
            weighted = report.weighted,
            "graph normalized"
        );
    }
    report
}

fn has_position(attrs: &Attrs) -> bool {
    [POS_KEY, LAYOUT_KEY]
        .iter()
        .any(|key| matches!(attrs.get(*key), Some(AttrValue::Point(_))))
}

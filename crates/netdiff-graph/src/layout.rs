use std::f64::consts::TAU;
use std::str::FromStr;

use indexmap::IndexMap;
use netdiff_core::errors::{DiffusionError, ErrorInfo};
use netdiff_core::{AttrValue, Directedness, NodeId, RngHandle};
use tracing::debug;

use crate::graph::{AttrGraph, LAYOUT_KEY, WEIGHT_KEY};

/// Iteration count of the force-directed layout.
pub const SPRING_ITERATIONS: usize = 50;

const SPIRAL_RESOLUTION: f64 = 0.35;
const MIN_DISTANCE: f64 = 0.01;

/// Named node placement strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutAlgorithm {
    /// Keep stored coordinates; computes nothing.
    Default,
    /// Nodes evenly spaced on the unit circle.
    Circular,
    /// Uniform random coordinates in the unit square.
    Random,
    /// Fruchterman-Reingold force-directed placement.
    Spring,
    /// Archimedean spiral.
    Spiral,
}

impl LayoutAlgorithm {
    /// Identifier accepted by [`FromStr`].
    pub fn id(&self) -> &'static str {
        match self {
            LayoutAlgorithm::Default => "default",
            LayoutAlgorithm::Circular => "circular_layout",
            LayoutAlgorithm::Random => "random_layout",
            LayoutAlgorithm::Spring => "spring_layout",
            LayoutAlgorithm::Spiral => "spiral_layout",
        }
    }
}

impl FromStr for LayoutAlgorithm {
    type Err = DiffusionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "" | "default" => Ok(LayoutAlgorithm::Default),
            "circular_layout" | "shell_layout" | "bipartite_layout" => {
                Ok(LayoutAlgorithm::Circular)
            }
            "random_layout" => Ok(LayoutAlgorithm::Random),
            "spring_layout" => Ok(LayoutAlgorithm::Spring),
            "spiral_layout" => Ok(LayoutAlgorithm::Spiral),
            other => Err(DiffusionError::Config(
                ErrorInfo::new("unknown-layout", "layout algorithm is not supported")
                    .with_context("layout", other),
            )),
        }
    }
}

/// Computes coordinates for every node. `Default` yields an empty map.
pub fn compute_layout(
    graph: &AttrGraph,
    algorithm: LayoutAlgorithm,
    rng: &mut RngHandle,
) -> IndexMap<NodeId, [f64; 2]> {
    match algorithm {
        LayoutAlgorithm::Default => IndexMap::new(),
        LayoutAlgorithm::Circular => circular_layout(graph),
        LayoutAlgorithm::Random => graph
            .nodes()
            .map(|id| (id.clone(), [rng.unit(), rng.unit()]))
            .collect(),
        LayoutAlgorithm::Spring => spring_layout(graph, rng, SPRING_ITERATIONS),
        LayoutAlgorithm::Spiral => spiral_layout(graph),
    }
}

/// Applies a named layout and caches the coordinates under `layout`.
/// Returns the number of nodes that received a coordinate.
pub fn update_layout(
    graph: &mut AttrGraph,
    name: &str,
    rng: &mut RngHandle,
) -> Result<usize, DiffusionError> {
    let algorithm: LayoutAlgorithm = name.parse()?;
    let positions = compute_layout(graph, algorithm, rng);
    for (id, point) in &positions {
        graph.set_node_attr(id, LAYOUT_KEY, AttrValue::Point(*point))?;
    }
    debug!(layout = algorithm.id(), nodes = positions.len(), "layout updated");
    Ok(positions.len())
}

fn circular_layout(graph: &AttrGraph) -> IndexMap<NodeId, [f64; 2]> {
    let count = graph.node_count();
    if count == 1 {
        return graph.nodes().map(|id| (id.clone(), [0.0, 0.0])).collect();
    }
    graph
        .nodes()
        .enumerate()
        .map(|(idx, id)| {
            let theta = TAU * idx as f64 / count as f64;
            (id.clone(), [theta.cos(), theta.sin()])
        })
        .collect()
}

fn spiral_layout(graph: &AttrGraph) -> IndexMap<NodeId, [f64; 2]> {
    let raw: Vec<[f64; 2]> = (0..graph.node_count())
        .map(|idx| {
            let theta = SPIRAL_RESOLUTION * idx as f64;
            [theta * theta.cos(), theta * theta.sin()]
        })
        .collect();
    graph.nodes().cloned().zip(rescale_layout(raw, 1.0)).collect()
}

/// Force-directed layout (Fruchterman-Reingold) over the undirected view.
///
/// Starts from uniform random positions, runs `iterations` rounds with a
/// linearly cooling step size and rescales the result into `[-1, 1]`.
pub fn spring_layout(
    graph: &AttrGraph,
    rng: &mut RngHandle,
    iterations: usize,
) -> IndexMap<NodeId, [f64; 2]> {
    let ids: Vec<&NodeId> = graph.nodes().collect();
    let count = ids.len();
    if count == 0 {
        return IndexMap::new();
    }
    if count == 1 {
        return ids.into_iter().map(|id| (id.clone(), [0.0, 0.0])).collect();
    }

    let adjacency = spring_neighbors(graph);
    let mut pos: Vec<[f64; 2]> = (0..count).map(|_| [rng.unit(), rng.unit()]).collect();
    let k = (1.0 / count as f64).sqrt();
    let mut temperature = 0.1;
    let cooling = temperature / (iterations as f64 + 1.0);

    for _ in 0..iterations {
        let mut displacement = vec![[0.0f64; 2]; count];
        for i in 0..count {
            for j in 0..count {
                if i == j {
                    continue;
                }
                let dx = pos[i][0] - pos[j][0];
                let dy = pos[i][1] - pos[j][1];
                let distance = (dx * dx + dy * dy).sqrt().max(MIN_DISTANCE);
                let force = k * k / (distance * distance);
                displacement[i][0] += dx * force;
                displacement[i][1] += dy * force;
            }
            for &(j, weight) in &adjacency[i] {
                let dx = pos[i][0] - pos[j][0];
                let dy = pos[i][1] - pos[j][1];
                let distance = (dx * dx + dy * dy).sqrt().max(MIN_DISTANCE);
                let force = weight * distance / k;
                displacement[i][0] -= dx * force;
                displacement[i][1] -= dy * force;
            }
        }
        for (point, delta) in pos.iter_mut().zip(&displacement) {
            let length = (delta[0] * delta[0] + delta[1] * delta[1])
                .sqrt()
                .max(MIN_DISTANCE);
            point[0] += delta[0] * temperature / length;
            point[1] += delta[1] * temperature / length;
        }
        temperature -= cooling;
    }

    ids.into_iter()
        .cloned()
        .zip(rescale_layout(pos, 1.0))
        .collect()
}

/// Weighted neighbour positions of every node under the undirected view.
/// Self-loops are dropped and parallel edges keep a single entry.
fn spring_neighbors(graph: &AttrGraph) -> Vec<Vec<(usize, f64)>> {
    let view = graph.view(Directedness::Undirected);
    graph
        .nodes()
        .enumerate()
        .map(|(i, id)| {
            let mut adjacent: Vec<(usize, f64)> = view
                .neighbors(id)
                .into_iter()
                .filter_map(|neighbor| {
                    let j = graph.node_position(neighbor)?;
                    let weight = view.weight(id, neighbor, WEIGHT_KEY).unwrap_or(1.0);
                    (j != i).then_some((j, weight))
                })
                .collect();
            adjacent.sort_by_key(|&(j, _)| j);
            adjacent.dedup_by_key(|&mut (j, _)| j);
            adjacent
        })
        .collect()
}

/// Centres coordinates on their mean and scales the largest absolute
/// coordinate to `scale`.
pub fn rescale_layout(mut pos: Vec<[f64; 2]>, scale: f64) -> Vec<[f64; 2]> {
    if pos.is_empty() {
        return pos;
    }
    let n = pos.len() as f64;
    let mean_x = pos.iter().map(|p| p[0]).sum::<f64>() / n;
    let mean_y = pos.iter().map(|p| p[1]).sum::<f64>() / n;
    let mut limit = 0.0f64;
    for point in pos.iter_mut() {
        point[0] -= mean_x;
        point[1] -= mean_y;
        limit = limit.max(point[0].abs()).max(point[1].abs());
    }
    if limit > 0.0 {
        for point in pos.iter_mut() {
            point[0] *= scale / limit;
            point[1] *= scale / limit;
        }
    }
    pos
}

use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use netdiff_graph::WEIGHT_KEY;
use netdiff_models::{convert, normalize, WEIGHTED_THRESHOLD_KEY};
use serde::Serialize;

use super::{load_graph, print_json, write_graph};

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Weighted-threshold graph in node-link JSON.
    #[arg(long)]
    pub graph: PathBuf,
    /// Path of the converted automata graph.
    #[arg(long)]
    pub out: PathBuf,
    /// Node attribute holding the current activation.
    #[arg(long, default_value = "thw")]
    pub value_key: String,
}

#[derive(Debug, Serialize)]
struct EdgeCounts {
    source: String,
    target: String,
    weight: i64,
    threshold: i64,
    lcm: i64,
    fans: usize,
    counters: usize,
    bounds: usize,
}

#[derive(Debug, Serialize)]
struct ConvertReport {
    nodes: usize,
    edges: usize,
    generated_nodes: usize,
    gadgets: Vec<EdgeCounts>,
}

pub fn run(args: &ConvertArgs) -> Result<(), Box<dyn Error>> {
    let mut graph = load_graph(&args.graph)?;
    normalize(&mut graph);
    let conversion = convert(&graph, WEIGHTED_THRESHOLD_KEY, WEIGHT_KEY, &args.value_key)?;
    write_graph(&args.out, &conversion.graph)?;

    let gadgets = conversion
        .edges
        .iter()
        .map(|edge| EdgeCounts {
            source: edge.source.to_string(),
            target: edge.target.to_string(),
            weight: edge.weight,
            threshold: edge.threshold,
            lcm: edge.lcm,
            fans: edge.fans.len(),
            counters: edge.counters.len(),
            bounds: edge.bounds.len(),
        })
        .collect();
    print_json(&ConvertReport {
        nodes: conversion.graph.node_count(),
        edges: conversion.graph.edge_count(),
        generated_nodes: conversion.generated_nodes(),
        gadgets,
    })
}

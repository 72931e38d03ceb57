use std::error::Error;
use std::fs;
use std::path::Path;

use netdiff_graph::{graph_from_json, graph_to_json, AttrGraph};
use serde::Serialize;

pub mod apply;
pub mod convert;
pub mod models;
pub mod run;

pub(crate) fn load_graph(path: &Path) -> Result<AttrGraph, Box<dyn Error>> {
    let raw = fs::read_to_string(path)?;
    Ok(graph_from_json(&raw)?)
}

pub(crate) fn write_graph(path: &Path, graph: &AttrGraph) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, graph_to_json(graph)?)?;
    Ok(())
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

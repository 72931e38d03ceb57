use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use netdiff_models::{run_plan, RunPlan};

use super::{load_graph, print_json, write_graph};

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Node-link JSON graph to start from.
    #[arg(long)]
    pub graph: PathBuf,
    /// YAML run plan.
    #[arg(long)]
    pub plan: PathBuf,
    /// Output directory for `graph.json` and `summary.json`.
    #[arg(long)]
    pub out: PathBuf,
}

/// Executes a plan and persists the final graph next to its summary.
pub fn run(args: &RunArgs) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(&args.out)?;
    let plan = RunPlan::load(&args.plan)?;
    let graph = load_graph(&args.graph)?;

    let (graph, summary) = run_plan(&plan, graph)?;

    write_graph(&args.out.join("graph.json"), &graph)?;
    fs::write(
        args.out.join("summary.json"),
        serde_json::to_string_pretty(&summary)?,
    )?;
    // Persist the plan for reproducibility.
    fs::copy(&args.plan, args.out.join("plan.yaml")).ok();

    print_json(&summary)
}

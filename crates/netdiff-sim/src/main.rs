use std::error::Error;

use clap::{Parser, Subcommand};
use commands::{
    apply::{self, ApplyArgs},
    convert::{self, ConvertArgs},
    models,
    run::{self, RunArgs},
};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "netdiff-sim", about = "Network diffusion simulator CLI")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the model registry as JSON.
    Models,
    /// Apply a single action of one model to a graph.
    Apply(ApplyArgs),
    /// Execute a YAML run plan and write the final graph and a summary.
    Run(RunArgs),
    /// Convert a weighted-threshold graph into threshold automata.
    Convert(ConvertArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Models => models::run(),
        Command::Apply(args) => apply::run(&args),
        Command::Run(args) => run::run(&args),
        Command::Convert(args) => convert::run(&args),
    }
}

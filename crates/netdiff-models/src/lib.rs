#![deny(missing_docs)]

//! Diffusion model engine.
//!
//! The [`registry`] holds one immutable [`ModelDescriptor`] per model. An
//! action is applied with [`dispatch`] (or the fallible [`try_dispatch`]),
//! which looks up the model and the action and runs it against an
//! [`AttrGraph`](netdiff_graph::AttrGraph). Every update rule is synchronous:
//! the next state of all nodes is computed from the current one and committed
//! once. Graphs must be normalized with [`normalize`] before any rule runs;
//! [`Session`] does this automatically.

pub mod actions;
mod args;
mod automata;
pub mod convert;
mod degroot;
mod dispatch;
pub mod distributions;
mod epidemic;
mod init;
mod normalize;
mod plan;
pub mod registry;
mod session;
mod state;
mod threshold;
mod upod;

pub use actions::{perform, ActionKind, ActionOutcome};
pub use args::{ActionArgs, DEFAULT_INFECTION_PROB};
pub use automata::{automata_next, threshold_automata_update, Support};
pub use convert::{
    convert, Conversion, EdgeGadgets, FanGadget, AUTOMATA_KEY, DISCRETIZATION_BASE,
};
pub use degroot::{adjacency_matrix, degroot_update, matrix_power, stochastic_normalize};
pub use dispatch::{dispatch, try_dispatch, DispatchReport};
pub use distributions::{ContinuesState, DiscreteState, StateDistribution};
pub use epidemic::{epidemic_update, infection_probability, EpidemicParams, Recovery, RECOVERED};
pub use init::{random_init, selected_init};
pub use normalize::{
    normalize, normalize_with, state_defaults, NormalizeOptions, NormalizeReport,
};
pub use plan::{run_plan, PlanStep, RunPlan, RunSummary, StepRecord, StepStatus};
pub use registry::{
    descriptor, lookup, models, DefaultState, ModelDescriptor, ModelId, ModelSummary,
};
pub use session::{Session, LAYOUT_STREAM, NORMALIZE_STREAM, RULE_STREAM};
pub use threshold::{
    threshold_uniform_update, threshold_weighted_update, uniform_next, WEIGHTED_THRESHOLD_KEY,
};
pub use upod::{tally, upod_update, Consensus};

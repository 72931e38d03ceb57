//! Action table shared by all models.

use std::fmt;
use std::str::FromStr;

use netdiff_core::errors::{DiffusionError, ErrorInfo};
use netdiff_core::RngHandle;
use netdiff_graph::{AttrGraph, WEIGHT_KEY};
use serde::{Deserialize, Serialize};

use crate::args::ActionArgs;
use crate::convert::convert;
use crate::degroot::stochastic_normalize;
use crate::init::{random_init, selected_init};
use crate::registry::ModelDescriptor;
use crate::threshold::WEIGHTED_THRESHOLD_KEY;

/// Named operations a model may expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Draw a fresh state for every (or a random subset of) node.
    Random,
    /// Run the model's update rule for `steps` steps.
    Step,
    /// Row-normalize outgoing edge weights.
    Stochastic,
    /// Write a literal value on selected nodes.
    Init,
    /// Replace the graph by its threshold automata encoding.
    Convert,
}

impl ActionKind {
    /// Every action.
    pub const ALL: [ActionKind; 5] = [
        ActionKind::Random,
        ActionKind::Step,
        ActionKind::Stochastic,
        ActionKind::Init,
        ActionKind::Convert,
    ];

    /// String identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Random => "random",
            ActionKind::Step => "step",
            ActionKind::Stochastic => "stochastic",
            ActionKind::Init => "init",
            ActionKind::Convert => "convert",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionKind {
    type Err = DiffusionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        ActionKind::ALL
            .into_iter()
            .find(|action| action.as_str() == value)
            .ok_or_else(|| unknown_action(value))
    }
}

pub(crate) fn unknown_action(action: &str) -> DiffusionError {
    DiffusionError::Config(
        ErrorInfo::new("unknown-action", "action is not available").with_context("action", action),
    )
}

/// Whether an action mutated the graph in place or produced a new one.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    /// The graph passed in was updated.
    Updated,
    /// The action built a new graph that supersedes the input.
    Replaced(AttrGraph),
}

/// Runs `action` of `model` without checking the model's action table.
pub fn perform(
    action: ActionKind,
    model: &ModelDescriptor,
    graph: &mut AttrGraph,
    args: &ActionArgs,
    rng: &mut RngHandle,
) -> Result<ActionOutcome, DiffusionError> {
    match action {
        ActionKind::Random => {
            let distribution = model.state.resolve(args)?;
            random_init(graph, model.key, &distribution, args.prob, rng);
            Ok(ActionOutcome::Updated)
        }
        ActionKind::Step => {
            model.step(graph, args, rng)?;
            Ok(ActionOutcome::Updated)
        }
        ActionKind::Stochastic => Ok(match stochastic_normalize(graph) {
            Some(directed) => ActionOutcome::Replaced(directed),
            None => ActionOutcome::Updated,
        }),
        ActionKind::Init => {
            selected_init(graph, model.key, &args.selected, args.init.as_ref())?;
            Ok(ActionOutcome::Updated)
        }
        ActionKind::Convert => {
            let conversion = convert(graph, WEIGHTED_THRESHOLD_KEY, WEIGHT_KEY, model.key)?;
            Ok(ActionOutcome::Replaced(conversion.graph))
        }
    }
}

use netdiff_core::errors::DiffusionError;
use netdiff_core::RngHandle;
use netdiff_graph::AttrGraph;
use serde::Serialize;
use tracing::{debug, warn};

use crate::actions::{perform, unknown_action, ActionKind, ActionOutcome};
use crate::args::ActionArgs;
use crate::registry::{lookup, ModelId};

/// What a successful dispatch did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DispatchReport {
    /// Model whose action ran.
    pub model: ModelId,
    /// Action that ran.
    pub action: ActionKind,
    /// Whether the graph was replaced by a new one.
    pub replaced: bool,
}

/// Looks up `model_id` and `action` and applies the action to `graph`.
///
/// When the action produces a new graph it is stored in `graph`, so the slot
/// always holds the authoritative state afterwards. On error nothing is
/// committed.
pub fn try_dispatch(
    model_id: &str,
    action: &str,
    graph: &mut AttrGraph,
    args: &ActionArgs,
    rng: &mut RngHandle,
) -> Result<DispatchReport, DiffusionError> {
    let model = lookup(model_id)?;
    let kind = action
        .parse::<ActionKind>()
        .ok()
        .filter(|kind| model.supports(*kind))
        .ok_or_else(|| unknown_action(action).with_context("model", model.id))?;

    let replaced = match perform(kind, model, graph, args, rng)? {
        ActionOutcome::Updated => false,
        ActionOutcome::Replaced(next) => {
            *graph = next;
            true
        }
    };
    debug!(
        model = %model.id,
        action = %kind,
        steps = args.steps,
        nodes = graph.node_count(),
        replaced,
        "action applied"
    );
    Ok(DispatchReport {
        model: model.id,
        action: kind,
        replaced,
    })
}

/// Applies an action and returns the resulting graph.
///
/// Never fails: unknown models or actions and rule errors are logged and the
/// graph is returned unchanged.
pub fn dispatch(
    model_id: &str,
    action: &str,
    mut graph: AttrGraph,
    args: &ActionArgs,
    rng: &mut RngHandle,
) -> AttrGraph {
    if let Err(err) = try_dispatch(model_id, action, &mut graph, args, rng) {
        warn!(model = model_id, action, error = %err, "action skipped");
    }
    graph
}

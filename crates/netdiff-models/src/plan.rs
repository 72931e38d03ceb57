use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use netdiff_core::errors::{DiffusionError, ErrorInfo};
use netdiff_graph::{canonical_hash, AttrGraph};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::args::ActionArgs;
use crate::session::Session;

/// YAML description of a simulation run.
///
/// ```yaml
/// model: sis
/// seed: 7
/// layout: circular_layout
/// actions:
///   - action: random
///   - action: step
///     args: { steps: 3, prob: 0.4 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunPlan {
    /// Initially active model.
    pub model: String,
    /// Master seed of the session.
    #[serde(default)]
    pub seed: u64,
    /// Layout computed before the first action.
    #[serde(default)]
    pub layout: Option<String>,
    /// Actions in execution order.
    #[serde(default)]
    pub actions: Vec<PlanStep>,
}

/// One entry of [`RunPlan::actions`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlanStep {
    /// Action identifier.
    pub action: String,
    /// Switches the active model before the action runs.
    #[serde(default)]
    pub model: Option<String>,
    /// Action arguments.
    #[serde(default)]
    pub args: ActionArgs,
}

impl RunPlan {
    /// Parses a plan from YAML.
    pub fn from_yaml(text: &str) -> Result<Self, DiffusionError> {
        serde_yaml::from_str(text).map_err(|err| {
            DiffusionError::Serde(ErrorInfo::new("deserialize-yaml", err.to_string()))
        })
    }

    /// Reads and parses a plan file.
    pub fn load(path: &Path) -> Result<Self, DiffusionError> {
        let text = fs::read_to_string(path).map_err(|err| {
            DiffusionError::Serde(
                ErrorInfo::new("read-plan", err.to_string()).with_context("path", path.display()),
            )
        })?;
        Self::from_yaml(&text)
    }
}

/// How a plan step ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    /// The action ran.
    Applied,
    /// The action was a logged no-op.
    Skipped,
}

/// Record of one executed plan step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepRecord {
    /// Position in the plan.
    pub index: usize,
    /// Model active when the step ran.
    pub model: String,
    /// Requested action.
    pub action: String,
    /// Outcome.
    pub status: StepStatus,
    /// Whether the action replaced the graph.
    pub replaced: bool,
    /// Error code of a skipped step.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Summary written next to the final graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Model active at the end of the run.
    pub model: String,
    /// Master seed.
    pub seed: u64,
    /// One record per plan step.
    pub steps: Vec<StepRecord>,
    /// Node count of the final graph.
    pub nodes: usize,
    /// Edge count of the final graph.
    pub edges: usize,
    /// Counts of each value of the final model's state key.
    pub histogram: BTreeMap<String, usize>,
    /// Canonical hash of the final graph.
    pub graph_hash: String,
}

/// Executes `plan` on `graph`.
///
/// Fails only when the initial model is unknown; unknown step models,
/// actions and layouts as well as rule errors are recorded as skipped steps.
pub fn run_plan(
    plan: &RunPlan,
    graph: AttrGraph,
) -> Result<(AttrGraph, RunSummary), DiffusionError> {
    let mut session = Session::new(graph, &plan.model, plan.seed)?;
    if let Some(layout) = &plan.layout {
        session.relayout(layout);
    }

    let mut steps = Vec::with_capacity(plan.actions.len());
    for (index, step) in plan.actions.iter().enumerate() {
        if let Some(model) = &step.model {
            session.switch_model(model);
        }
        let model = session.model().id.as_str().to_string();
        let record = match session.try_apply(&step.action, &step.args) {
            Ok(report) => StepRecord {
                index,
                model,
                action: step.action.clone(),
                status: StepStatus::Applied,
                replaced: report.replaced,
                error: None,
            },
            Err(err) => {
                warn!(index, action = %step.action, error = %err, "plan step skipped");
                StepRecord {
                    index,
                    model,
                    action: step.action.clone(),
                    status: StepStatus::Skipped,
                    replaced: false,
                    error: Some(err.code().to_string()),
                }
            }
        };
        steps.push(record);
    }

    let summary = summarize(&session, steps);
    let applied = summary
        .steps
        .iter()
        .filter(|record| record.status == StepStatus::Applied)
        .count();
    info!(
        model = %summary.model,
        applied,
        skipped = summary.steps.len() - applied,
        hash = %summary.graph_hash,
        "plan finished"
    );
    Ok((session.into_graph(), summary))
}

fn summarize(session: &Session, steps: Vec<StepRecord>) -> RunSummary {
    let graph = session.graph();
    let key = session.model().key;
    let mut histogram = BTreeMap::new();
    for (_, attrs) in graph.nodes_with_attrs() {
        let label = attrs
            .get(key)
            .map_or_else(|| "missing".to_string(), ToString::to_string);
        *histogram.entry(label).or_insert(0) += 1;
    }
    RunSummary {
        model: session.model().id.as_str().to_string(),
        seed: session.seed(),
        steps,
        nodes: graph.node_count(),
        edges: graph.edge_count(),
        histogram,
        graph_hash: canonical_hash(graph),
    }
}

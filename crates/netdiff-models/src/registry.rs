//! Static catalogue of diffusion models.

use std::fmt;
use std::str::FromStr;

use netdiff_core::errors::{DiffusionError, ErrorInfo};
use netdiff_core::{Directedness, RngHandle};
use netdiff_graph::AttrGraph;
use serde::{Deserialize, Serialize};

use crate::actions::ActionKind;
use crate::args::ActionArgs;
use crate::automata::threshold_automata_update;
use crate::degroot::degroot_update;
use crate::distributions::{ContinuesState, DiscreteState, StateDistribution};
use crate::epidemic::{epidemic_update, EpidemicParams, Recovery};
use crate::threshold::{threshold_uniform_update, threshold_weighted_update};
use crate::upod::{upod_update, Consensus};

/// Identifier of a registered model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ModelId {
    /// DeGroot averaging.
    #[serde(rename = "degroot")]
    DeGroot,
    /// Fraction-of-neighbours threshold cascade.
    #[serde(rename = "threshold_uniform")]
    ThresholdUniform,
    /// Weighted threshold cascade.
    #[serde(rename = "threshold_weighted")]
    ThresholdWeighted,
    /// Tri-state threshold automata.
    #[serde(rename = "threshold_automata")]
    ThresholdAutomata,
    /// Susceptible-infectious-susceptible.
    #[serde(rename = "sis")]
    Sis,
    /// Susceptible-infectious-recovered.
    #[serde(rename = "sir")]
    Sir,
    /// UPOD majority consensus.
    #[serde(rename = "upodmaj")]
    UpodMajority,
    /// UPOD unanimity consensus.
    #[serde(rename = "upoduna")]
    UpodUnanimity,
    /// Passive display model without actions.
    #[serde(rename = "view")]
    View,
}

impl ModelId {
    /// Every model, in registry order.
    pub const ALL: [ModelId; 9] = [
        ModelId::DeGroot,
        ModelId::ThresholdUniform,
        ModelId::ThresholdWeighted,
        ModelId::ThresholdAutomata,
        ModelId::Sis,
        ModelId::Sir,
        ModelId::UpodMajority,
        ModelId::UpodUnanimity,
        ModelId::View,
    ];

    /// String identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelId::DeGroot => "degroot",
            ModelId::ThresholdUniform => "threshold_uniform",
            ModelId::ThresholdWeighted => "threshold_weighted",
            ModelId::ThresholdAutomata => "threshold_automata",
            ModelId::Sis => "sis",
            ModelId::Sir => "sir",
            ModelId::UpodMajority => "upodmaj",
            ModelId::UpodUnanimity => "upoduna",
            ModelId::View => "view",
        }
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelId {
    type Err = DiffusionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        ModelId::ALL
            .into_iter()
            .find(|id| id.as_str() == value)
            .ok_or_else(|| {
                DiffusionError::Config(
                    ErrorInfo::new("unknown-model", "model is not registered")
                        .with_context("model", value),
                )
            })
    }
}

/// Distribution used by the `random` action, resolved against the action
/// arguments at call time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DefaultState {
    /// Uniform real values in `[lo, hi)`.
    Continuous {
        /// Inclusive lower bound.
        lo: f64,
        /// Exclusive upper bound.
        hi: f64,
    },
    /// A fixed set of integer states.
    Discrete(&'static [i64]),
    /// `{0, itime}`: susceptible or freshly infected.
    Countdown,
    /// `0..states`.
    Buckets,
}

impl DefaultState {
    /// Builds the concrete distribution for `args`.
    pub fn resolve(&self, args: &ActionArgs) -> Result<StateDistribution, DiffusionError> {
        match self {
            DefaultState::Continuous { lo, hi } => Ok(StateDistribution::Continuous(
                ContinuesState::new(*lo, *hi),
            )),
            DefaultState::Discrete(values) => Ok(StateDistribution::Discrete(
                DiscreteState::integers(values.iter().copied())?,
            )),
            DefaultState::Countdown => Ok(StateDistribution::Discrete(DiscreteState::integers([
                0, args.itime,
            ])?)),
            DefaultState::Buckets => {
                let states = i64::try_from(args.states).unwrap_or(i64::MAX);
                Ok(StateDistribution::Discrete(DiscreteState::integers(
                    0..states,
                )?))
            }
        }
    }
}

/// Signature shared by every `step` implementation.
pub type UpdateRule = fn(
    &mut AttrGraph,
    &ModelDescriptor,
    &ActionArgs,
    &mut RngHandle,
) -> Result<(), DiffusionError>;

/// Immutable description of a model.
#[derive(Clone, Copy)]
pub struct ModelDescriptor {
    /// Identifier.
    pub id: ModelId,
    /// Display name.
    pub name: &'static str,
    /// Directedness the update rule views the graph with.
    pub directedness: Directedness,
    /// Whether the rule reads edge weights.
    pub weighted: bool,
    /// Node attribute holding the model state.
    pub key: &'static str,
    /// Distribution of the `random` action.
    pub state: DefaultState,
    /// The `step` rule.
    pub update: UpdateRule,
    /// Actions accepted by the model.
    pub actions: &'static [ActionKind],
}

impl fmt::Debug for ModelDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelDescriptor")
            .field("id", &self.id)
            .field("directedness", &self.directedness)
            .field("weighted", &self.weighted)
            .field("key", &self.key)
            .field("actions", &self.actions)
            .finish_non_exhaustive()
    }
}

impl ModelDescriptor {
    /// Whether `action` is in the model's action table.
    pub fn supports(&self, action: ActionKind) -> bool {
        self.actions.contains(&action)
    }

    /// Runs the update rule.
    pub fn step(
        &self,
        graph: &mut AttrGraph,
        args: &ActionArgs,
        rng: &mut RngHandle,
    ) -> Result<(), DiffusionError> {
        (self.update)(graph, self, args, rng)
    }

    /// Serializable summary.
    pub fn summary(&self) -> ModelSummary {
        ModelSummary {
            id: self.id.as_str(),
            name: self.name,
            directedness: self.directedness.flag(),
            weighted: self.weighted,
            key: self.key,
            actions: self.actions.iter().map(ActionKind::as_str).collect(),
        }
    }
}

/// What `netdiff-sim models` prints for one model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelSummary {
    /// Identifier.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// `'d'` or `'u'`.
    #[serde(rename = "type")]
    pub directedness: char,
    /// Whether the rule reads edge weights.
    pub weighted: bool,
    /// State key.
    pub key: &'static str,
    /// Accepted actions.
    pub actions: Vec<&'static str>,
}

const RANDOM_STEP_INIT: &[ActionKind] = &[ActionKind::Random, ActionKind::Step, ActionKind::Init];

static MODELS: [ModelDescriptor; 9] = [
    ModelDescriptor {
        id: ModelId::DeGroot,
        name: "DeGroot",
        directedness: Directedness::Directed,
        weighted: true,
        key: "deg",
        state: DefaultState::Continuous { lo: 0.0, hi: 1.0 },
        update: step_degroot,
        actions: &[
            ActionKind::Random,
            ActionKind::Stochastic,
            ActionKind::Step,
            ActionKind::Init,
        ],
    },
    ModelDescriptor {
        id: ModelId::ThresholdUniform,
        name: "Threshold",
        directedness: Directedness::Undirected,
        weighted: false,
        key: "thu",
        state: DefaultState::Discrete(&[0, 1]),
        update: step_threshold_uniform,
        actions: RANDOM_STEP_INIT,
    },
    ModelDescriptor {
        id: ModelId::ThresholdWeighted,
        name: "Weighted Threshold",
        directedness: Directedness::Directed,
        weighted: true,
        key: "thw",
        state: DefaultState::Discrete(&[0, 1]),
        update: step_threshold_weighted,
        actions: &[
            ActionKind::Random,
            ActionKind::Stochastic,
            ActionKind::Step,
            ActionKind::Init,
            ActionKind::Convert,
        ],
    },
    ModelDescriptor {
        id: ModelId::ThresholdAutomata,
        name: "Threshold Automata",
        directedness: Directedness::Directed,
        weighted: false,
        key: "tha",
        state: DefaultState::Discrete(&[-1, 0, 1]),
        update: step_threshold_automata,
        actions: RANDOM_STEP_INIT,
    },
    ModelDescriptor {
        id: ModelId::Sis,
        name: "SIS",
        directedness: Directedness::Directed,
        weighted: false,
        key: "sis",
        state: DefaultState::Countdown,
        update: step_sis,
        actions: RANDOM_STEP_INIT,
    },
    ModelDescriptor {
        id: ModelId::Sir,
        name: "SIR",
        directedness: Directedness::Directed,
        weighted: false,
        key: "sir",
        state: DefaultState::Countdown,
        update: step_sir,
        actions: RANDOM_STEP_INIT,
    },
    ModelDescriptor {
        id: ModelId::UpodMajority,
        name: "UPOD Majority",
        directedness: Directedness::Undirected,
        weighted: false,
        key: "upodmaj",
        state: DefaultState::Buckets,
        update: step_upod_majority,
        actions: RANDOM_STEP_INIT,
    },
    ModelDescriptor {
        id: ModelId::UpodUnanimity,
        name: "UPOD Unanimity",
        directedness: Directedness::Undirected,
        weighted: false,
        key: "upoduna",
        state: DefaultState::Buckets,
        update: step_upod_unanimity,
        actions: RANDOM_STEP_INIT,
    },
    ModelDescriptor {
        id: ModelId::View,
        name: "View",
        directedness: Directedness::Undirected,
        weighted: false,
        key: "thu",
        state: DefaultState::Discrete(&[0, 1]),
        update: step_view,
        actions: &[],
    },
];

/// All registered models in registry order.
pub fn models() -> &'static [ModelDescriptor] {
    &MODELS
}

/// Descriptor of a known model.
pub fn descriptor(id: ModelId) -> &'static ModelDescriptor {
    &MODELS[id as usize]
}

/// Looks a model up by its string identifier.
pub fn lookup(id: &str) -> Result<&'static ModelDescriptor, DiffusionError> {
    id.parse::<ModelId>().map(descriptor)
}

fn step_degroot(
    graph: &mut AttrGraph,
    model: &ModelDescriptor,
    args: &ActionArgs,
    _rng: &mut RngHandle,
) -> Result<(), DiffusionError> {
    degroot_update(
        graph,
        model.directedness,
        model.key,
        args.steps,
        args.transpose,
        args.clip,
    )
}

fn step_threshold_uniform(
    graph: &mut AttrGraph,
    model: &ModelDescriptor,
    args: &ActionArgs,
    _rng: &mut RngHandle,
) -> Result<(), DiffusionError> {
    threshold_uniform_update(
        graph,
        model.directedness,
        model.key,
        args.threshold,
        args.steps,
    )
}

fn step_threshold_weighted(
    graph: &mut AttrGraph,
    model: &ModelDescriptor,
    args: &ActionArgs,
    _rng: &mut RngHandle,
) -> Result<(), DiffusionError> {
    threshold_weighted_update(graph, model.directedness, model.key, args.steps)
}

fn step_threshold_automata(
    graph: &mut AttrGraph,
    model: &ModelDescriptor,
    args: &ActionArgs,
    _rng: &mut RngHandle,
) -> Result<(), DiffusionError> {
    threshold_automata_update(graph, model.directedness, model.key, args.steps)
}

fn epidemic_params(args: &ActionArgs, recovery: Recovery) -> EpidemicParams {
    EpidemicParams {
        prob: args.infection_prob(),
        itime: args.itime,
        recovery,
    }
}

fn step_sis(
    graph: &mut AttrGraph,
    model: &ModelDescriptor,
    args: &ActionArgs,
    rng: &mut RngHandle,
) -> Result<(), DiffusionError> {
    let params = epidemic_params(args, Recovery::Susceptible);
    epidemic_update(graph, model.directedness, model.key, params, args.steps, rng)
}

fn step_sir(
    graph: &mut AttrGraph,
    model: &ModelDescriptor,
    args: &ActionArgs,
    rng: &mut RngHandle,
) -> Result<(), DiffusionError> {
    let params = epidemic_params(args, Recovery::Immune);
    epidemic_update(graph, model.directedness, model.key, params, args.steps, rng)
}

fn step_upod_majority(
    graph: &mut AttrGraph,
    model: &ModelDescriptor,
    args: &ActionArgs,
    _rng: &mut RngHandle,
) -> Result<(), DiffusionError> {
    upod_update(
        graph,
        model.directedness,
        model.key,
        Consensus::Majority,
        args.states,
        args.steps,
    )
}

fn step_upod_unanimity(
    graph: &mut AttrGraph,
    model: &ModelDescriptor,
    args: &ActionArgs,
    _rng: &mut RngHandle,
) -> Result<(), DiffusionError> {
    upod_update(
        graph,
        model.directedness,
        model.key,
        Consensus::Unanimity,
        args.states,
        args.steps,
    )
}

fn step_view(
    _graph: &mut AttrGraph,
    _model: &ModelDescriptor,
    _args: &ActionArgs,
    _rng: &mut RngHandle,
) -> Result<(), DiffusionError> {
    Ok(())
}

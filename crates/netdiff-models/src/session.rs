use netdiff_core::errors::DiffusionError;
use netdiff_core::{derive_substream_seed, RngHandle};
use netdiff_graph::{update_layout, AttrGraph};
use tracing::warn;

use crate::args::ActionArgs;
use crate::dispatch::{try_dispatch, DispatchReport};
use crate::normalize::{normalize_with, NormalizeOptions};
use crate::registry::{lookup, ModelDescriptor};

/// Substream of the normalizer's fallback layout.
pub const NORMALIZE_STREAM: u64 = 0;
/// Substream of on-demand layouts.
pub const LAYOUT_STREAM: u64 = 1;
/// Substream of random initialization and epidemic draws.
pub const RULE_STREAM: u64 = 2;

/// A graph under simulation with one active model.
///
/// The graph is normalized on construction and again whenever an action
/// replaces it. Layouts and rule draws use separate RNG substreams of the
/// session seed.
#[derive(Debug, Clone)]
pub struct Session {
    graph: AttrGraph,
    model: &'static ModelDescriptor,
    seed: u64,
    layout_rng: RngHandle,
    rule_rng: RngHandle,
}

impl Session {
    /// Creates a session. The model must be registered.
    pub fn new(mut graph: AttrGraph, model_id: &str, seed: u64) -> Result<Self, DiffusionError> {
        let model = lookup(model_id)?;
        normalize_with(&mut graph, &normalize_options(seed));
        Ok(Self {
            graph,
            model,
            seed,
            layout_rng: RngHandle::substream(seed, LAYOUT_STREAM),
            rule_rng: RngHandle::substream(seed, RULE_STREAM),
        })
    }

    /// Current graph.
    pub fn graph(&self) -> &AttrGraph {
        &self.graph
    }

    /// Consumes the session and returns its graph.
    pub fn into_graph(self) -> AttrGraph {
        self.graph
    }

    /// Active model.
    pub fn model(&self) -> &'static ModelDescriptor {
        self.model
    }

    /// Master seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Applies an action of the active model, propagating errors.
    pub fn try_apply(
        &mut self,
        action: &str,
        args: &ActionArgs,
    ) -> Result<DispatchReport, DiffusionError> {
        let report = try_dispatch(
            self.model.id.as_str(),
            action,
            &mut self.graph,
            args,
            &mut self.rule_rng,
        )?;
        if report.replaced {
            normalize_with(&mut self.graph, &normalize_options(self.seed));
        }
        Ok(report)
    }

    /// Applies an action of the active model. Failures are logged and leave
    /// the graph unchanged.
    pub fn apply(&mut self, action: &str, args: &ActionArgs) -> Option<DispatchReport> {
        match self.try_apply(action, args) {
            Ok(report) => Some(report),
            Err(err) => {
                warn!(model = %self.model.id, action, error = %err, "action skipped");
                None
            }
        }
    }

    /// Makes `model_id` the active model. Unknown ids are logged and ignored.
    pub fn switch_model(&mut self, model_id: &str) -> bool {
        match lookup(model_id) {
            Ok(model) => {
                self.model = model;
                true
            }
            Err(err) => {
                warn!(model = model_id, error = %err, "model switch ignored");
                false
            }
        }
    }

    /// Computes a named layout into the `layout` attribute. Unknown layouts
    /// are logged and ignored.
    pub fn relayout(&mut self, layout: &str) -> bool {
        match update_layout(&mut self.graph, layout, &mut self.layout_rng) {
            Ok(_) => true,
            Err(err) => {
                warn!(layout, error = %err, "layout ignored");
                false
            }
        }
    }
}

fn normalize_options(seed: u64) -> NormalizeOptions {
    NormalizeOptions {
        layout_seed: derive_substream_seed(seed, NORMALIZE_STREAM),
        ..NormalizeOptions::default()
    }
}

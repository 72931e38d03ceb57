use std::fs;

use netdiff_graph::AttrGraph;
use netdiff_models::{run_plan, RunPlan, StepStatus};

const PLAN: &str = r#"
model: sis
seed: 7
layout: circular_layout
actions:
  - action: random
    args: { prob: 0.5 }
  - action: step
    args: { steps: 3, prob: 0.6, itime: 2 }
  - action: teleport
  - model: voter
    action: step
  - model: upodmaj
    action: step
    args: { states: 3 }
"#;

fn lattice() -> AttrGraph {
    let mut graph = AttrGraph::directed();
    for row in 0..4 {
        for col in 0..4 {
            let id = format!("{row}-{col}");
            graph.add_edge(id.clone(), format!("{}-{col}", (row + 1) % 4));
            graph.add_edge(id, format!("{row}-{}", (col + 1) % 4));
        }
    }
    graph
}

#[test]
fn plan_loads_from_a_yaml_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plan.yaml");
    fs::write(&path, PLAN).unwrap();
    let plan = RunPlan::load(&path).unwrap();
    assert_eq!(plan.model, "sis");
    assert_eq!(plan.seed, 7);
    assert_eq!(plan.actions.len(), 5);
    assert_eq!(plan.actions[1].args.steps, 3);
    assert_eq!(plan.actions[1].args.prob, Some(0.6));
    assert_eq!(plan.actions[4].model.as_deref(), Some("upodmaj"));
}

#[test]
fn missing_plan_file_is_a_serde_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = RunPlan::load(&dir.path().join("absent.yaml")).unwrap_err();
    assert_eq!(err.code(), "read-plan");
}

#[test]
fn unknown_plan_fields_are_rejected() {
    let err = RunPlan::from_yaml("model: sis\nsteps: 4\n").unwrap_err();
    assert_eq!(err.code(), "deserialize-yaml");
}

#[test]
fn failing_steps_are_skipped_and_recorded() {
    let plan = RunPlan::from_yaml(PLAN).unwrap();
    let (graph, summary) = run_plan(&plan, lattice()).unwrap();

    let statuses: Vec<StepStatus> = summary.steps.iter().map(|step| step.status).collect();
    assert_eq!(
        statuses,
        [
            StepStatus::Applied,
            StepStatus::Applied,
            StepStatus::Skipped,
            StepStatus::Applied,
            StepStatus::Applied,
        ]
    );
    assert_eq!(summary.steps[2].error.as_deref(), Some("unknown-action"));
    // An unknown model leaves the previous one active.
    assert_eq!(summary.steps[3].model, "sis");
    assert_eq!(summary.steps[3].error, None);
    assert_eq!(summary.model, "upodmaj");
    assert_eq!(summary.nodes, graph.node_count());
    assert_eq!(summary.edges, 32);
    assert_eq!(summary.histogram.values().sum::<usize>(), 16);
}

#[test]
fn same_plan_same_result() {
    let plan = RunPlan::from_yaml(PLAN).unwrap();
    let (first, left) = run_plan(&plan, lattice()).unwrap();
    let (second, right) = run_plan(&plan, lattice()).unwrap();
    assert_eq!(first, second);
    assert_eq!(left, right);
}

#[test]
fn unknown_initial_model_fails_the_run() {
    let plan = RunPlan::from_yaml("model: voter\n").unwrap();
    let err = run_plan(&plan, lattice()).unwrap_err();
    assert_eq!(err.code(), "unknown-model");
}

use netdiff_core::{AttrValue, Directedness, NodeId, RngHandle};
use netdiff_graph::AttrGraph;
use netdiff_models::{degroot_update, dispatch, normalize, stochastic_normalize, ActionArgs};
use proptest::prelude::*;

fn deg(graph: &AttrGraph, id: &str) -> f64 {
    graph
        .node_attr(&NodeId::from(id), "deg")
        .and_then(AttrValue::as_f64)
        .unwrap()
}

fn path_graph() -> AttrGraph {
    let mut graph = AttrGraph::undirected();
    graph.add_edge("A", "B");
    graph.add_edge("B", "C");
    normalize(&mut graph);
    graph.set_node_attr(&"A".into(), "deg", 1.0).unwrap();
    graph
}

#[test]
fn stochastic_path_averages_neighbours() {
    let graph = path_graph();
    let mut rng = RngHandle::from_seed(0);
    let graph = dispatch("degroot", "stochastic", graph, &ActionArgs::default(), &mut rng);
    assert!(graph.is_directed());
    assert_eq!(graph.edge_count(), 4);

    let graph = dispatch("degroot", "step", graph, &ActionArgs::steps(1), &mut rng);
    assert!((deg(&graph, "B") - 0.5).abs() < 1e-12);
    assert!((deg(&graph, "A") - 0.0).abs() < 1e-12);
    assert!((deg(&graph, "C") - 0.0).abs() < 1e-12);
}

#[test]
fn zero_steps_leave_the_state_untouched() {
    let mut graph = path_graph();
    let before = graph.clone();
    degroot_update(&mut graph, Directedness::Directed, "deg", 0, false, false).unwrap();
    assert_eq!(graph, before);
}

#[test]
fn transpose_reverses_influence_and_clip_bounds_values() {
    let mut graph = AttrGraph::directed();
    graph.add_weighted_edge("a", "b", 2.0);
    normalize(&mut graph);
    graph.set_node_attr(&"b".into(), "deg", 1.0).unwrap();

    let mut forward = graph.clone();
    degroot_update(&mut forward, Directedness::Directed, "deg", 1, false, false).unwrap();
    assert_eq!(deg(&forward, "a"), 2.0);

    let mut clipped = graph.clone();
    degroot_update(&mut clipped, Directedness::Directed, "deg", 1, false, true).unwrap();
    assert_eq!(deg(&clipped, "a"), 1.0);

    let mut backward = graph;
    backward.set_node_attr(&"a".into(), "deg", 1.0).unwrap();
    backward.set_node_attr(&"b".into(), "deg", 0.0).unwrap();
    degroot_update(&mut backward, Directedness::Directed, "deg", 1, true, false).unwrap();
    assert_eq!(deg(&backward, "b"), 2.0);
    assert_eq!(deg(&backward, "a"), 0.0);
}

#[test]
fn missing_state_is_a_model_error_and_commits_nothing() {
    let mut graph = AttrGraph::directed();
    graph.add_edge("a", "b");
    let before = graph.clone();
    let err = degroot_update(&mut graph, Directedness::Directed, "deg", 1, false, false)
        .unwrap_err();
    assert_eq!(err.code(), "missing-attribute");
    assert_eq!(graph, before);
}

fn random_weighted_graph() -> impl Strategy<Value = (AttrGraph, Vec<f64>)> {
    (2usize..7).prop_flat_map(|n| {
        (
            proptest::collection::vec((0..n, 0..n, 0.05f64..1.0), 1..(n * 2)),
            proptest::collection::vec(0.0f64..1.0, n),
        )
            .prop_map(move |(edges, states)| {
                let mut graph = AttrGraph::directed();
                for i in 0..n {
                    graph.add_node(format!("n{i}"));
                }
                for (s, t, w) in edges {
                    graph.add_weighted_edge(format!("n{s}"), format!("n{t}"), w);
                }
                normalize(&mut graph);
                let _ = stochastic_normalize(&mut graph);
                (graph, states)
            })
    })
}

proptest! {
    #[test]
    fn matrix_powers_compose((graph, states) in random_weighted_graph(), a in 1usize..4, b in 1usize..4) {
        let mut seeded = graph.clone();
        for (i, value) in states.iter().enumerate() {
            seeded.set_node_attr(&NodeId::from(format!("n{i}")), "deg", *value).unwrap();
        }

        let mut split = seeded.clone();
        degroot_update(&mut split, Directedness::Directed, "deg", b, false, false).unwrap();
        degroot_update(&mut split, Directedness::Directed, "deg", a, false, false).unwrap();

        let mut joined = seeded;
        degroot_update(&mut joined, Directedness::Directed, "deg", a + b, false, false).unwrap();

        for id in split.nodes() {
            let lhs = split.node_attr(id, "deg").and_then(AttrValue::as_f64).unwrap();
            let rhs = joined.node_attr(id, "deg").and_then(AttrValue::as_f64).unwrap();
            prop_assert!((lhs - rhs).abs() < 1e-9);
        }
    }
}

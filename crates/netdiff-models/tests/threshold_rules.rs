use netdiff_core::{AttrValue, Directedness, NodeId, RngHandle};
use netdiff_graph::AttrGraph;
use netdiff_models::{
    normalize, threshold_automata_update, threshold_uniform_update, threshold_weighted_update,
    try_dispatch, uniform_next, ActionArgs,
};
use proptest::prelude::*;

fn state(graph: &AttrGraph, id: &str, key: &str) -> i64 {
    graph
        .node_attr(&NodeId::from(id), key)
        .and_then(AttrValue::as_i64)
        .unwrap()
}

#[test]
fn isolated_node_follows_the_uniform_threshold() {
    for (initial, threshold, expected) in [(0, 0.0, 1), (1, 0.5, 0), (1, 0.0, 1), (0, 0.5, 0)] {
        let mut graph = AttrGraph::undirected();
        graph.add_node("solo");
        graph.add_edge("a", "b");
        normalize(&mut graph);
        graph.set_node_attr(&"solo".into(), "thu", initial).unwrap();
        graph.set_node_attr(&"a".into(), "thu", 1).unwrap();
        graph.set_node_attr(&"b".into(), "thu", 1).unwrap();
        threshold_uniform_update(&mut graph, Directedness::Undirected, "thu", threshold, 1)
            .unwrap();
        assert_eq!(state(&graph, "solo", "thu"), expected);
        assert_eq!(state(&graph, "a", "thu"), 1);
    }
}

#[test]
fn uniform_cascade_spreads_along_a_star() {
    let mut graph = AttrGraph::undirected();
    for leaf in ["l1", "l2", "l3"] {
        graph.add_edge("hub", leaf);
    }
    normalize(&mut graph);
    graph.set_node_attr(&"l1".into(), "thu", 1).unwrap();
    graph.set_node_attr(&"l2".into(), "thu", 1).unwrap();

    let args = ActionArgs {
        threshold: 0.5,
        ..ActionArgs::steps(1)
    };
    let mut rng = RngHandle::from_seed(0);
    try_dispatch("threshold_uniform", "step", &mut graph, &args, &mut rng).unwrap();
    assert_eq!(state(&graph, "hub", "thu"), 1);
    // Leaves only see the previously inactive hub.
    assert_eq!(state(&graph, "l1", "thu"), 0);
    assert_eq!(state(&graph, "l3", "thu"), 0);
}

#[test]
fn weighted_threshold_needs_strictly_more_weight() {
    let mut graph = AttrGraph::directed();
    graph.add_weighted_edge("x", "a", 0.3);
    graph.add_weighted_edge("x", "b", 0.2);
    graph.add_weighted_edge("y", "a", 0.5);
    normalize(&mut graph);
    graph.set_node_attr(&"a".into(), "thw", 1).unwrap();
    graph.set_node_attr(&"b".into(), "thw", 1).unwrap();

    threshold_weighted_update(&mut graph, Directedness::Directed, "thw", 1).unwrap();
    // x: 0.3 + 0.2 = 0.5 is not above 0.5, y: 0.5 is not above 0.5.
    assert_eq!(state(&graph, "x", "thw"), 0);
    assert_eq!(state(&graph, "y", "thw"), 0);

    graph.set_node_attr(&"a".into(), "thw", 1).unwrap();
    graph.set_node_attr(&"b".into(), "thw", 1).unwrap();
    graph.set_node_attr(&"x".into(), "thw_th", 0.45).unwrap();
    threshold_weighted_update(&mut graph, Directedness::Directed, "thw", 1).unwrap();
    assert_eq!(state(&graph, "x", "thw"), 1);
    assert_eq!(state(&graph, "a", "thw"), 0);
}

#[test]
fn automata_follow_unanimous_neighbours() {
    let mut graph = AttrGraph::directed();
    graph.add_edge("p", "q");
    graph.add_edge("p", "r");
    graph.add_edge("s", "q");
    normalize(&mut graph);
    graph.set_node_attr(&"q".into(), "tha", -1).unwrap();
    graph.set_node_attr(&"r".into(), "tha", -1).unwrap();
    graph.set_node_attr(&"s".into(), "tha", 1).unwrap();

    threshold_automata_update(&mut graph, Directedness::Directed, "tha", 1).unwrap();
    assert_eq!(state(&graph, "p", "tha"), -1);
    assert_eq!(state(&graph, "s", "tha"), -1);
    assert_eq!(state(&graph, "q", "tha"), -1);
}

proptest! {
    #[test]
    fn uniform_rule_is_monotone_in_support(total in 1usize..20, extra in 0usize..20, threshold in 0.0f64..=1.0) {
        let low = extra.min(total);
        for active in 0..=total {
            let base = uniform_next(active, total, threshold);
            let more = uniform_next((active + low).min(total), total, threshold);
            prop_assert!(more >= base);
        }
    }

    #[test]
    fn zero_steps_are_a_no_op(states in proptest::collection::vec(0i64..2, 4)) {
        let mut graph = AttrGraph::undirected();
        graph.add_edge("a", "b");
        graph.add_edge("b", "c");
        graph.add_edge("c", "d");
        normalize(&mut graph);
        for (i, id) in ["a", "b", "c", "d"].iter().enumerate() {
            graph.set_node_attr(&NodeId::from(*id), "thu", states[i]).unwrap();
        }
        let before = graph.clone();
        threshold_uniform_update(&mut graph, Directedness::Undirected, "thu", 0.5, 0).unwrap();
        prop_assert_eq!(graph, before);
    }
}

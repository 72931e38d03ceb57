use netdiff_core::{AttrValue, Directedness, NodeId, RngHandle};
use netdiff_graph::AttrGraph;
use netdiff_models::{
    epidemic_update, normalize, try_dispatch, ActionArgs, EpidemicParams, Recovery, Session,
    RECOVERED,
};
use proptest::prelude::*;

fn state(graph: &AttrGraph, id: &str, key: &str) -> i64 {
    graph
        .node_attr(&NodeId::from(id), key)
        .and_then(AttrValue::as_i64)
        .unwrap()
}

#[test]
fn certain_contact_infects_with_full_duration() {
    let mut graph = AttrGraph::directed();
    graph.add_edge("a", "b");
    normalize(&mut graph);
    graph.set_node_attr(&"b".into(), "sis", 2).unwrap();

    let args = ActionArgs {
        prob: Some(1.0),
        itime: 3,
        ..ActionArgs::steps(1)
    };
    let mut rng = RngHandle::from_seed(11);
    try_dispatch("sis", "step", &mut graph, &args, &mut rng).unwrap();
    assert_eq!(state(&graph, "a", "sis"), 3);
    assert_eq!(state(&graph, "b", "sis"), 1);
}

#[test]
fn listeners_without_infectious_contacts_stay_susceptible() {
    let mut graph = AttrGraph::directed();
    // b is infectious but only b listens to a.
    graph.add_edge("b", "a");
    normalize(&mut graph);
    graph.set_node_attr(&"b".into(), "sis", 2).unwrap();

    let params = EpidemicParams {
        prob: 1.0,
        itime: 4,
        recovery: Recovery::Susceptible,
    };
    let mut rng = RngHandle::from_seed(3);
    epidemic_update(&mut graph, Directedness::Directed, "sis", params, 1, &mut rng).unwrap();
    assert_eq!(state(&graph, "a", "sis"), 0);
    assert_eq!(state(&graph, "b", "sis"), 1);
}

#[test]
fn sis_returns_to_susceptible_and_sir_to_recovered() {
    let mut graph = AttrGraph::directed();
    graph.add_node("lonely");
    normalize(&mut graph);
    graph.set_node_attr(&"lonely".into(), "sis", 1).unwrap();
    graph.set_node_attr(&"lonely".into(), "sir", 1).unwrap();

    let mut rng = RngHandle::from_seed(0);
    try_dispatch("sis", "step", &mut graph, &ActionArgs::steps(1), &mut rng).unwrap();
    try_dispatch("sir", "step", &mut graph, &ActionArgs::steps(1), &mut rng).unwrap();
    assert_eq!(state(&graph, "lonely", "sis"), 0);
    assert_eq!(state(&graph, "lonely", "sir"), RECOVERED);
}

fn ring(n: usize) -> AttrGraph {
    let mut graph = AttrGraph::directed();
    for i in 0..n {
        graph.add_edge(format!("n{i}"), format!("n{}", (i + 1) % n));
        graph.add_edge(format!("n{i}"), format!("n{}", (i + 3) % n));
    }
    graph
}

#[test]
fn same_seed_same_outbreak() {
    let run = |seed: u64| {
        let mut session = Session::new(ring(12), "sir", seed).unwrap();
        let init = ActionArgs {
            prob: Some(0.3),
            ..ActionArgs::default()
        };
        session.try_apply("random", &init).unwrap();
        let spread = ActionArgs {
            prob: Some(0.4),
            ..ActionArgs::steps(6)
        };
        session.try_apply("step", &spread).unwrap();
        session.into_graph()
    };
    assert_eq!(run(42), run(42));
}

proptest! {
    #[test]
    fn recovered_nodes_never_leave(states in proptest::collection::vec(-1i64..4, 8), seed in any::<u64>(), steps in 1usize..5) {
        let mut graph = ring(8);
        normalize(&mut graph);
        for (i, value) in states.iter().enumerate() {
            graph.set_node_attr(&NodeId::from(format!("n{i}")), "sir", *value).unwrap();
        }
        let params = EpidemicParams {
            prob: 0.7,
            itime: 2,
            recovery: Recovery::Immune,
        };
        let mut rng = RngHandle::from_seed(seed);
        epidemic_update(&mut graph, Directedness::Directed, "sir", params, steps, &mut rng).unwrap();
        for (i, value) in states.iter().enumerate() {
            let now = state(&graph, &format!("n{i}"), "sir");
            if *value == RECOVERED {
                prop_assert_eq!(now, RECOVERED);
            }
            prop_assert!((RECOVERED..=2i64.max(*value)).contains(&now));
        }
    }
}

use netdiff_core::{AttrValue, NodeId};
use netdiff_graph::{AttrGraph, LAYOUT_KEY, POS_KEY, WEIGHT_KEY};
use netdiff_models::{normalize, normalize_with, state_defaults, NormalizeOptions};
use proptest::prelude::*;

fn sparse_graph() -> AttrGraph {
    let mut graph = AttrGraph::undirected();
    graph.add_edge("a", "b");
    graph.add_weighted_edge("b", "c", 0.25);
    graph.add_node("d");
    graph.set_node_attr(&"a".into(), "deg", 0.8).unwrap();
    graph
}

#[test]
fn missing_attributes_get_defaults() {
    let mut graph = sparse_graph();
    let report = normalize(&mut graph);
    assert_eq!(report.positioned, 4);
    assert_eq!(report.weighted, 1);
    assert_eq!(report.defaulted, 4 * state_defaults().len() - 1);

    for (id, attrs) in graph.nodes_with_attrs() {
        assert!(matches!(attrs.get(POS_KEY), Some(AttrValue::Point(_))), "{id}");
        for (key, _) in state_defaults() {
            assert!(attrs.contains_key(key), "{id} lacks {key}");
        }
    }
    assert_eq!(graph.node_attr(&"a".into(), "deg"), Some(&AttrValue::Float(0.8)));
    assert_eq!(graph.node_attr(&"d".into(), "thu_th"), Some(&AttrValue::Float(0.5)));
    assert_eq!(
        graph.edge_attr(&"a".into(), &"b".into(), WEIGHT_KEY),
        Some(&AttrValue::Float(1.0))
    );
    assert_eq!(
        graph.edge_attr(&"b".into(), &"c".into(), WEIGHT_KEY),
        Some(&AttrValue::Float(0.25))
    );
}

#[test]
fn normalizing_twice_changes_nothing() {
    let mut graph = sparse_graph();
    normalize(&mut graph);
    let once = graph.clone();
    let report = normalize(&mut graph);
    assert!(report.is_noop());
    assert_eq!(graph, once);
}

#[test]
fn existing_coordinates_skip_the_layout() {
    let mut graph = AttrGraph::directed();
    graph.add_edge("p", "q");
    graph.set_node_attr(&"p".into(), POS_KEY, [0.1, 0.2]).unwrap();
    graph.set_node_attr(&"q".into(), LAYOUT_KEY, [0.3, 0.4]).unwrap();
    let report = normalize(&mut graph);
    assert_eq!(report.positioned, 0);
    assert_eq!(graph.node_attr(&"q".into(), POS_KEY), None);
    assert_eq!(
        graph.node_attr(&"p".into(), POS_KEY),
        Some(&AttrValue::Point([0.1, 0.2]))
    );
}

#[test]
fn fallback_layout_only_fills_missing_positions() {
    let mut graph = AttrGraph::undirected();
    graph.add_edge("fixed", "loose");
    graph.set_node_attr(&"fixed".into(), POS_KEY, [5.0, 5.0]).unwrap();
    let report = normalize(&mut graph);
    assert_eq!(report.positioned, 1);
    assert_eq!(
        graph.node_attr(&"fixed".into(), POS_KEY),
        Some(&AttrValue::Point([5.0, 5.0]))
    );
    assert!(graph.node_attr(&"loose".into(), POS_KEY).is_some());
}

#[test]
fn layout_seed_drives_fallback_positions() {
    let options = |seed| NormalizeOptions {
        layout_seed: seed,
        ..NormalizeOptions::default()
    };
    let place = |seed| {
        let mut graph = sparse_graph();
        normalize_with(&mut graph, &options(seed));
        graph.node_attr(&NodeId::from("d"), POS_KEY).cloned()
    };
    assert_eq!(place(3), place(3));
    assert_ne!(place(3), place(4));
}

proptest! {
    #[test]
    fn normalize_is_idempotent(edges in proptest::collection::vec((0u8..6, 0u8..6, proptest::option::of(0.1f64..2.0)), 0..12), directed in any::<bool>()) {
        let mut graph = if directed { AttrGraph::directed() } else { AttrGraph::undirected() };
        graph.add_node("n0");
        for (s, t, weight) in edges {
            match weight {
                Some(w) => graph.add_weighted_edge(format!("n{s}"), format!("n{t}"), w),
                None => graph.add_edge(format!("n{s}"), format!("n{t}")),
            }
        }
        normalize(&mut graph);
        let once = graph.clone();
        prop_assert!(normalize(&mut graph).is_noop());
        prop_assert_eq!(graph, once);
    }
}

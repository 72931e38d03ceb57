use netdiff_core::{AttrValue, RngHandle};
use netdiff_graph::{
    compute_layout, spring_layout, update_layout, AttrGraph, LayoutAlgorithm, LAYOUT_KEY,
};
use proptest::prelude::*;

fn ring(n: usize) -> AttrGraph {
    let mut graph = AttrGraph::undirected();
    for i in 0..n {
        graph.add_edge(format!("n{i}"), format!("n{}", (i + 1) % n));
    }
    graph
}

#[test]
fn circular_layout_places_nodes_on_unit_circle() {
    let graph = ring(6);
    let mut rng = RngHandle::from_seed(1);
    let layout = compute_layout(&graph, LayoutAlgorithm::Circular, &mut rng);
    assert_eq!(layout.len(), 6);
    for point in layout.values() {
        let radius = (point[0] * point[0] + point[1] * point[1]).sqrt();
        assert!((radius - 1.0).abs() < 1e-12);
    }
}

#[test]
fn default_layout_computes_nothing() {
    let graph = ring(4);
    let mut rng = RngHandle::from_seed(1);
    assert!(compute_layout(&graph, LayoutAlgorithm::Default, &mut rng).is_empty());
}

#[test]
fn update_layout_caches_coordinates_and_rejects_unknown_names() {
    let mut graph = ring(5);
    let mut rng = RngHandle::from_seed(3);
    assert_eq!(update_layout(&mut graph, "spiral_layout", &mut rng).unwrap(), 5);
    assert!(matches!(
        graph.node_attr(&"n0".into(), LAYOUT_KEY),
        Some(AttrValue::Point(_))
    ));

    let before = graph.clone();
    let err = update_layout(&mut graph, "planar_layout", &mut rng).unwrap_err();
    assert!(err.is_config());
    assert_eq!(graph, before);
}

#[test]
fn spring_layout_is_seed_deterministic() {
    let graph = ring(8);
    let a = spring_layout(&graph, &mut RngHandle::from_seed(11), 50);
    let b = spring_layout(&graph, &mut RngHandle::from_seed(11), 50);
    assert_eq!(a, b);
}

#[test]
fn spring_layout_handles_large_sparse_graphs() {
    let mut graph = AttrGraph::undirected();
    for i in 1..3000 {
        graph.add_edge(format!("n{}", i - 1), format!("n{i}"));
    }
    let layout = spring_layout(&graph, &mut RngHandle::from_seed(5), 2);
    assert_eq!(layout.len(), 3000);
    assert!(layout
        .values()
        .all(|point| point.iter().all(|c| c.is_finite() && c.abs() <= 1.0 + 1e-9)));
}

proptest! {
    #[test]
    fn spring_layout_stays_within_unit_box(seed in any::<u64>(), n in 1usize..12) {
        let graph = ring(n);
        let layout = spring_layout(&graph, &mut RngHandle::from_seed(seed), 20);
        prop_assert_eq!(layout.len(), n);
        for point in layout.values() {
            prop_assert!(point[0].is_finite() && point[1].is_finite());
            prop_assert!(point[0].abs() <= 1.0 + 1e-9 && point[1].abs() <= 1.0 + 1e-9);
        }
    }
}

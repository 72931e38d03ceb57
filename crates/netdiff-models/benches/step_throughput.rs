use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use netdiff_core::RngHandle;
use netdiff_graph::AttrGraph;
use netdiff_models::{normalize, try_dispatch, ActionArgs};

fn torus(side: usize) -> AttrGraph {
    let mut graph = AttrGraph::directed();
    for row in 0..side {
        for col in 0..side {
            let id = format!("{row}:{col}");
            graph.add_edge(id.clone(), format!("{row}:{}", (col + 1) % side));
            graph.add_edge(id, format!("{}:{col}", (row + 1) % side));
        }
    }
    normalize(&mut graph);
    graph
}

fn step_bench(c: &mut Criterion) {
    let base = torus(30);
    let mut group = c.benchmark_group("step_900_nodes");
    for model in ["degroot", "threshold_uniform", "sis", "upodmaj"] {
        let mut seeded = base.clone();
        let mut rng = RngHandle::from_seed(1);
        if try_dispatch(model, "random", &mut seeded, &ActionArgs::default(), &mut rng).is_err() {
            continue;
        }
        group.bench_function(model, |b| {
            b.iter_batched(
                || (seeded.clone(), RngHandle::from_seed(2)),
                |(mut graph, mut rng)| {
                    let args = ActionArgs::steps(10);
                    black_box(try_dispatch(model, "step", &mut graph, &args, &mut rng).is_ok());
                    graph
                },
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, step_bench);
criterion_main!(benches);

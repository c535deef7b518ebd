use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};

use isochron::prelude::*;

/// Square grid with unit travel times in both directions.
fn grid_graph(side: u64) -> TravelGraph {
    let mut graph = TravelGraph::new();
    for row in 0..side {
        for col in 0..side {
            graph
                .add_node(row * side + col, col as f64 * 10.0, row as f64 * 10.0)
                .unwrap();
        }
    }
    for row in 0..side {
        for col in 0..side {
            let id = row * side + col;
            if col + 1 < side {
                graph.add_edge(id, id + 1, 1.0).unwrap();
                graph.add_edge(id + 1, id, 1.0).unwrap();
            }
            if row + 1 < side {
                graph.add_edge(id, id + side, 1.0).unwrap();
                graph.add_edge(id + side, id, 1.0).unwrap();
            }
        }
    }
    graph
}

fn bench_isochrones(c: &mut Criterion) {
    let graph = grid_graph(60);
    let center = 60 * 30 + 30;
    let thresholds = [10.0, 20.0, 30.0];

    c.bench_function("isochrone_grid_60x60", |b| {
        b.iter(|| {
            build_isochrone_map(black_box(&graph), black_box(center), black_box(&thresholds))
                .unwrap()
        });
    });

    c.bench_function("travel_times_grid_60x60", |b| {
        b.iter(|| travel_times(black_box(&graph), black_box(center), Some(30.0)).unwrap());
    });
}

criterion_group!(benches, bench_isochrones);
criterion_main!(benches);

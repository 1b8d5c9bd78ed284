use criterion::{criterion_group, BenchmarkId, Criterion, SamplingMode, Throughput};
use rand::Rng;

use maxflow_rs::flow_network::FlowNetwork;

/// A random layered DAG: `layers` groups of `width` vertices each, full
/// bipartite connectivity between consecutive layers, capacities drawn
/// uniformly from `1..=20`. Vertex 0 is the source, the last vertex the sink.
fn build_layered_network(layers: usize, width: usize) -> FlowNetwork {
    let mut rng = rand::rng();
    let mut net = FlowNetwork::new();

    let mut id = 0i64;
    net.add_vertex(id).unwrap();
    let source = id;
    id += 1;

    let mut previous = vec![source];
    for _ in 0..layers {
        let mut current = Vec::with_capacity(width);
        for _ in 0..width {
            net.add_vertex(id).unwrap();
            current.push(id);
            id += 1;
        }
        for &from in &previous {
            for &to in &current {
                net.add_edge(from, to, rng.random_range(1..=20)).unwrap();
            }
        }
        previous = current;
    }

    net.add_vertex(id).unwrap();
    let sink = id;
    for &from in &previous {
        net.add_edge(from, sink, rng.random_range(1..=20)).unwrap();
    }

    net.set_source(source).unwrap();
    net.set_sink(sink).unwrap();
    net
}

fn bench_algorithms(c: &mut Criterion) {
    let mut group = c.benchmark_group("Max flow: Dinic vs Goldberg-Tarjan");
    group.sampling_mode(SamplingMode::Flat);
    for (layers, width) in [(4, 5), (6, 8), (8, 10)] {
        let vertex_count = 2 + layers * width;
        group.throughput(Throughput::Elements(vertex_count as u64));

        group.bench_function(BenchmarkId::new("dinic", vertex_count), |b| {
            b.iter_batched(
                || build_layered_network(layers, width),
                |mut net| net.dinic(),
                criterion::BatchSize::LargeInput,
            )
        });
        group.bench_function(BenchmarkId::new("goldberg_tarjan", vertex_count), |b| {
            b.iter_batched(
                || build_layered_network(layers, width),
                |mut net| net.goldberg_tarjan(),
                criterion::BatchSize::LargeInput,
            )
        });
    }
}

criterion_group!(all_max_flow, bench_algorithms);

//! 最大流引擎基准测试

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use flowviz::{max_flow, EdgeInput, FlowNetworkInput, MaxFlowOptions, NodeId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// 分层网络：source -> 每层 width 个节点 -> sink
fn layered_network(layers: i64, width: i64, seed: u64) -> FlowNetworkInput {
    let mut rng = StdRng::seed_from_u64(seed);
    let source = NodeId::Int(0);
    let sink = NodeId::Int(layers * width + 1);
    let id = |layer: i64, i: i64| NodeId::Int(layer * width + i + 1);

    let mut nodes = vec![source.clone()];
    let mut edges = Vec::new();

    for layer in 0..layers {
        for i in 0..width {
            nodes.push(id(layer, i));
            if layer == 0 {
                edges.push(EdgeInput::new(source.clone(), id(layer, i), rng.gen_range(1..20) as f64));
            } else {
                for j in 0..width {
                    if rng.gen_bool(0.5) {
                        edges.push(EdgeInput::new(
                            id(layer - 1, j),
                            id(layer, i),
                            rng.gen_range(1..20) as f64,
                        ));
                    }
                }
            }
            if layer == layers - 1 {
                edges.push(EdgeInput::new(id(layer, i), sink.clone(), rng.gen_range(1..20) as f64));
            }
        }
    }
    nodes.push(sink.clone());

    FlowNetworkInput {
        nodes,
        edges,
        source,
        sink,
    }
}

fn bench_max_flow(c: &mut Criterion) {
    let mut group = c.benchmark_group("max_flow");

    for &(layers, width) in &[(4, 4), (8, 8), (16, 16)] {
        let input = layered_network(layers, width, 42);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", layers, width)),
            &input,
            |b, input| b.iter(|| max_flow(black_box(input), MaxFlowOptions::default())),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_max_flow);
criterion_main!(benches);

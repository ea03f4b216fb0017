//! Benchmark for cave smoothing and scrolling.
//!
//! TARGET: one forward scroll of a 68x40 cave in a fraction of a full rebuild
//!
//! Run with: cargo bench --package cavern_procedural --bench automaton_benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use cavern_procedural::{CaveAutomaton, Topology};

fn benchmark_passes(c: &mut Criterion) {
    let mut group = c.benchmark_group("smoothing_pass");
    group.throughput(Throughput::Elements(68 * 40));

    for topology in [Topology::Square, Topology::Hex] {
        let mut cave = CaveAutomaton::new(68, 40, 45, topology, 7).expect("valid cave");
        group.bench_function(format!("{topology:?}_68x40"), |b| {
            b.iter(|| {
                cave.iterate(1);
                black_box(cave.iterations())
            });
        });
    }

    group.finish();
}

fn benchmark_rebuild(c: &mut Criterion) {
    c.bench_function("full_rebuild_68x40_4_passes", |b| {
        let mut seed = 0u64;
        b.iter(|| {
            seed = seed.wrapping_add(1);
            let mut cave = CaveAutomaton::new(68, 40, 18, Topology::Square, black_box(seed))
                .expect("valid cave");
            cave.iterate(4);
            black_box(cave.read_grid())
        });
    });
}

fn benchmark_scroll(c: &mut Criterion) {
    let mut cave = CaveAutomaton::new(68, 40, 18, Topology::Square, 0).expect("valid cave");
    cave.iterate(4);

    c.bench_function("scroll_forward_1_row_68x40", |b| {
        b.iter(|| black_box(cave.scroll_forward(black_box(1))));
    });
}

criterion_group!(benches, benchmark_passes, benchmark_rebuild, benchmark_scroll);
criterion_main!(benches);

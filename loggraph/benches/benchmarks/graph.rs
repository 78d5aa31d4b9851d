use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group};

use loggraph::{
    BranchMembershipIndex, CommitGraph, DfsWalker, GraphBuilder, LayoutBuilder, NodeBitSet, NodeId,
};

/// A linear chain of `n` commits, tip first: commit `i` has parent `i + 1`.
fn chain(n: u64) -> CommitGraph<u64> {
    let mut builder = GraphBuilder::with_capacity(n as usize);
    for i in 0..n {
        builder.add_commit(i, (i + 1 < n).then_some(i + 1));
    }
    builder.finish().graph
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_chain");
    for size in [10_000u64, 100_000] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| black_box(chain(size)));
        });
    }
    group.finish();
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout_chain");
    for size in [10_000u64, 100_000] {
        let graph = chain(size);
        let mut walker = DfsWalker::with_capacity(size as usize);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                black_box(LayoutBuilder::new(&graph).build(|x, y| x.cmp(&y), &mut walker))
            });
        });
    }
    group.finish();
}

fn bench_membership_requery(c: &mut Criterion) {
    let size = 100_000u64;
    let graph = chain(size);
    let mut walker = DfsWalker::with_capacity(size as usize);
    let mut scratch = NodeBitSet::new(graph.node_count());
    let mut index = BranchMembershipIndex::new([NodeId::new(0)], 1024);
    let root = NodeId::new(graph.node_count() - 1);
    c.bench_function("membership_requery", |b| {
        b.iter(|| black_box(index.membership(&graph, root, &mut walker, &mut scratch).len()));
    });
}

criterion_group!(
    benches,
    bench_build,
    bench_layout,
    bench_membership_requery
);

//! End-to-end scenarios: scale and whole-pipeline determinism.

use loggraph::{
    BranchMembershipIndex, BuiltGraph, DfsWalker, GraphBuilder, LayoutBuilder, NodeBitSet,
    NodeFlagSets, NodeId, WalkControl,
};

/// A linear chain of `n` commits, tip first: commit `i` has parent `i + 1`.
fn chain(n: u64) -> BuiltGraph<u64> {
    let mut builder = GraphBuilder::with_capacity(n as usize);
    for i in 0..n {
        builder.add_commit(i, (i + 1 < n).then_some(i + 1));
    }
    builder.finish()
}

#[test]
fn hundred_thousand_commit_chain() {
    const N: u64 = 100_000;
    let built = chain(N);
    let graph = &built.graph;
    assert_eq!(graph.node_count(), N as usize);
    assert!(built.not_loaded.is_empty());

    // A full traversal over parent edges must not overflow the native
    // stack; the walker is iterative by construction.
    let mut walker = DfsWalker::with_capacity(64);
    let mut visited = 0usize;
    walker.walk(
        NodeId::new(0),
        |node| graph.parents(node).iter().copied(),
        |_| {
            visited += 1;
            WalkControl::Continue
        },
    );
    assert_eq!(visited, graph.node_count());

    // One head, one lane, every node on it.
    let layout = LayoutBuilder::new(graph).build(|a, b| a.cmp(&b), &mut walker);
    assert_eq!(layout.lane_count(), 1);
    assert!(graph.nodes().all(|n| layout.lane(n).is_some()));

    // The root is contained in the tip's branch.
    let mut flags = NodeFlagSets::new(graph.node_count());
    let mut index = BranchMembershipIndex::new([NodeId::new(0)], 1024);
    let root = NodeId::new(graph.node_count() - 1);
    let membership = index.membership(graph, root, &mut walker, flags.scratch_mut());
    assert_eq!(membership.heads(), &[NodeId::new(0)]);
    assert!(flags.scratch().is_clear());

    // Everything between tip and root is a linear run.
    let mut linear = NodeBitSet::new(graph.node_count());
    graph.mark_linear_nodes(&mut linear);
    assert_eq!(linear.count_ones(), graph.node_count() - 2);
}

#[test]
fn pipeline_is_deterministic() {
    let records: &[(&str, &[&str])] = &[
        ("f", &["d", "e"]),
        ("e", &["c"]),
        ("d", &["b"]),
        ("c", &["b"]),
        ("b", &["missing"]),
        ("lone", &[]),
    ];
    let build = || {
        let mut builder = GraphBuilder::new();
        for &(id, parents) in records {
            builder.add_commit(id, parents.iter().copied());
        }
        builder.finish()
    };
    let first = build();
    let second = build();
    assert_eq!(first.graph, second.graph);
    assert_eq!(first.not_loaded, second.not_loaded);
    assert_eq!(first.graph.dump_string(), second.graph.dump_string());

    let mut walker = DfsWalker::new();
    let first_layout = LayoutBuilder::new(&first.graph).build(|a, b| a.cmp(&b), &mut walker);
    let second_layout = LayoutBuilder::new(&second.graph).build(|a, b| a.cmp(&b), &mut walker);
    assert_eq!(first_layout, second_layout);
    assert_eq!(first_layout.dump_string(), second_layout.dump_string());

    let mut scratch = NodeBitSet::new(first.graph.node_count());
    let heads = first.graph.heads();
    let mut first_index = BranchMembershipIndex::new(heads.iter().copied(), 16);
    let mut second_index = BranchMembershipIndex::new(heads.iter().copied(), 16);
    for node in first.graph.nodes() {
        let a = first_index
            .membership(&first.graph, node, &mut walker, &mut scratch)
            .heads()
            .to_vec();
        let b = second_index
            .membership(&second.graph, node, &mut walker, &mut scratch)
            .heads()
            .to_vec();
        assert_eq!(a, b);
    }
}

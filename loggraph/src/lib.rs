//! In-memory commit graph engine for version-control log viewers.
//!
//! A log viewer needs three things from a commit history: the topology
//! itself, a lane assignment to draw branch lines, and an answer to
//! "which branches contain this commit". This crate bundles the loggraph
//! engine that provides all three:
//!
//! - [`GraphBuilder`] turns the ordered commit/parent records delivered by
//!   a VCS query into an immutable [`CommitGraph`] with dense node ids,
//!   tolerating partially fetched histories via [`NotLoadedParents`];
//! - [`LayoutBuilder`] partitions the (visible) nodes into lanes, driven
//!   by a caller-supplied head order;
//! - [`BranchMembershipIndex`] answers containment queries behind a
//!   bounded generational cache.
//!
//! All traversal is iterative, so histories with hundreds of thousands of
//! commits walk without recursion, and all mutable traversal state
//! ([`DfsWalker`], the scratch vector of [`NodeFlagSets`]) is caller-owned
//! and explicitly passed, so thread confinement is visible in the
//! signatures while the built results stay freely shareable.
//!
//! ```
//! use loggraph::{
//!     BranchMembershipIndex, DfsWalker, GraphBuilder, LayoutBuilder, NodeFlagSets,
//! };
//!
//! // The diamond merge: a <- {b, c} <- d.
//! let mut builder = GraphBuilder::new();
//! builder.add_commit("d", ["b", "c"]);
//! builder.add_commit("c", ["a"]);
//! builder.add_commit("b", ["a"]);
//! builder.add_commit("a", []);
//! let built = builder.finish();
//! let graph = built.graph;
//!
//! let mut walker = DfsWalker::with_capacity(graph.node_count());
//! let mut flags = NodeFlagSets::new(graph.node_count());
//!
//! // One head, one lane.
//! let layout = LayoutBuilder::new(&graph).build(|a, b| a.cmp(&b), &mut walker);
//! assert_eq!(layout.lane_count(), 1);
//!
//! // Every commit is on d's branch.
//! let mut branches = BranchMembershipIndex::from_commit_ids(&graph, ["d"], 64)?;
//! let root = graph.node_of(&"a").unwrap();
//! let membership = branches.membership(&graph, root, &mut walker, flags.scratch_mut());
//! assert_eq!(membership.heads(), &[graph.node_of(&"d").unwrap()]);
//! # Ok::<(), loggraph::MembershipError<&'static str>>(())
//! ```

pub use loggraph_core::{
    BuiltGraph, CommitGraph, CommitId, CommitRecord, DfsWalker, GraphBuilder, NodeBitSet,
    NodeFlagSets, NodeId, NotLoadedParents, WalkControl,
};

pub use loggraph_algos::{
    BranchMembership, BranchMembershipIndex, GenerationalMap, Lane, Layout, LayoutBuilder,
    MembershipError,
};

/// The data-structure layer: graph, builder, flags, walker.
pub mod core {
    pub use loggraph_core::*;
}

/// The algorithm layer: lane layout, branch membership, the generational
/// cache.
pub mod algos {
    pub use loggraph_algos::*;
}

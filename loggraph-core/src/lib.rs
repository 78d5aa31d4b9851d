//! In-memory commit graph indexing for version-control log viewers.
//!
//! This crate contains the data-structure layer of the loggraph engine:
//! dense node indexing over raw commit records, per-node flag vectors, and
//! an iterative depth-first traversal primitive that the algorithm crates
//! build on. See the [`loggraph`](https://docs.rs/loggraph) umbrella crate
//! for the full engine.
//!
//! A graph is built once from the ordered commit list and is immutable
//! afterwards; every refresh of the underlying history discards and
//! rebuilds it. Histories are routinely only partially fetched, so parent
//! references that cannot be resolved are reported as a boundary map
//! rather than treated as errors.

pub mod builder;
pub mod core;
pub mod flags;
pub mod graph;
mod render;
pub mod walk;

pub use crate::builder::{BuiltGraph, CommitRecord, GraphBuilder, NotLoadedParents};
pub use crate::core::{CommitId, NodeId};
pub use crate::flags::{NodeBitSet, NodeFlagSets};
pub use crate::graph::CommitGraph;
pub use crate::walk::{DfsWalker, WalkControl};

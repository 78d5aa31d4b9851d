//! Algorithms over a built commit graph: lane layout for rendering and
//! branch membership queries.
//!
//! Both consume the immutable [`CommitGraph`](loggraph_core::CommitGraph)
//! from [`loggraph-core`](loggraph_core) and drive its iterative walker;
//! neither mutates the graph. See the
//! [`loggraph`](https://docs.rs/loggraph) umbrella crate for the full
//! engine.

pub mod cache;
pub mod layout;
pub mod membership;

pub use crate::cache::GenerationalMap;
pub use crate::layout::{Lane, Layout, LayoutBuilder};
pub use crate::membership::{BranchMembership, BranchMembershipIndex, MembershipError};

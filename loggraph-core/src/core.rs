//! Definitions for the core index types used in the commit graph.
//!
//! These types are re-exported in the root of the crate.

use derive_more::From;

/// A handle to a node in a [`CommitGraph`].
///
/// Node ids are dense: a graph with `n` nodes uses exactly the ids `0..n`,
/// assigned by input position during the build. Ids are only meaningful
/// within the graph instance that produced them; a rebuild assigns fresh
/// ids.
///
/// [`CommitGraph`]: crate::graph::CommitGraph
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, From)]
pub struct NodeId(u32);

impl NodeId {
    /// Creates a node id from a dense index.
    ///
    /// # Panics
    ///
    /// Panics if `index` does not fit the id representation.
    #[inline]
    #[must_use]
    pub fn new(index: usize) -> Self {
        assert!(
            u32::try_from(index).is_ok(),
            "node index {index} overflows the id representation"
        );
        Self(index as u32)
    }

    /// Returns the dense index of the node.
    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A trait for the opaque commit identifiers delivered by the VCS log
/// provider.
///
/// The engine never inspects identifiers beyond equality, ordering and
/// hashing; hashes, human-readable revision names and test strings all
/// qualify.
pub trait CommitId: Clone + Eq + Ord + std::hash::Hash + std::fmt::Debug {}

impl<T: Clone + Eq + Ord + std::hash::Hash + std::fmt::Debug> CommitId for T {}

impl std::fmt::Debug for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("NodeId").field(&self.index()).finish()
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as std::fmt::Debug>::fmt(self, f)
    }
}

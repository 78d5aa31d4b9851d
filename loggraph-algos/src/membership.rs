//! Branch membership: which branch heads contain a given commit.
//!
//! The naive answer costs O(heads × reachable-subgraph) per query. The
//! index instead runs one parent-edge DFS per head, appending the head to
//! every node it reaches, and fronts per-node answers with a bounded
//! [`GenerationalMap`] so that interactive re-queries for already visible
//! rows never recompute. The per-head pass is deferred until the first
//! query; an index built for a graph nobody asks about costs nothing.

use thiserror::Error;

use loggraph_core::{CommitGraph, CommitId, DfsWalker, NodeBitSet, NodeId, WalkControl};

use crate::cache::GenerationalMap;

/// The set of branch heads that reach one node via parent edges.
///
/// Heads are stored ascending-sorted; the set is immutable once computed
/// and cheap to clone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BranchMembership {
    heads: Vec<NodeId>,
}

impl BranchMembership {
    /// Returns `true` if `head` reaches the node this set was computed for.
    #[must_use]
    pub fn contains(&self, head: NodeId) -> bool {
        self.heads.binary_search(&head).is_ok()
    }

    /// Returns the containing heads, ascending-sorted.
    #[must_use]
    pub fn heads(&self) -> &[NodeId] {
        &self.heads
    }

    /// Returns the number of containing heads.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heads.len()
    }

    /// Returns `true` if no head reaches the node.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heads.is_empty()
    }
}

/// Errors from resolving branch head identifiers against a graph.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum MembershipError<Id> {
    /// A head identifier was not found among the loaded commits. With a
    /// partially fetched history the caller decides whether to fetch more
    /// or drop the ref.
    #[error("head commit {0:?} is not part of the loaded history")]
    UnknownHead(Id),
}

/// Lazily built index from node to containing branch heads.
///
/// Construction records the head set only. The first
/// [`membership`](Self::membership) query runs the per-head DFS pass and
/// keeps the per-node head lists for the lifetime of the index; individual
/// answers are packaged on demand and cached generationally. Like every
/// mutable traversal state in this engine, an index is confined to one
/// thread; the [`BranchMembership`] values it hands out are immutable and
/// freely shareable.
#[derive(Clone, Debug)]
pub struct BranchMembershipIndex {
    /// Heads to index, ascending-sorted and deduplicated.
    heads: Vec<NodeId>,
    /// Per-node containing heads, filled by the first query.
    node_heads: Option<Vec<Vec<NodeId>>>,
    /// Bounded cache of packaged per-node answers.
    cache: GenerationalMap<NodeId, BranchMembership>,
    /// Reusable list of scratch bits set during one head's pass.
    touched: Vec<NodeId>,
}

impl BranchMembershipIndex {
    /// Creates an index over the given branch heads.
    ///
    /// Heads are deduplicated and processed in ascending id order.
    /// `cache_capacity` bounds each generation of the query cache; see
    /// [`GenerationalMap`].
    #[must_use]
    pub fn new(heads: impl IntoIterator<Item = NodeId>, cache_capacity: usize) -> Self {
        let mut heads: Vec<NodeId> = heads.into_iter().collect();
        heads.sort_unstable();
        heads.dedup();
        Self {
            heads,
            node_heads: None,
            cache: GenerationalMap::new(cache_capacity),
            touched: Vec::new(),
        }
    }

    /// Creates an index from external head commit identifiers (branch
    /// refs), resolving each against the graph.
    ///
    /// # Errors
    ///
    /// Returns [`MembershipError::UnknownHead`] for the first identifier
    /// that is not part of the loaded history.
    pub fn from_commit_ids<Id: CommitId>(
        graph: &CommitGraph<Id>,
        ids: impl IntoIterator<Item = Id>,
        cache_capacity: usize,
    ) -> Result<Self, MembershipError<Id>> {
        let heads = ids
            .into_iter()
            .map(|id| graph.node_of(&id).ok_or(MembershipError::UnknownHead(id)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(heads, cache_capacity))
    }

    /// Returns the indexed heads, ascending-sorted.
    #[must_use]
    pub fn heads(&self) -> &[NodeId] {
        &self.heads
    }

    /// Returns the cached answer for `node` without computing anything.
    #[must_use]
    pub fn cached(&self, node: NodeId) -> Option<&BranchMembership> {
        self.cache.get(&node)
    }

    /// Returns the heads containing `node`.
    ///
    /// The first call runs one DFS per head over parent edges, borrowing
    /// `scratch` per the usual contract (all-false in, all-false out) and
    /// reusing `walker`'s stack across heads.
    ///
    /// # Panics
    ///
    /// Panics if `node` or any indexed head is out of range for `graph`,
    /// or if `scratch` is not sized to it.
    pub fn membership<Id: CommitId>(
        &mut self,
        graph: &CommitGraph<Id>,
        node: NodeId,
        walker: &mut DfsWalker,
        scratch: &mut NodeBitSet,
    ) -> &BranchMembership {
        assert!(
            node.index() < graph.node_count(),
            "node index {} out of range for graph of {} nodes",
            node.index(),
            graph.node_count()
        );
        if self.node_heads.is_none() {
            self.build_lists(graph, walker, scratch);
        }
        if self.cache.get(&node).is_none() {
            let heads = self
                .node_heads
                .as_ref()
                .map(|lists| lists[node.index()].clone())
                .expect("index lists built above");
            self.cache.insert(node, BranchMembership { heads });
        }
        self.cache.get(&node).expect("inserted above")
    }

    /// The per-head pass: one DFS per head over parent edges, appending
    /// the head to every node it reaches. Heads run in ascending order, so
    /// the per-node lists come out sorted without a second pass.
    fn build_lists<Id: CommitId>(
        &mut self,
        graph: &CommitGraph<Id>,
        walker: &mut DfsWalker,
        scratch: &mut NodeBitSet,
    ) {
        debug_assert!(scratch.is_clear(), "scratch vector borrowed dirty");
        let mut lists: Vec<Vec<NodeId>> = vec![Vec::new(); graph.node_count()];
        let mut touched = std::mem::take(&mut self.touched);
        for &head in &self.heads {
            walker.walk(
                head,
                |node| graph.parents(node).iter().copied(),
                |node| {
                    if scratch.get(node) {
                        return WalkControl::SkipSubtree;
                    }
                    scratch.set(node, true);
                    touched.push(node);
                    lists[node.index()].push(head);
                    WalkControl::Continue
                },
            );
            // Restore the scratch contract before the next head's pass.
            for &node in &touched {
                scratch.set(node, false);
            }
            touched.clear();
        }
        self.touched = touched;
        self.node_heads = Some(lists);
    }
}

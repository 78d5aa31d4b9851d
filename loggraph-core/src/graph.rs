//! The immutable commit graph and its query surface.

use fxhash::FxHashMap;

use crate::core::{CommitId, NodeId};
use crate::flags::NodeBitSet;

/// A built commit graph.
///
/// The graph is immutable once produced by
/// [`GraphBuilder::finish`](crate::builder::GraphBuilder::finish): there are
/// no mutation methods, so a finished graph is safe for unlimited
/// concurrent reads. When the underlying commit list changes the graph is
/// discarded and rebuilt wholesale; node ids are not stable across builds.
///
/// Adjacency is stored flattened: one edge array per direction plus a span
/// table indexed by node id. Per-node edge lists are small (average
/// branching degree is low) and ascending-sorted, so queries return slices
/// callers can scan linearly and iterate deterministically.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommitGraph<Id: std::hash::Hash + std::cmp::Eq> {
    /// Commit identifier of each node, indexed by node id.
    ids: Vec<Id>,
    /// Reverse lookup from commit identifier to node id.
    lookup: FxHashMap<Id, NodeId>,
    /// Span table into `parent_edges`, `node_count + 1` entries.
    parent_spans: Vec<u32>,
    /// Flattened parent adjacency, ascending-sorted per node.
    parent_edges: Vec<NodeId>,
    /// Span table into `child_edges`, `node_count + 1` entries.
    child_spans: Vec<u32>,
    /// Flattened child adjacency, ascending-sorted per node.
    child_edges: Vec<NodeId>,
}

impl<Id: CommitId> CommitGraph<Id> {
    /// Assembles a graph from per-node edge lists. Lists must already be
    /// ascending-sorted; the builder guarantees this.
    pub(crate) fn new(
        ids: Vec<Id>,
        lookup: FxHashMap<Id, NodeId>,
        parents: Vec<Vec<NodeId>>,
        children: Vec<Vec<NodeId>>,
    ) -> Self {
        debug_assert_eq!(ids.len(), parents.len());
        debug_assert_eq!(ids.len(), children.len());
        let (parent_spans, parent_edges) = flatten(parents);
        let (child_spans, child_edges) = flatten(children);
        Self {
            ids,
            lookup,
            parent_spans,
            parent_edges,
            child_spans,
            child_edges,
        }
    }

    /// Returns the number of nodes in the graph.
    #[inline]
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.ids.len()
    }

    /// Returns `true` if the graph has no nodes.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterates over all node ids in ascending order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + use<Id> {
        (0..self.node_count()).map(NodeId::new)
    }

    /// Returns the commit identifier of `node`.
    #[must_use]
    pub fn commit_id(&self, node: NodeId) -> &Id {
        self.assert_in_range(node);
        &self.ids[node.index()]
    }

    /// Resolves a commit identifier to its node id, if the commit is part
    /// of the graph.
    #[must_use]
    pub fn node_of(&self, id: &Id) -> Option<NodeId> {
        self.lookup.get(id).copied()
    }

    /// Returns the resolved parents of `node`, ascending-sorted.
    ///
    /// Parents outside the loaded history do not appear here; they are
    /// reported through
    /// [`NotLoadedParents`](crate::builder::NotLoadedParents) instead.
    #[must_use]
    pub fn parents(&self, node: NodeId) -> &[NodeId] {
        self.assert_in_range(node);
        let (lo, hi) = span(&self.parent_spans, node);
        &self.parent_edges[lo..hi]
    }

    /// Returns the children of `node` (nodes listing it as a parent),
    /// ascending-sorted.
    #[must_use]
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.assert_in_range(node);
        let (lo, hi) = span(&self.child_spans, node);
        &self.child_edges[lo..hi]
    }

    /// Returns the nodes with no incoming child edge, i.e. the branch
    /// tips of the full graph, in ascending id order.
    #[must_use]
    pub fn heads(&self) -> Vec<NodeId> {
        self.nodes().filter(|&n| self.children(n).is_empty()).collect()
    }

    /// Returns the visible nodes with no *visible* incoming child edge, in
    /// ascending id order.
    ///
    /// # Panics
    ///
    /// Panics if `visible` is not sized to this graph.
    #[must_use]
    pub fn heads_in(&self, visible: &NodeBitSet) -> Vec<NodeId> {
        self.assert_flag_len(visible);
        visible
            .ones()
            .filter(|&n| self.children(n).iter().all(|&c| !visible.get(c)))
            .collect()
    }

    /// Sets the flag in `out` for every linear node: exactly one parent and
    /// exactly one child. These are the nodes eligible for linear-branch
    /// simplification; callers typically target the structural vector of
    /// [`NodeFlagSets`](crate::flags::NodeFlagSets). Bits for non-linear
    /// nodes are left untouched.
    ///
    /// # Panics
    ///
    /// Panics if `out` is not sized to this graph.
    pub fn mark_linear_nodes(&self, out: &mut NodeBitSet) {
        self.assert_flag_len(out);
        for node in self.nodes() {
            if self.parents(node).len() == 1 && self.children(node).len() == 1 {
                out.set(node, true);
            }
        }
    }

    #[inline]
    fn assert_in_range(&self, node: NodeId) {
        assert!(
            node.index() < self.node_count(),
            "node index {} out of range for graph of {} nodes",
            node.index(),
            self.node_count()
        );
    }

    #[inline]
    fn assert_flag_len(&self, flags: &NodeBitSet) {
        assert!(
            flags.len() == self.node_count(),
            "flag vector covers {} nodes, graph has {}",
            flags.len(),
            self.node_count()
        );
    }
}

/// Flattens per-node edge lists into a span table and a single edge array.
fn flatten(lists: Vec<Vec<NodeId>>) -> (Vec<u32>, Vec<NodeId>) {
    let mut spans = Vec::with_capacity(lists.len() + 1);
    let mut edges = Vec::with_capacity(lists.iter().map(Vec::len).sum());
    spans.push(0);
    for list in lists {
        edges.extend_from_slice(&list);
        spans.push(u32::try_from(edges.len()).expect("edge count overflows span table"));
    }
    (spans, edges)
}

#[inline]
fn span(spans: &[u32], node: NodeId) -> (usize, usize) {
    (
        spans[node.index()] as usize,
        spans[node.index() + 1] as usize,
    )
}

#[cfg(test)]
pub(crate) mod test {
    use rstest::rstest;

    use crate::builder::GraphBuilder;
    use crate::core::NodeId;
    use crate::flags::NodeBitSet;

    use super::CommitGraph;

    /// The diamond merge: `A[]`, `B[A]`, `C[A]`, `D[B, C]`.
    pub(crate) fn diamond() -> CommitGraph<&'static str> {
        let mut builder = GraphBuilder::new();
        builder.add_commit("a", []);
        builder.add_commit("b", ["a"]);
        builder.add_commit("c", ["a"]);
        builder.add_commit("d", ["b", "c"]);
        builder.finish().graph
    }

    fn ids(indices: impl IntoIterator<Item = usize>) -> Vec<NodeId> {
        indices.into_iter().map(NodeId::new).collect()
    }

    #[test]
    fn diamond_queries() {
        let g = diamond();
        assert_eq!(g.node_count(), 4);
        assert_eq!(g.parents(NodeId::new(0)), &[]);
        assert_eq!(g.parents(NodeId::new(3)), ids([1, 2]).as_slice());
        assert_eq!(g.children(NodeId::new(0)), ids([1, 2]).as_slice());
        assert_eq!(g.children(NodeId::new(3)), &[]);
        assert_eq!(g.commit_id(NodeId::new(2)), &"c");
        assert_eq!(g.node_of(&"d"), Some(NodeId::new(3)));
        assert_eq!(g.node_of(&"nope"), None);
    }

    #[test]
    fn diamond_heads() {
        assert_eq!(diamond().heads(), ids([3]));
    }

    #[test]
    fn heads_in_respects_visibility() {
        let g = diamond();
        let mut visible = NodeBitSet::new(g.node_count());
        visible.set_all(true);
        assert_eq!(g.heads_in(&visible), ids([3]));
        // Hiding the merge makes both of its parents tips.
        visible.set(NodeId::new(3), false);
        assert_eq!(g.heads_in(&visible), ids([1, 2]));
    }

    #[rstest]
    #[case::source(0, false)]
    #[case::linear_left(1, true)]
    #[case::linear_right(2, true)]
    #[case::merge(3, false)]
    fn linear_marking(#[case] node: usize, #[case] linear: bool) {
        let g = diamond();
        let mut out = NodeBitSet::new(g.node_count());
        g.mark_linear_nodes(&mut out);
        assert_eq!(out.get(NodeId::new(node)), linear);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn out_of_range_query_panics() {
        diamond().parents(NodeId::new(4));
    }

    #[test]
    fn empty_graph() {
        let g: CommitGraph<&str> = GraphBuilder::new().finish().graph;
        assert!(g.is_empty());
        assert_eq!(g.node_count(), 0);
        assert!(g.heads().is_empty());
    }
}

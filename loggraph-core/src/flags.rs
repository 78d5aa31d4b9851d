//! Per-node boolean flag storage.
//!
//! A built graph is accompanied by three independent bit vectors indexed by
//! [`NodeId`]: the *visible* set (active subgraph after filtering), the
//! *structural* set (marks simplification-eligible linear nodes) and the
//! *scratch* set (borrowed and restored by traversal algorithms).

use bitvec::prelude::*;

use crate::core::NodeId;

/// A fixed-size boolean vector indexed by [`NodeId`].
///
/// The vector is sized exactly to the node count of the graph it
/// accompanies. Indexing outside `[0, len)` is a programming error and
/// panics; it is never clamped, since a wrong index would otherwise corrupt
/// unrelated algorithm state invisibly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeBitSet {
    bits: BitVec,
}

impl NodeBitSet {
    /// Creates an all-false vector covering `len` nodes.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            bits: bitvec![0; len],
        }
    }

    /// Returns the number of nodes covered by the vector.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Returns `true` if the vector covers no nodes.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Returns the flag for `node`.
    #[inline]
    #[must_use]
    pub fn get(&self, node: NodeId) -> bool {
        self.assert_in_range(node);
        self.bits[node.index()]
    }

    /// Sets the flag for `node`.
    #[inline]
    pub fn set(&mut self, node: NodeId, value: bool) {
        self.assert_in_range(node);
        self.bits.set(node.index(), value);
    }

    /// Sets every flag to `value`.
    pub fn set_all(&mut self, value: bool) {
        self.bits.fill(value);
    }

    /// Resets every flag to `false`.
    pub fn clear(&mut self) {
        self.bits.fill(false);
    }

    /// Returns the number of set flags.
    #[must_use]
    pub fn count_ones(&self) -> usize {
        self.bits.count_ones()
    }

    /// Returns `true` if no flag is set.
    #[must_use]
    pub fn is_clear(&self) -> bool {
        self.bits.not_any()
    }

    /// Iterates over the nodes whose flag is set, in ascending id order.
    pub fn ones(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.bits.iter_ones().map(NodeId::new)
    }

    #[inline]
    fn assert_in_range(&self, node: NodeId) {
        assert!(
            node.index() < self.bits.len(),
            "node index {} out of range for flag vector of {} nodes",
            node.index(),
            self.bits.len()
        );
    }
}

/// The three per-node flag vectors accompanying a built graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeFlagSets {
    visible: NodeBitSet,
    structural: NodeBitSet,
    scratch: NodeBitSet,
}

impl NodeFlagSets {
    /// Allocates all three vectors for a graph of `node_count` nodes, all
    /// flags false.
    #[must_use]
    pub fn new(node_count: usize) -> Self {
        Self {
            visible: NodeBitSet::new(node_count),
            structural: NodeBitSet::new(node_count),
            scratch: NodeBitSet::new(node_count),
        }
    }

    /// Returns the number of nodes covered by each vector.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.visible.len()
    }

    /// The active subgraph after filtering.
    #[must_use]
    pub fn visible(&self) -> &NodeBitSet {
        &self.visible
    }

    /// Mutable access to the visible set.
    pub fn visible_mut(&mut self) -> &mut NodeBitSet {
        &mut self.visible
    }

    /// Marks for simplification-eligible linear nodes.
    #[must_use]
    pub fn structural(&self) -> &NodeBitSet {
        &self.structural
    }

    /// Mutable access to the structural set.
    pub fn structural_mut(&mut self) -> &mut NodeBitSet {
        &mut self.structural
    }

    /// The shared traversal scratch vector.
    #[must_use]
    pub fn scratch(&self) -> &NodeBitSet {
        &self.scratch
    }

    /// Borrows the scratch vector for a traversal pass.
    ///
    /// Contract: the vector is all-false when borrowed, and the borrower
    /// must reset every bit it touched back to false before returning
    /// control, so the next borrower starts from an all-false vector
    /// without a fresh allocation.
    pub fn scratch_mut(&mut self) -> &mut NodeBitSet {
        debug_assert!(self.scratch.is_clear(), "scratch vector borrowed dirty");
        &mut self.scratch
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn get_set_roundtrip() {
        let mut set = NodeBitSet::new(8);
        assert!(!set.get(NodeId::new(3)));
        set.set(NodeId::new(3), true);
        assert!(set.get(NodeId::new(3)));
        assert_eq!(set.count_ones(), 1);
        set.set(NodeId::new(3), false);
        assert!(set.is_clear());
    }

    #[test]
    fn ones_iterates_ascending() {
        let mut set = NodeBitSet::new(10);
        for i in [7, 2, 5] {
            set.set(NodeId::new(i), true);
        }
        let ones: Vec<_> = set.ones().map(NodeId::index).collect();
        assert_eq!(ones, vec![2, 5, 7]);
    }

    #[test]
    fn set_all_and_clear() {
        let mut set = NodeBitSet::new(5);
        set.set_all(true);
        assert_eq!(set.count_ones(), 5);
        set.clear();
        assert!(set.is_clear());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn get_out_of_range_panics() {
        let set = NodeBitSet::new(4);
        set.get(NodeId::new(4));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn set_out_of_range_panics() {
        let mut set = NodeBitSet::new(0);
        set.set(NodeId::new(0), true);
    }

    #[test]
    fn flag_sets_are_independent() {
        let mut flags = NodeFlagSets::new(4);
        flags.visible_mut().set(NodeId::new(1), true);
        flags.structural_mut().set(NodeId::new(2), true);
        assert!(flags.visible().get(NodeId::new(1)));
        assert!(!flags.structural().get(NodeId::new(1)));
        assert!(flags.structural().get(NodeId::new(2)));
        assert!(flags.scratch().is_clear());
    }
}

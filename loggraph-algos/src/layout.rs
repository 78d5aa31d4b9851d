//! Lane layout: partitioning nodes into visual branch lines.

use std::cmp::Ordering;

use itertools::Itertools;
use loggraph_core::{CommitGraph, CommitId, DfsWalker, NodeBitSet, NodeId, WalkControl};

/// Sentinel for a node outside the laid-out (visible) set.
const LANE_NONE: u32 = u32::MAX;

/// A visual lane index: the branch column a node is drawn in.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Lane(u32);

impl Lane {
    /// Creates a lane from its index.
    ///
    /// # Panics
    ///
    /// Panics if `index` does not fit the lane representation.
    #[inline]
    #[must_use]
    pub fn new(index: usize) -> Self {
        assert!(
            u32::try_from(index).is_ok() && index as u32 != LANE_NONE,
            "lane index {index} overflows the lane representation"
        );
        Self(index as u32)
    }

    /// Returns the lane index.
    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Debug for Lane {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Lane").field(&self.index()).finish()
    }
}

impl std::fmt::Display for Lane {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as std::fmt::Debug>::fmt(self, f)
    }
}

/// The lane assignment produced by [`LayoutBuilder::build`].
///
/// Immutable once built; rebuilt from scratch together with its graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    /// Lane per node, `LANE_NONE` for nodes outside the visible set.
    lanes: Vec<u32>,
    /// Heads in comparator order with their lanes.
    heads: Vec<(NodeId, Lane)>,
}

impl Layout {
    /// Returns the lane of `node`, or `None` if the node was outside the
    /// visible set when the layout was built.
    #[must_use]
    pub fn lane(&self, node: NodeId) -> Option<Lane> {
        assert!(
            node.index() < self.lanes.len(),
            "node index {} out of range for layout of {} nodes",
            node.index(),
            self.lanes.len()
        );
        match self.lanes[node.index()] {
            LANE_NONE => None,
            lane => Some(Lane::new(lane as usize)),
        }
    }

    /// Returns the heads in comparator order, each with the lane it leads.
    #[must_use]
    pub fn heads(&self) -> &[(NodeId, Lane)] {
        &self.heads
    }

    /// Returns the number of lanes, one per head.
    #[must_use]
    pub fn lane_count(&self) -> usize {
        self.heads.len()
    }

    /// Returns the number of nodes covered by the layout.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.lanes.len()
    }

    /// Renders the layout as one line per node plus one line per head, for
    /// golden tests. No compatibility guarantee.
    #[must_use]
    pub fn dump_string(&self) -> String {
        let mut out = String::new();
        for (index, &lane) in self.lanes.iter().enumerate() {
            match lane {
                LANE_NONE => out.push_str(&format!("{index}: lane=-\n")),
                lane => out.push_str(&format!("{index}: lane={lane}\n")),
            }
        }
        for &(head, lane) in &self.heads {
            out.push_str(&format!("head {}: lane={}\n", head.index(), lane.index()));
        }
        out
    }
}

/// Assigns every (visible) node to a lane.
///
/// Heads (visible nodes with no visible incoming child edge) are visited
/// in the order of a caller-supplied comparator, typically commit recency
/// with a stable tiebreaker. Each head starts a new lane and claims every
/// node it can reach over parent edges that no earlier lane claimed;
/// first-claim wins, so shared ancestors keep the lane of whichever head
/// reached them first. Within a lane, parents are descended in ascending
/// id order (mainline before merge parents), which the walker's LIFO
/// contract turns into reverse push order.
pub struct LayoutBuilder<'g, Id: std::hash::Hash + std::cmp::Eq> {
    graph: &'g CommitGraph<Id>,
    visible: Option<&'g NodeBitSet>,
}

impl<'g, Id: CommitId> LayoutBuilder<'g, Id> {
    /// Creates a builder laying out the whole graph.
    #[must_use]
    pub fn new(graph: &'g CommitGraph<Id>) -> Self {
        Self {
            graph,
            visible: None,
        }
    }

    /// Restricts the layout to the visible subgraph: hidden nodes get no
    /// lane and are not traversed through.
    ///
    /// # Panics
    ///
    /// Panics if `visible` is not sized to the graph.
    #[must_use]
    pub fn visible_only(mut self, visible: &'g NodeBitSet) -> Self {
        assert!(
            visible.len() == self.graph.node_count(),
            "visible set covers {} nodes, graph has {}",
            visible.len(),
            self.graph.node_count()
        );
        self.visible = Some(visible);
        self
    }

    /// Builds the layout, deciding head order with `order`.
    ///
    /// The comparator must be a total order over node ids; it is a
    /// required external input (commit recency is not derivable from the
    /// graph), and together with the parent push order it makes the
    /// result fully deterministic.
    #[must_use]
    pub fn build(
        self,
        mut order: impl FnMut(NodeId, NodeId) -> Ordering,
        walker: &mut DfsWalker,
    ) -> Layout {
        let graph = self.graph;
        let visible = self.visible;
        let mut lanes = vec![LANE_NONE; graph.node_count()];
        let heads = match visible {
            Some(set) => graph.heads_in(set),
            None => graph.heads(),
        };
        let heads = heads
            .into_iter()
            .sorted_by(|&a, &b| order(a, b))
            .enumerate()
            .map(|(index, head)| (head, Lane::new(index)))
            .collect_vec();
        for &(head, lane) in &heads {
            walker.walk(
                head,
                |node| graph.parents(node).iter().rev().copied(),
                |node| {
                    if visible.is_some_and(|set| !set.get(node)) {
                        return WalkControl::SkipSubtree;
                    }
                    if lanes[node.index()] != LANE_NONE {
                        // Claimed by an earlier lane; do not descend.
                        return WalkControl::SkipSubtree;
                    }
                    lanes[node.index()] = lane.index() as u32;
                    WalkControl::Continue
                },
            );
        }
        Layout { lanes, heads }
    }
}

//! Building a [`CommitGraph`] from raw commit records.
//!
//! The builder consumes the ordered record sequence delivered by the
//! upstream VCS query (it does not re-sort) and produces the dense-id
//! graph together with the not-loaded-parent map describing the boundary
//! of a partially fetched history.

use fxhash::FxHashMap;
use indexmap::IndexMap;

use crate::core::{CommitId, NodeId};
use crate::graph::CommitGraph;

/// One raw commit as delivered by the VCS log provider: an opaque
/// identifier plus the ordered list of parent identifiers.
///
/// Parent order is semantically meaningful (first parent vs. merge
/// parents). Duplicate parent identifiers within one record are collapsed
/// by the builder, preserving first-seen order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommitRecord<Id> {
    /// The commit identifier.
    pub id: Id,
    /// Identifiers of the commit's parents, in VCS order.
    pub parents: Vec<Id>,
}

impl<Id: CommitId> CommitRecord<Id> {
    /// Creates a record from an identifier and its parent identifiers.
    pub fn new(id: Id, parents: impl IntoIterator<Item = Id>) -> Self {
        Self {
            id,
            parents: parents.into_iter().collect(),
        }
    }
}

/// Parents that could not be resolved to a node, keyed by the node that
/// listed them.
///
/// A missing parent is the expected boundary of a partially fetched
/// history, not an error; downstream code can use these entries to trigger
/// further fetching. Iteration order is the node order of the build, and
/// each node's unresolved identifiers keep their first-seen record order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NotLoadedParents<Id> {
    entries: IndexMap<NodeId, Vec<Id>>,
}

impl<Id: CommitId> NotLoadedParents<Id> {
    /// Returns `true` if every parent reference was resolved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of nodes with at least one unresolved parent.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns the unresolved parent identifiers of `node`, in first-seen
    /// order. Empty for fully resolved nodes.
    #[must_use]
    pub fn get(&self, node: NodeId) -> &[Id] {
        self.entries.get(&node).map_or(&[], Vec::as_slice)
    }

    /// Iterates over `(node, unresolved parents)` pairs in node order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &[Id])> + '_ {
        self.entries.iter().map(|(&n, ids)| (n, ids.as_slice()))
    }
}

/// The output of a build: the immutable graph plus the not-loaded-parent
/// map.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuiltGraph<Id: std::hash::Hash + std::cmp::Eq> {
    /// The built graph.
    pub graph: CommitGraph<Id>,
    /// Parent references pointing outside the loaded history.
    pub not_loaded: NotLoadedParents<Id>,
}

/// Accumulates commit records and builds a [`CommitGraph`].
///
/// ```
/// use loggraph_core::{GraphBuilder, NodeId};
///
/// let mut builder = GraphBuilder::new();
/// builder.add_commit("tip", ["base"]);
/// builder.add_commit("base", []);
/// let built = builder.finish();
/// assert_eq!(built.graph.node_count(), 2);
/// assert_eq!(built.graph.parents(NodeId::new(0)), &[NodeId::new(1)]);
/// ```
#[derive(Clone, Debug)]
pub struct GraphBuilder<Id> {
    records: Vec<CommitRecord<Id>>,
}

impl<Id: CommitId> GraphBuilder<Id> {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Creates a builder expecting around `commits` records.
    #[must_use]
    pub fn with_capacity(commits: usize) -> Self {
        Self {
            records: Vec::with_capacity(commits),
        }
    }

    /// Appends one commit record. Input order determines node ids.
    pub fn add_commit(&mut self, id: Id, parents: impl IntoIterator<Item = Id>) {
        self.records.push(CommitRecord::new(id, parents));
    }

    /// Appends an already assembled record.
    pub fn add_record(&mut self, record: CommitRecord<Id>) {
        self.records.push(record);
    }

    /// Builds the graph.
    ///
    /// Node ids are assigned by input position after dropping records whose
    /// identifier was already seen (first occurrence wins). Parent
    /// references that resolve to a known commit become edges; the rest are
    /// collected into [`NotLoadedParents`]. A commit listing itself as a
    /// parent keeps the node but drops that edge.
    #[must_use]
    pub fn finish(self) -> BuiltGraph<Id> {
        // Pass 1: dense ids and the identifier lookup table.
        let mut lookup = FxHashMap::default();
        lookup.reserve(self.records.len());
        let mut kept = Vec::with_capacity(self.records.len());
        for record in self.records {
            let next_id = NodeId::new(kept.len());
            if let std::collections::hash_map::Entry::Vacant(slot) =
                lookup.entry(record.id.clone())
            {
                slot.insert(next_id);
                kept.push(record);
            }
        }

        // Pass 2: resolve parents; unresolved ones go to the boundary map.
        let node_count = kept.len();
        let mut parents: Vec<Vec<NodeId>> = vec![Vec::new(); node_count];
        let mut children: Vec<Vec<NodeId>> = vec![Vec::new(); node_count];
        let mut not_loaded: IndexMap<NodeId, Vec<Id>> = IndexMap::new();
        for (index, record) in kept.iter().enumerate() {
            let node = NodeId::new(index);
            let resolved = &mut parents[index];
            let mut first_seen: Vec<&Id> = Vec::with_capacity(record.parents.len());
            for parent_id in &record.parents {
                // Collapse duplicate parent references, first-seen order.
                if first_seen.iter().any(|&seen| seen == parent_id) {
                    continue;
                }
                first_seen.push(parent_id);
                match lookup.get(parent_id) {
                    // A self-parent is tolerated input noise; drop the edge.
                    Some(&parent) if parent == node => {}
                    Some(&parent) => resolved.push(parent),
                    None => not_loaded
                        .entry(node)
                        .or_default()
                        .push(parent_id.clone()),
                }
            }
            resolved.sort_unstable();
        }

        // Pass 3: reverse edges. Ascending child ids fall out of the node
        // iteration order.
        for (index, resolved) in parents.iter().enumerate() {
            for &parent in resolved {
                children[parent.index()].push(NodeId::new(index));
            }
        }

        let ids = kept.into_iter().map(|record| record.id).collect();
        BuiltGraph {
            graph: CommitGraph::new(ids, lookup, parents, children),
            not_loaded: NotLoadedParents {
                entries: not_loaded,
            },
        }
    }
}

impl<Id: CommitId> Default for GraphBuilder<Id> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Id: CommitId> Extend<CommitRecord<Id>> for GraphBuilder<Id> {
    fn extend<T: IntoIterator<Item = CommitRecord<Id>>>(&mut self, iter: T) {
        self.records.extend(iter);
    }
}

//! Deterministic text dumps for golden-file comparison in tests.
//!
//! One line per node, or one character per node for bit vectors. The
//! format carries no backward-compatibility guarantee and is never
//! persisted; it exists so tests can pin topology with a snapshot.

use itertools::Itertools;

use crate::core::CommitId;
use crate::flags::NodeBitSet;
use crate::graph::CommitGraph;

impl<Id: CommitId> CommitGraph<Id> {
    /// Renders the graph as one line per node: dense id, sorted parent and
    /// child ids, and the commit identifier in its `Debug` form.
    #[must_use]
    pub fn dump_string(&self) -> String {
        let mut out = String::new();
        for node in self.nodes() {
            let parents = self.parents(node).iter().map(|p| p.index()).collect_vec();
            let children = self.children(node).iter().map(|c| c.index()).collect_vec();
            out.push_str(&format!(
                "{}: parents={parents:?} children={children:?} id={:?}\n",
                node.index(),
                self.commit_id(node),
            ));
        }
        out
    }
}

impl NodeBitSet {
    /// Renders the vector as one character per node: `#` set, `.` unset.
    #[must_use]
    pub fn dump_string(&self) -> String {
        self.ones()
            .fold(vec![b'.'; self.len()], |mut chars, node| {
                chars[node.index()] = b'#';
                chars
            })
            .into_iter()
            .map(char::from)
            .collect()
    }
}

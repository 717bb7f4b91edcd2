//! Stable ID newtype for synsets.
//!
//! A [`SynsetId`] is an arena index into the ontology's `StableGraph`. It is
//! the only way one synset (or a lemma) refers to another, so the cyclic
//! relation graph never needs shared ownership.

use std::fmt;

use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};

/// Stable synset identifier. Maps to a petgraph `NodeIndex<u32>`.
///
/// Ids stay valid until the synset is removed or merged away; the slot may
/// later be reused by a newly added synset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SynsetId(pub u32);

impl fmt::Display for SynsetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Bridge between SynsetId and petgraph's NodeIndex<u32>.

impl From<NodeIndex<u32>> for SynsetId {
    fn from(idx: NodeIndex<u32>) -> Self {
        SynsetId(idx.index() as u32)
    }
}

impl From<SynsetId> for NodeIndex<u32> {
    fn from(id: SynsetId) -> Self {
        NodeIndex::new(id.0 as usize)
    }
}

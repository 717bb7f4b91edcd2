//! Scoped synset insertion with guaranteed rollback.
//!
//! Search code that tries an insertion, explores below it, and then backs
//! out holds a [`ScopedInsertion`]. The inserted synset (and with it every
//! edge touching it) is removed when the guard drops, on every exit path
//! including `?` returns and panics that unwind.

use crate::error::OntologyError;
use crate::graph::OntologyGraph;
use crate::id::SynsetId;
use crate::relation::Relation;
use crate::synset::Synset;

/// A synset inserted under a single hypernym, removed again on drop.
///
/// The guard holds the graph exclusively; further work on the graph during
/// the scope goes through [`graph`](Self::graph).
#[derive(Debug)]
pub struct ScopedInsertion<'g> {
    graph: &'g mut OntologyGraph,
    id: SynsetId,
    committed: bool,
}

impl ScopedInsertion<'_> {
    /// The inserted synset's id.
    pub fn id(&self) -> SynsetId {
        self.id
    }

    /// The graph, with the insertion live.
    pub fn graph(&mut self) -> &mut OntologyGraph {
        &mut *self.graph
    }

    /// Read-only view of the graph with the insertion live.
    pub fn view(&self) -> &OntologyGraph {
        &*self.graph
    }

    /// Keeps the insertion permanently and releases the graph.
    pub fn commit(mut self) -> SynsetId {
        self.committed = true;
        self.id
    }
}

impl Drop for ScopedInsertion<'_> {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        if let Err(err) = self.graph.remove_synset(self.id) {
            tracing::warn!("failed to roll back scoped insertion {}: {}", self.id, err);
        }
    }
}

impl OntologyGraph {
    /// Inserts `synset` with one hypernym edge to `parent` and returns a
    /// guard that removes it again when dropped.
    ///
    /// If the edge cannot be added the synset is removed before the error is
    /// returned, leaving the graph as it was.
    pub fn insert_scoped(
        &mut self,
        synset: Synset,
        parent: SynsetId,
    ) -> Result<ScopedInsertion<'_>, OntologyError> {
        if !self.contains(parent) {
            return Err(OntologyError::SynsetNotFound { id: parent });
        }
        let id = self.add_synset(synset);
        if let Err(err) = self.add_relation(id, Relation::Hypernym, parent) {
            self.remove_synset(id)?;
            return Err(err);
        }
        Ok(ScopedInsertion {
            graph: self,
            id,
            committed: false,
        })
    }
}

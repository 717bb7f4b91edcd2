//! Core error types for lexigraph-core.
//!
//! Uses `thiserror` for structured, matchable error variants covering the
//! failure modes of the ontology graph.

use thiserror::Error;

use crate::id::SynsetId;

/// Errors produced by the lexigraph-core crate.
#[derive(Debug, Error)]
pub enum OntologyError {
    /// A synset id was not found in the graph.
    #[error("synset not found: SynsetId({id})", id = id.0)]
    SynsetNotFound { id: SynsetId },

    /// A mutation was rejected before touching the graph: merging synsets of
    /// different parts of speech, adding a self-loop, or creating a hypernym
    /// cycle.
    #[error("invalid operation: {reason}")]
    InvalidOperation { reason: String },
}

impl OntologyError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        OntologyError::InvalidOperation {
            reason: reason.into(),
        }
    }

    /// Returns `true` for [`OntologyError::InvalidOperation`].
    pub fn is_invalid_operation(&self) -> bool {
        matches!(self, OntologyError::InvalidOperation { .. })
    }
}

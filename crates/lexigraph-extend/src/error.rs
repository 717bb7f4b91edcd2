//! Error types for ontology extension.

use thiserror::Error;

use lexigraph_core::OntologyError;

/// Errors produced while planning or running an extension batch.
#[derive(Debug, Error)]
pub enum ExtendError {
    /// A batch entry carries malformed evidence.
    #[error("invalid evidence for '{term}': {reason}")]
    InvalidEvidence { term: String, reason: String },

    /// The same term appears twice in one batch.
    #[error("term '{term}' appears more than once in the batch")]
    DuplicateTerm { term: String },

    /// A graph mutation failed mid-search.
    #[error(transparent)]
    Ontology(#[from] OntologyError),
}

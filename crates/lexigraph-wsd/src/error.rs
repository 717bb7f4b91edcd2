//! Error types for sense disambiguation.

use thiserror::Error;

use lexigraph_core::{OntologyError, SynsetId};

/// Errors produced while carving or ranking.
#[derive(Debug, Error)]
pub enum WsdError {
    /// A ranker was configured with out-of-range parameters.
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// A token candidate does not exist in the graph the ranker was built on.
    #[error("unknown synset: SynsetId({id})", id = id.0)]
    UnknownSynset { id: SynsetId },

    #[error(transparent)]
    Ontology(#[from] OntologyError),
}

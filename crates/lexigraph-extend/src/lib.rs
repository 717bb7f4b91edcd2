//! Ontology extension: inserting batches of new terms under their most
//! likely parents.
//!
//! Both extenders share batch planning ([`plan`]) and attachment scoring
//! ([`scorer`]) and differ only in how they choose the insertion order.

pub mod branch_bound;
pub mod config;
pub mod error;
pub mod evidence;
pub mod greedy;
pub mod observer;
pub mod plan;
pub mod report;
pub mod scorer;

use lexigraph_core::OntologyGraph;

pub use branch_bound::BranchAndBoundExtender;
pub use config::ExtenderConfig;
pub use error::ExtendError;
pub use evidence::{CandidateParent, WordEvidence};
pub use greedy::GreedyExtender;
pub use observer::{BranchObserver, NoopObserver, PathSimilarityEvaluator};
pub use report::{CompletedBranch, ExtensionReport, Placement};
pub use scorer::{Attachment, AttachmentScorer, ImpliedEvidenceScorer, ResidualErrorScorer};

/// Inserts a batch of pending terms into the ontology.
///
/// Every accepted term ends up in the graph exactly once, with exactly one
/// hypernym edge to a synset that existed before the batch or belongs to it.
/// Excluded terms appear nowhere in the graph.
pub trait OntologyExtender {
    fn extend(
        &self,
        graph: &mut OntologyGraph,
        batch: &[WordEvidence],
        observer: &mut dyn BranchObserver,
    ) -> Result<ExtensionReport, ExtendError>;
}

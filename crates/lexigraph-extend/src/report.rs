//! Results of an extension batch.

use serde::{Deserialize, Serialize};

use lexigraph_core::SynsetId;

/// One term placed in the graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub term: String,
    /// The synset created for the term.
    pub synset: SynsetId,
    /// The hypernym it was attached under.
    pub parent: SynsetId,
    pub cost: f64,
}

/// A complete assignment reached during search: every accepted term placed.
///
/// Handed to a [`BranchObserver`](crate::observer::BranchObserver) while the
/// placements are still live in the graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedBranch {
    pub cost: f64,
    pub placements: Vec<Placement>,
}

impl CompletedBranch {
    /// Terms in insertion order.
    pub fn order(&self) -> Vec<&str> {
        self.placements.iter().map(|p| p.term.as_str()).collect()
    }
}

/// Summary of one extension batch.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExtensionReport {
    /// Sum of attachment costs of the final placements.
    pub total_cost: f64,
    /// Final placements, in insertion order. These synsets are permanent.
    pub placements: Vec<Placement>,
    /// Terms left out because no feasible parent exists for them.
    pub excluded: Vec<String>,
    /// Complete branches reported to the observer.
    pub branches_explored: usize,
}

impl ExtensionReport {
    /// Terms in insertion order.
    pub fn order(&self) -> Vec<&str> {
        self.placements.iter().map(|p| p.term.as_str()).collect()
    }

    /// Number of synsets added to the graph.
    pub fn inserted(&self) -> usize {
        self.placements.len()
    }
}

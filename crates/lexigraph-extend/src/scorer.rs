//! Attachment scoring: turning evidence into a parent choice and a cost.
//!
//! Costs are non-negative error estimates. The branch-and-bound search sums
//! them along a branch and prunes on the running total, so a scorer must
//! never return a negative cost.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use lexigraph_core::hierarchy::cousin_distance;
use lexigraph_core::{OntologyError, OntologyGraph, OntologyIndex, SynsetId};

use crate::evidence::{CandidateParent, WordEvidence};

/// The chosen parent for a term and the cost of attaching there.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub parent: SynsetId,
    pub cost: f64,
}

/// Chooses where a pending term attaches.
pub trait AttachmentScorer {
    /// Whether a candidate may ever be chosen, independent of the graph.
    /// Used by batch planning to count viable parents.
    fn is_viable(&self, candidate: &CandidateParent) -> bool;

    /// The best attachment among the candidates that resolve in `graph`
    /// right now, or `None` if none does.
    fn best_attachment(
        &self,
        graph: &OntologyGraph,
        evidence: &WordEvidence,
    ) -> Result<Option<Attachment>, OntologyError>;
}

impl<S: AttachmentScorer + ?Sized> AttachmentScorer for &S {
    fn is_viable(&self, candidate: &CandidateParent) -> bool {
        (**self).is_viable(candidate)
    }

    fn best_attachment(
        &self,
        graph: &OntologyGraph,
        evidence: &WordEvidence,
    ) -> Result<Option<Attachment>, OntologyError> {
        (**self).best_attachment(graph, evidence)
    }
}

// ---------------------------------------------------------------------------
// Residual error
// ---------------------------------------------------------------------------

/// Picks the most probable candidate; the cost is its residual error `1 - p`.
///
/// Candidates whose residual error exceeds `error_ceiling` are never chosen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResidualErrorScorer {
    pub error_ceiling: f64,
}

impl Default for ResidualErrorScorer {
    fn default() -> Self {
        ResidualErrorScorer {
            error_ceiling: 0.95,
        }
    }
}

impl AttachmentScorer for ResidualErrorScorer {
    fn is_viable(&self, candidate: &CandidateParent) -> bool {
        1.0 - candidate.probability <= self.error_ceiling
    }

    fn best_attachment(
        &self,
        graph: &OntologyGraph,
        evidence: &WordEvidence,
    ) -> Result<Option<Attachment>, OntologyError> {
        let mut best: Option<(SynsetId, f64)> = None;
        for candidate in evidence.candidates.iter().filter(|c| self.is_viable(c)) {
            for parent in evidence.resolve(graph, candidate) {
                if best.map_or(true, |(_, p)| candidate.probability > p) {
                    best = Some((parent, candidate.probability));
                }
            }
        }
        Ok(best.map(|(parent, p)| Attachment {
            parent,
            cost: 1.0 - p,
        }))
    }
}

// ---------------------------------------------------------------------------
// Implied evidence
// ---------------------------------------------------------------------------

/// Scores a candidate by every relation attaching there would imply.
///
/// Attaching under a candidate also makes the term a descendant of each of
/// the candidate's ancestors. For every evidence lemma found on an upward
/// path at distance `d` from the new term, the odds that the implied
/// hypernym is wrong, `(1.000001 - q) / q` with `q = lambda^(d-1) * p`, are
/// multiplied together; so are the odds-errors of every cousin term sharing
/// an ancestor with the candidate within `max_cousin_depth`. The candidate
/// with the lowest product wins and the product is the cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImpliedEvidenceScorer {
    pub lambda: f64,
    pub max_cousin_depth: usize,
}

impl Default for ImpliedEvidenceScorer {
    fn default() -> Self {
        ImpliedEvidenceScorer {
            lambda: 0.95,
            max_cousin_depth: 6,
        }
    }
}

impl ImpliedEvidenceScorer {
    fn odds_error(&self, distance: usize, probability: f64) -> f64 {
        let exponent = distance.saturating_sub(1) as i32;
        let q = self.lambda.powi(exponent) * probability;
        (1.000001 - q) / q
    }
}

impl AttachmentScorer for ImpliedEvidenceScorer {
    fn is_viable(&self, candidate: &CandidateParent) -> bool {
        candidate.probability > 0.0
    }

    fn best_attachment(
        &self,
        graph: &OntologyGraph,
        evidence: &WordEvidence,
    ) -> Result<Option<Attachment>, OntologyError> {
        let mut resolved: Vec<Vec<SynsetId>> = Vec::with_capacity(evidence.candidates.len());
        let mut support: IndexMap<SynsetId, f64> = IndexMap::new();
        for candidate in &evidence.candidates {
            let senses = if self.is_viable(candidate) {
                evidence.resolve(graph, candidate)
            } else {
                Vec::new()
            };
            for sense in &senses {
                support.insert(*sense, candidate.probability);
            }
            resolved.push(senses);
        }

        let cousins: Vec<(Vec<SynsetId>, f64)> = evidence
            .cousins
            .iter()
            .filter(|(_, score)| **score > 0.0)
            .map(|(lemma, score)| (graph.lookup(lemma, Some(evidence.pos)), *score))
            .filter(|(senses, _)| !senses.is_empty())
            .collect();

        let mut best: Option<Attachment> = None;
        for parent in resolved.into_iter().flatten() {
            let mut implied = 1.0;
            for path in graph.parent_paths(parent)? {
                // The root sits furthest from the new term; the candidate
                // itself is one hop away.
                let len = path.len();
                for (i, ancestor) in path.iter().enumerate() {
                    if let Some(p) = support.get(ancestor) {
                        implied *= self.odds_error(len - i, *p);
                    }
                }
            }

            let mut cousin_error = 1.0;
            for (senses, score) in &cousins {
                if cousin_distance(graph, &[parent], senses, self.max_cousin_depth)?.is_some() {
                    cousin_error *= self.odds_error(1, *score);
                }
            }

            let cost = implied * cousin_error;
            if best.map_or(true, |b| cost < b.cost) {
                best = Some(Attachment { parent, cost });
            }
        }
        Ok(best)
    }
}

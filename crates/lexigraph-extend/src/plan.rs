//! Batch preprocessing shared by both extenders.
//!
//! Counts each term's viable parents, drops terms that can never be placed,
//! and fixes the order the extenders try terms in.

use std::collections::HashSet;

use indexmap::IndexMap;

use lexigraph_core::OntologyGraph;

use crate::config::ExtenderConfig;
use crate::error::ExtendError;
use crate::evidence::{normalize, WordEvidence};
use crate::scorer::AttachmentScorer;

/// Viable-parent counts for one batch term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connectivity {
    /// Position of the term in the batch.
    pub index: usize,
    /// Viable candidates that already resolve in the graph.
    pub in_ontology: usize,
    /// Viable candidates naming another term of the batch.
    pub in_batch: usize,
}

impl Connectivity {
    pub fn total(&self) -> usize {
        self.in_ontology + self.in_batch
    }
}

/// The accepted terms in scheduling order plus the excluded ones.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchPlan {
    pub order: Vec<Connectivity>,
    pub excluded: Vec<String>,
}

/// Validates the batch and decides which terms to attempt and in what order.
///
/// A term is accepted only if some insertion order lets it be placed: it has
/// a viable parent already in the graph, or one naming an accepted batch
/// term. Terms with no viable parent at all, and groups that only name each
/// other, are excluded and never retried.
pub fn plan_batch<S: AttachmentScorer>(
    graph: &OntologyGraph,
    batch: &[WordEvidence],
    scorer: &S,
    config: &ExtenderConfig,
) -> Result<BatchPlan, ExtendError> {
    let mut by_key: IndexMap<String, usize> = IndexMap::with_capacity(batch.len());
    for (index, evidence) in batch.iter().enumerate() {
        evidence.validate()?;
        if by_key.insert(evidence.key(), index).is_some() {
            return Err(ExtendError::DuplicateTerm {
                term: evidence.term.clone(),
            });
        }
    }

    let mut counts = Vec::with_capacity(batch.len());
    // batch_parents[i]: batch terms that can serve as a parent of term i.
    let mut batch_parents: Vec<Vec<usize>> = Vec::with_capacity(batch.len());
    for (index, evidence) in batch.iter().enumerate() {
        let mut connectivity = Connectivity {
            index,
            in_ontology: 0,
            in_batch: 0,
        };
        let mut parents = Vec::new();
        for candidate in evidence.candidates.iter().filter(|c| scorer.is_viable(c)) {
            if !evidence.resolve(graph, candidate).is_empty() {
                connectivity.in_ontology += 1;
            } else if let Some(&other) = by_key.get(&normalize(&candidate.lemma)) {
                if other != index {
                    connectivity.in_batch += 1;
                    parents.push(other);
                }
            }
        }
        counts.push(connectivity);
        batch_parents.push(parents);
    }

    let placeable = placeable_terms(&counts, &batch_parents);

    let mut order = Vec::with_capacity(placeable.len());
    let mut excluded = Vec::new();
    for connectivity in counts {
        if placeable.contains(&connectivity.index) {
            order.push(connectivity);
        } else {
            let term = &batch[connectivity.index].term;
            if connectivity.total() == 0 {
                tracing::debug!("excluding '{}': no viable parent", term);
            } else {
                tracing::debug!("excluding '{}': no viable parent can be placed first", term);
            }
            excluded.push(term.clone());
        }
    }

    if config.order_by_connectivity {
        // Stable: ties keep batch order.
        order.sort_by(|a, b| {
            b.in_ontology
                .cmp(&a.in_ontology)
                .then_with(|| b.total().cmp(&a.total()))
        });
    }

    Ok(BatchPlan { order, excluded })
}

/// Least fixed point: terms anchored in the graph, then terms whose batch
/// parent is already placeable, until nothing changes.
fn placeable_terms(counts: &[Connectivity], batch_parents: &[Vec<usize>]) -> HashSet<usize> {
    let mut placeable: HashSet<usize> = counts
        .iter()
        .filter(|c| c.in_ontology > 0)
        .map(|c| c.index)
        .collect();
    loop {
        let before = placeable.len();
        for (index, parents) in batch_parents.iter().enumerate() {
            if !placeable.contains(&index) && parents.iter().any(|p| placeable.contains(p)) {
                placeable.insert(index);
            }
        }
        if placeable.len() == before {
            return placeable;
        }
    }
}

//! Single-pass extender.

use lexigraph_core::OntologyGraph;

use crate::config::ExtenderConfig;
use crate::error::ExtendError;
use crate::evidence::WordEvidence;
use crate::observer::BranchObserver;
use crate::plan::plan_batch;
use crate::report::{CompletedBranch, ExtensionReport, Placement};
use crate::scorer::{AttachmentScorer, ResidualErrorScorer};
use crate::OntologyExtender;

/// Attaches each term, in planned order, under its best parent. No
/// backtracking: a fast, non-optimal baseline.
///
/// A term whose only viable parents are batch terms not placed yet is
/// deferred and retried once something else has been placed.
#[derive(Debug, Clone, Default)]
pub struct GreedyExtender<S = ResidualErrorScorer> {
    scorer: S,
    config: ExtenderConfig,
}

impl<S: AttachmentScorer> GreedyExtender<S> {
    pub fn new(scorer: S, config: ExtenderConfig) -> Self {
        GreedyExtender { scorer, config }
    }
}

impl<S: AttachmentScorer> OntologyExtender for GreedyExtender<S> {
    fn extend(
        &self,
        graph: &mut OntologyGraph,
        batch: &[WordEvidence],
        observer: &mut dyn BranchObserver,
    ) -> Result<ExtensionReport, ExtendError> {
        let plan = plan_batch(graph, batch, &self.scorer, &self.config)?;
        let mut pending: Vec<usize> = plan.order.iter().map(|c| c.index).collect();
        let mut placements = Vec::with_capacity(pending.len());
        let mut excluded = plan.excluded;

        while !pending.is_empty() {
            let mut deferred = Vec::new();
            for index in pending.iter().copied() {
                let evidence = &batch[index];
                let Some(attachment) = self.scorer.best_attachment(graph, evidence)? else {
                    deferred.push(index);
                    continue;
                };
                let synset = graph
                    .insert_scoped(evidence.to_synset(), attachment.parent)?
                    .commit();
                placements.push(Placement {
                    term: evidence.term.clone(),
                    synset,
                    parent: attachment.parent,
                    cost: attachment.cost,
                });
            }
            if deferred.len() == pending.len() {
                // Unreachable after planning; kept so a misbehaving scorer
                // cannot loop forever.
                for index in deferred {
                    tracing::warn!("greedy pass could not place '{}'", batch[index].term);
                    excluded.push(batch[index].term.clone());
                }
                break;
            }
            pending = deferred;
        }

        let branch = CompletedBranch {
            cost: placements.iter().map(|p| p.cost).sum(),
            placements,
        };
        observer.on_complete(graph, &branch);
        tracing::info!(
            "greedy extension placed {} terms (cost {:.4}), excluded {}",
            branch.placements.len(),
            branch.cost,
            excluded.len()
        );

        Ok(ExtensionReport {
            total_cost: branch.cost,
            placements: branch.placements,
            excluded,
            branches_explored: 1,
        })
    }
}

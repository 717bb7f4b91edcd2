//! Branch-and-bound extender.
//!
//! Explores every order in which the accepted terms could be inserted. At
//! each level any term not yet placed may go next, attached under its
//! current best parent; the insertion is live while the subtree below it is
//! explored, so later terms may attach under it, and is rolled back before
//! the next alternative.
//!
//! A move is pruned once the running cost exceeds the best complete cost
//! seen so far. Attachment costs are non-negative, so the running cost never
//! underestimates what the branch can still reach and no better assignment
//! is cut off. Each call returns the best cost reachable below it so callers
//! tighten their bound as the search unwinds.
//!
//! When the search finishes, the cheapest branch is replayed permanently.

use lexigraph_core::OntologyGraph;

use crate::config::ExtenderConfig;
use crate::error::ExtendError;
use crate::evidence::WordEvidence;
use crate::observer::BranchObserver;
use crate::plan::plan_batch;
use crate::report::{CompletedBranch, ExtensionReport, Placement};
use crate::scorer::{AttachmentScorer, ResidualErrorScorer};
use crate::OntologyExtender;

/// Pruned exhaustive search over insertion orders. Worst case is factorial
/// in the batch size.
#[derive(Debug, Clone, Default)]
pub struct BranchAndBoundExtender<S = ResidualErrorScorer> {
    scorer: S,
    config: ExtenderConfig,
}

impl<S: AttachmentScorer> BranchAndBoundExtender<S> {
    pub fn new(scorer: S, config: ExtenderConfig) -> Self {
        BranchAndBoundExtender { scorer, config }
    }
}

impl<S: AttachmentScorer> OntologyExtender for BranchAndBoundExtender<S> {
    fn extend(
        &self,
        graph: &mut OntologyGraph,
        batch: &[WordEvidence],
        observer: &mut dyn BranchObserver,
    ) -> Result<ExtensionReport, ExtendError> {
        let plan = plan_batch(graph, batch, &self.scorer, &self.config)?;
        let order: Vec<&WordEvidence> = plan.order.iter().map(|c| &batch[c.index]).collect();

        let mut search = Search {
            scorer: &self.scorer,
            order: &order,
            placed: vec![false; order.len()],
            path: Vec::with_capacity(order.len()),
            best: None,
            branches: 0,
            observer,
        };
        let best_cost = search.descend(graph, 0.0, f64::INFINITY)?;
        let branches_explored = search.branches;
        let best = search.best.take();

        let mut excluded = plan.excluded;
        let placements = match best {
            Some(branch) => self.replay(graph, batch, &branch)?,
            None => {
                for evidence in &order {
                    tracing::warn!("search found no complete branch placing '{}'", evidence.term);
                    excluded.push(evidence.term.clone());
                }
                Vec::new()
            }
        };
        let total_cost = placements.iter().map(|p| p.cost).sum();

        tracing::info!(
            "branch-and-bound placed {} terms (cost {:.4}, best bound {:.4}) over {} branches, excluded {}",
            placements.len(),
            total_cost,
            best_cost,
            branches_explored,
            excluded.len()
        );

        Ok(ExtensionReport {
            total_cost,
            placements,
            excluded,
            branches_explored,
        })
    }
}

impl<S: AttachmentScorer> BranchAndBoundExtender<S> {
    /// Re-inserts the winning order permanently. The graph is back in the
    /// state the search started from, so each term resolves to the same
    /// parent it had in the winning branch.
    fn replay(
        &self,
        graph: &mut OntologyGraph,
        batch: &[WordEvidence],
        branch: &CompletedBranch,
    ) -> Result<Vec<Placement>, ExtendError> {
        let mut placements = Vec::with_capacity(branch.placements.len());
        for placed in &branch.placements {
            let Some(evidence) = batch.iter().find(|e| e.term == placed.term) else {
                continue;
            };
            let Some(attachment) = self.scorer.best_attachment(graph, evidence)? else {
                tracing::warn!("replay could not place '{}'", evidence.term);
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
        Ok(placements)
    }
}

struct Search<'a, 'o, S> {
    scorer: &'a S,
    order: &'a [&'a WordEvidence],
    placed: Vec<bool>,
    path: Vec<Placement>,
    best: Option<CompletedBranch>,
    branches: usize,
    observer: &'a mut (dyn BranchObserver + 'o),
}

impl<S: AttachmentScorer> Search<'_, '_, S> {
    fn descend(
        &mut self,
        graph: &mut OntologyGraph,
        cost: f64,
        mut bound: f64,
    ) -> Result<f64, ExtendError> {
        if self.path.len() == self.order.len() {
            return Ok(self.complete(graph, cost));
        }

        let order = self.order;
        for (slot, evidence) in order.iter().enumerate() {
            if self.placed[slot] {
                continue;
            }
            let Some(attachment) = self.scorer.best_attachment(graph, evidence)? else {
                continue;
            };
            let next = cost + attachment.cost;
            if next > bound {
                continue;
            }

            let mut scope = graph.insert_scoped(evidence.to_synset(), attachment.parent)?;
            self.placed[slot] = true;
            self.path.push(Placement {
                term: evidence.term.clone(),
                synset: scope.id(),
                parent: attachment.parent,
                cost: attachment.cost,
            });
            let below = self.descend(scope.graph(), next, bound);
            self.path.pop();
            self.placed[slot] = false;
            drop(scope);

            bound = bound.min(below?);
        }
        Ok(bound)
    }

    fn complete(&mut self, graph: &OntologyGraph, cost: f64) -> f64 {
        self.branches += 1;
        let branch = CompletedBranch {
            cost,
            placements: self.path.clone(),
        };
        tracing::debug!("complete branch {:?} with cost {:.4}", branch.order(), cost);
        self.observer.on_complete(graph, &branch);
        if self.best.as_ref().map_or(true, |best| cost < best.cost) {
            self.best = Some(branch);
        }
        cost
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexigraph_core::{Lemma, OntologyIndex, PartOfSpeech, Relation, Synset};

    fn noun(graph: &mut OntologyGraph, form: &str) -> lexigraph_core::SynsetId {
        graph.add_synset(Synset::new(PartOfSpeech::Noun).with_lemma(Lemma::new(form)))
    }

    #[test]
    fn attaches_under_most_probable_parent() {
        let mut graph = OntologyGraph::new();
        let root = noun(&mut graph, "r");
        let a = noun(&mut graph, "a");
        let b = noun(&mut graph, "b");
        graph.add_relation(a, Relation::Hypernym, root).unwrap();
        graph.add_relation(b, Relation::Hypernym, root).unwrap();
        let batch = vec![WordEvidence::new("x")
            .with_candidate("a", 0.9)
            .with_candidate("b", 0.99)];

        let mut seen = Vec::new();
        let mut observer = |_: &OntologyGraph, branch: &CompletedBranch| seen.push(branch.cost);
        let report = BranchAndBoundExtender::new(ResidualErrorScorer::default(), ExtenderConfig::default())
            .extend(&mut graph, &batch, &mut observer)
            .unwrap();

        let x = graph.lookup("x", None)[0];
        assert_eq!(graph.parents(x), vec![b]);
        assert!((report.total_cost - 0.01).abs() < 1e-9);
        assert_eq!(report.branches_explored, 1);
        assert_eq!(seen.len(), 1);
    }

    #[test]
    fn observer_sees_live_insertions_and_graph_is_restored_between_branches() {
        let mut graph = OntologyGraph::new();
        noun(&mut graph, "animal");
        let batch = vec![
            WordEvidence::new("cat").with_candidate("animal", 0.9),
            WordEvidence::new("dog").with_candidate("animal", 0.9),
        ];

        let mut sizes = Vec::new();
        let mut observer = |g: &OntologyGraph, _: &CompletedBranch| sizes.push(g.len());
        let report = BranchAndBoundExtender::new(ResidualErrorScorer::default(), ExtenderConfig::default())
            .extend(&mut graph, &batch, &mut observer)
            .unwrap();

        assert_eq!(sizes, vec![3, 3]);
        assert_eq!(report.branches_explored, 2);
        assert_eq!(graph.len(), 3);
        assert_eq!(graph.relation_count(), 2);
    }

    #[test]
    fn pruning_skips_branches_costlier_than_the_best() {
        let mut graph = OntologyGraph::new();
        noun(&mut graph, "animal");
        // Placing "dog" first makes it available to "puppy" at 0.99, which
        // beats attaching "puppy" straight under "animal".
        let batch = vec![
            WordEvidence::new("puppy")
                .with_candidate("animal", 0.2)
                .with_candidate("dog", 0.99),
            WordEvidence::new("dog").with_candidate("animal", 0.9),
        ];

        let report = BranchAndBoundExtender::new(ResidualErrorScorer::default(), ExtenderConfig::default())
            .extend(&mut graph, &batch, &mut crate::observer::NoopObserver)
            .unwrap();

        let dog = graph.lookup("dog", None)[0];
        let puppy = graph.lookup("puppy", None)[0];
        assert_eq!(graph.parents(puppy), vec![dog]);
        assert!((report.total_cost - 0.11).abs() < 1e-9);
        assert_eq!(report.order(), vec!["dog", "puppy"]);
    }
}

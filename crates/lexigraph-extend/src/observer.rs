//! Callbacks invoked on every complete branch of an extension search.

use indexmap::IndexMap;

use lexigraph_core::hierarchy::path_similarity;
use lexigraph_core::{OntologyGraph, SynsetId};

use crate::report::CompletedBranch;

/// Receives each complete branch while its insertions are live in the graph.
pub trait BranchObserver {
    fn on_complete(&mut self, graph: &OntologyGraph, branch: &CompletedBranch);
}

impl<F> BranchObserver for F
where
    F: FnMut(&OntologyGraph, &CompletedBranch),
{
    fn on_complete(&mut self, graph: &OntologyGraph, branch: &CompletedBranch) {
        self(graph, branch)
    }
}

/// Ignores every branch.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl BranchObserver for NoopObserver {
    fn on_complete(&mut self, _graph: &OntologyGraph, _branch: &CompletedBranch) {}
}

/// Scores branches against known-good parents.
///
/// For each gold term placed in a branch, takes the best path similarity
/// between the parent it was attached under and any of its gold parents, then
/// averages over the gold terms that were placed. One score is recorded per
/// branch.
#[derive(Debug, Clone, Default)]
pub struct PathSimilarityEvaluator {
    gold: IndexMap<String, Vec<SynsetId>>,
    scores: Vec<f64>,
}

impl PathSimilarityEvaluator {
    pub fn new(gold: IndexMap<String, Vec<SynsetId>>) -> Self {
        PathSimilarityEvaluator {
            gold,
            scores: Vec::new(),
        }
    }

    /// Average similarity for each branch seen, in the order seen.
    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    /// The score of the most recent branch.
    pub fn last_score(&self) -> Option<f64> {
        self.scores.last().copied()
    }

    /// Averages similarity over the gold terms placed in `branch`, or `None`
    /// if none were.
    pub fn evaluate(&self, graph: &OntologyGraph, branch: &CompletedBranch) -> Option<f64> {
        let mut total = 0.0;
        let mut answered = 0usize;
        for placement in &branch.placements {
            let Some(gold_parents) = self.gold.get(&placement.term) else {
                continue;
            };
            let best = gold_parents
                .iter()
                .map(|gold| {
                    path_similarity(graph, placement.parent, *gold).unwrap_or_else(|err| {
                        tracing::debug!("skipping gold parent for '{}': {}", placement.term, err);
                        0.0
                    })
                })
                .fold(0.0, f64::max);
            total += best;
            answered += 1;
        }
        (answered > 0).then(|| total / answered as f64)
    }
}

impl BranchObserver for PathSimilarityEvaluator {
    fn on_complete(&mut self, graph: &OntologyGraph, branch: &CompletedBranch) {
        if let Some(score) = self.evaluate(graph, branch) {
            tracing::debug!(
                "branch cost {:.4} scored {:.4} against gold parents",
                branch.cost,
                score
            );
            self.scores.push(score);
        }
    }
}

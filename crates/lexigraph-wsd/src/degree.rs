//! Degree-centrality sense ranking over a carved subgraph.

use lexigraph_core::{OntologyGraph, SynsetId};

use crate::carve::{SenseSubgraph, SubgraphCarver};
use crate::config::CarveConfig;
use crate::error::WsdError;
use crate::token::ContentToken;
use crate::SenseRanker;

/// Picks, for each token, the candidate with the most adjacency entries in
/// the sentence's carved subgraph.
#[derive(Debug, Clone)]
pub struct DegreeCentralityRanker<'g> {
    graph: &'g OntologyGraph,
    carver: SubgraphCarver,
}

impl<'g> DegreeCentralityRanker<'g> {
    /// Gloss links, when enabled, are computed here once for `graph`.
    pub fn new(graph: &'g OntologyGraph, config: CarveConfig) -> Self {
        DegreeCentralityRanker {
            graph,
            carver: SubgraphCarver::for_graph(graph, config),
        }
    }
}

impl SenseRanker for DegreeCentralityRanker<'_> {
    fn annotate(&self, tokens: &mut [ContentToken]) -> Result<usize, WsdError> {
        let subgraph = self.carver.carve(self.graph, tokens)?;
        Ok(select_by_degree(&subgraph, tokens))
    }
}

/// Writes the highest-degree candidate onto each token and returns how many
/// tokens were annotated.
///
/// The first candidate wins ties; a later candidate replaces it only with a
/// strictly greater degree, so a sentence with no links falls back to each
/// token's first candidate.
pub fn select_by_degree(subgraph: &SenseSubgraph, tokens: &mut [ContentToken]) -> usize {
    let mut annotated = 0;
    for token in tokens.iter_mut() {
        let mut best: Option<(SynsetId, usize)> = None;
        for &candidate in &token.candidates {
            let degree = subgraph.degree(candidate);
            if best.map_or(true, |(_, d)| degree > d) {
                best = Some((candidate, degree));
            }
        }
        if let Some((sense, _)) = best {
            token.sense = Some(sense);
            annotated += 1;
        }
    }
    annotated
}

//! Personalized PageRank sense ranking.
//!
//! The base transition graph is built once from every synset reachable
//! through the lemma index and is never mutated afterwards. Ranking a focus
//! token layers an [`Overlay`] on top of it: one ephemeral term node per
//! context token, linked to that token's candidate senses. The overlay lives
//! for a single ranking and is private to the call, so any number of threads
//! can rank against the same base concurrently.
//!
//! Restart mass sits uniformly on the term nodes. Each iteration moves
//! `damping` of every node's mass along its outgoing transitions; the rest,
//! plus whatever reached a node without outgoing transitions, returns to the
//! seeds. Every iterate therefore sums to 1, and a synset no seed can reach
//! keeps rank 0.

use indexmap::IndexMap;

use lexigraph_core::{OntologyGraph, OntologyIndex, SynsetId};

use crate::config::PageRankConfig;
use crate::error::WsdError;
use crate::token::ContentToken;
use crate::SenseRanker;

/// Row-stochastic transitions over the indexed synsets.
#[derive(Debug, Clone, Default)]
pub struct TransitionGraph {
    index: IndexMap<SynsetId, usize>,
    rows: Vec<Vec<(usize, f64)>>,
}

impl TransitionGraph {
    /// Indexes every synset named by some lemma and precomputes uniform
    /// transitions over each one's outgoing edges to other indexed synsets.
    pub fn build(graph: &OntologyGraph) -> Self {
        let mut index = IndexMap::new();
        for form in graph.known_lemmas() {
            for &id in graph.lemma_index().get(form) {
                let next = index.len();
                index.entry(id).or_insert(next);
            }
        }

        let rows = index
            .keys()
            .map(|&id| {
                let targets: Vec<usize> = graph
                    .all_relations(id)
                    .filter_map(|(_, to)| index.get(&to).copied())
                    .collect();
                uniform_row(&targets)
            })
            .collect();

        tracing::debug!("indexed {} synsets for personalized pagerank", index.len());
        TransitionGraph { index, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn position(&self, id: SynsetId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    pub fn synset_at(&self, position: usize) -> Option<SynsetId> {
        self.index.get_index(position).map(|(id, _)| *id)
    }
}

/// Uniform transitions over `targets`; repeated targets accumulate weight.
fn uniform_row(targets: &[usize]) -> Vec<(usize, f64)> {
    if targets.is_empty() {
        return Vec::new();
    }
    let share = 1.0 / targets.len() as f64;
    let mut row: IndexMap<usize, f64> = IndexMap::new();
    for &t in targets {
        *row.entry(t).or_insert(0.0) += share;
    }
    row.into_iter().collect()
}

/// A base transition graph logically extended with term nodes.
///
/// Positions below `base.len()` resolve to the base; positions at or above
/// it are term nodes held by the overlay.
#[derive(Debug)]
pub struct Overlay<'b> {
    base: &'b TransitionGraph,
    terms: Vec<Vec<(usize, f64)>>,
    links: Vec<Vec<SynsetId>>,
}

impl<'b> Overlay<'b> {
    pub fn new(base: &'b TransitionGraph) -> Self {
        Overlay {
            base,
            terms: Vec::new(),
            links: Vec::new(),
        }
    }

    /// Adds a term node linked to `senses` and returns its position, or
    /// `None` (adding nothing) when `senses` is empty.
    pub fn add_term(&mut self, senses: &[SynsetId]) -> Result<Option<usize>, WsdError> {
        if senses.is_empty() {
            return Ok(None);
        }
        let targets = senses
            .iter()
            .map(|&id| self.base.position(id).ok_or(WsdError::UnknownSynset { id }))
            .collect::<Result<Vec<_>, _>>()?;
        self.terms.push(uniform_row(&targets));
        self.links.push(senses.to_vec());
        Ok(Some(self.base.len() + self.terms.len() - 1))
    }

    pub fn len(&self) -> usize {
        self.base.len() + self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Outgoing transitions of a node, from the overlay first, then the base.
    pub fn row(&self, position: usize) -> &[(usize, f64)] {
        match position.checked_sub(self.base.len()) {
            Some(term) => self.terms.get(term).map(Vec::as_slice).unwrap_or(&[]),
            None => self.base.rows.get(position).map(Vec::as_slice).unwrap_or(&[]),
        }
    }

    /// The senses a term node links to. Empty for base positions.
    pub fn linked(&self, position: usize) -> &[SynsetId] {
        position
            .checked_sub(self.base.len())
            .and_then(|term| self.links.get(term))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Runs personalized PageRank with uniform restart mass on `seeds`.
    /// Seeds outside the overlay are ignored.
    pub(crate) fn personalized_rank(
        &self,
        seeds: &[usize],
        config: &PageRankConfig,
    ) -> RankVector {
        let n = self.len();
        let mut restart = vec![0.0; n];
        let seeds: Vec<usize> = seeds.iter().copied().filter(|&s| s < n).collect();
        if seeds.is_empty() {
            return RankVector {
                ranks: restart,
                base_len: self.base.len(),
                iterations: 0,
            };
        }
        let share = 1.0 / seeds.len() as f64;
        for &seed in &seeds {
            restart[seed] += share;
        }

        let mut ranks = restart.clone();
        let mut iterations = 0;
        while iterations < config.max_iterations {
            iterations += 1;
            let mut next = vec![0.0; n];
            for (from, &mass) in ranks.iter().enumerate() {
                if mass == 0.0 {
                    continue;
                }
                for &(to, weight) in self.row(from) {
                    next[to] += config.damping * mass * weight;
                }
            }
            let moved: f64 = next.iter().sum();
            let returned = 1.0 - moved;
            for (slot, r) in next.iter_mut().zip(&restart) {
                *slot += returned * r;
            }

            let delta: f64 = next.iter().zip(&ranks).map(|(a, b)| (a - b).abs()).sum();
            ranks = next;
            if delta < config.tolerance {
                break;
            }
        }

        RankVector {
            ranks,
            base_len: self.base.len(),
            iterations,
        }
    }
}

/// Converged ranks over base synsets followed by term nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct RankVector {
    ranks: Vec<f64>,
    base_len: usize,
    iterations: usize,
}

impl RankVector {
    pub fn get(&self, position: usize) -> f64 {
        self.ranks.get(position).copied().unwrap_or(0.0)
    }

    /// Sum over every node, term nodes included.
    pub fn total(&self) -> f64 {
        self.ranks.iter().sum()
    }

    /// Ranks of the base synsets only.
    pub fn base(&self) -> &[f64] {
        &self.ranks[..self.base_len.min(self.ranks.len())]
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }
}

/// Ranks senses by personalized PageRank over a sliding token window.
#[derive(Debug, Clone)]
pub struct PersonalizedPageRankRanker {
    base: TransitionGraph,
    config: PageRankConfig,
}

impl PersonalizedPageRankRanker {
    /// Validates `config` and builds the base transition graph. The ranker
    /// keeps no reference to `graph`.
    pub fn new(graph: &OntologyGraph, config: PageRankConfig) -> Result<Self, WsdError> {
        config.validate()?;
        Ok(PersonalizedPageRankRanker {
            base: TransitionGraph::build(graph),
            config,
        })
    }

    pub fn base(&self) -> &TransitionGraph {
        &self.base
    }

    /// Ranks with restart mass on one term node per non-empty sense list.
    pub fn rank_context(&self, context: &[&[SynsetId]]) -> Result<RankVector, WsdError> {
        let mut overlay = Overlay::new(&self.base);
        let mut seeds = Vec::new();
        for senses in context {
            if let Some(term) = overlay.add_term(senses)? {
                seeds.push(term);
            }
        }
        Ok(overlay.personalized_rank(&seeds, &self.config))
    }

    /// Chooses a sense for `tokens[focus]` from the tokens within the
    /// configured window. `None` when the focus token has no candidates.
    pub fn rank_focus(
        &self,
        tokens: &[ContentToken],
        focus: usize,
    ) -> Result<Option<SynsetId>, WsdError> {
        let Some(focus_token) = tokens.get(focus) else {
            return Ok(None);
        };
        let mut overlay = Overlay::new(&self.base);
        let Some(focus_node) = overlay.add_term(&focus_token.candidates)? else {
            return Ok(None);
        };
        let mut seeds = vec![focus_node];

        let start = focus.saturating_sub(self.config.window);
        let end = (focus + self.config.window + 1).min(tokens.len());
        for (i, token) in tokens.iter().enumerate().take(end).skip(start) {
            if i == focus {
                continue;
            }
            if let Some(term) = overlay.add_term(&token.candidates)? {
                seeds.push(term);
            }
        }

        let ranks = overlay.personalized_rank(&seeds, &self.config);
        let mut best: Option<(SynsetId, f64)> = None;
        for &sense in overlay.linked(focus_node) {
            let rank = self
                .base
                .position(sense)
                .map(|p| ranks.get(p))
                .unwrap_or(0.0);
            if best.map_or(true, |(_, r)| rank > r) {
                best = Some((sense, rank));
            }
        }
        Ok(best.map(|(sense, _)| sense))
    }
}

impl SenseRanker for PersonalizedPageRankRanker {
    fn annotate(&self, tokens: &mut [ContentToken]) -> Result<usize, WsdError> {
        let mut annotated = 0;
        for focus in 0..tokens.len() {
            if let Some(sense) = self.rank_focus(tokens, focus)? {
                tokens[focus].sense = Some(sense);
                annotated += 1;
            }
        }
        Ok(annotated)
    }
}

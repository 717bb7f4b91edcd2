//! Carving a sentence-local subgraph out of the ontology.
//!
//! Starting from every candidate sense of a sentence's tokens, a
//! depth-bounded depth-first search follows edges of any label in either
//! direction, so two senses under a shared hypernym connect through it.
//! Whenever the search reaches another sense of interest, every consecutive
//! pair along the path is linked in the carved adjacency and the path's
//! synsets become interesting themselves, so they are searched from later in
//! the same pass.
//!
//! With [`CarveConfig::gloss_links`] set, the search also steps between a
//! synset and the single sense of any monosemous word in its definition
//! (see [`GlossLinks`]).
//!
//! Links record connectivity only; every entry has the same weight
//! regardless of how long the path that produced it was.

use indexmap::{IndexMap, IndexSet};

use lexigraph_core::{OntologyGraph, OntologyIndex, SynsetId};

use crate::config::CarveConfig;
use crate::error::WsdError;
use crate::token::ContentToken;

/// The carved subgraph for one sentence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SenseSubgraph {
    synsets: IndexSet<SynsetId>,
    edges: IndexSet<(SynsetId, SynsetId)>,
    degrees: IndexMap<SynsetId, usize>,
}

impl SenseSubgraph {
    /// Every synset of interest: all candidates plus synsets on connecting
    /// paths, in discovery order.
    pub fn synsets(&self) -> &IndexSet<SynsetId> {
        &self.synsets
    }

    /// Directed adjacency entries.
    pub fn edges(&self) -> &IndexSet<(SynsetId, SynsetId)> {
        &self.edges
    }

    pub fn contains_edge(&self, from: SynsetId, to: SynsetId) -> bool {
        self.edges.contains(&(from, to))
    }

    /// Incoming plus outgoing adjacency entries of `id`.
    pub fn degree(&self, id: SynsetId) -> usize {
        self.degrees.get(&id).copied().unwrap_or(0)
    }

    /// Adds a directed adjacency entry. Self-links and repeats are ignored.
    pub fn link(&mut self, from: SynsetId, to: SynsetId) {
        if from != to && self.edges.insert((from, to)) {
            *self.degrees.entry(from).or_insert(0) += 1;
            *self.degrees.entry(to).or_insert(0) += 1;
        }
    }
}

/// Undirected links between each synset and the sense of every monosemous
/// word in its definition.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlossLinks {
    links: IndexMap<SynsetId, IndexSet<SynsetId>>,
}

impl GlossLinks {
    /// Scans every definition in `graph`. Words are split on whitespace and
    /// stripped of surrounding punctuation; a word links only when the lemma
    /// index knows exactly one sense for it, across every part of speech, and
    /// that sense is not the defining synset.
    pub fn build(graph: &OntologyGraph) -> Self {
        let mut gloss = GlossLinks::default();
        for id in graph.synset_ids() {
            let Some(synset) = graph.synset(id) else {
                continue;
            };
            for word in synset.definition().split_whitespace() {
                let word = word.trim_matches(|c: char| !c.is_alphanumeric());
                if word.is_empty() {
                    continue;
                }
                if let &[sense] = graph.lookup(word, None).as_slice() {
                    if sense != id {
                        gloss.insert(id, sense);
                    }
                }
            }
        }
        tracing::debug!("built gloss links for {} synsets", gloss.links.len());
        gloss
    }

    fn insert(&mut self, a: SynsetId, b: SynsetId) {
        self.links.entry(a).or_default().insert(b);
        self.links.entry(b).or_default().insert(a);
    }

    /// Synsets gloss-linked to `id`.
    pub fn linked(&self, id: SynsetId) -> impl Iterator<Item = SynsetId> + '_ {
        self.links.get(&id).into_iter().flatten().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

/// Depth-bounded subgraph carver.
#[derive(Debug, Clone, Default)]
pub struct SubgraphCarver {
    config: CarveConfig,
    gloss: Option<GlossLinks>,
}

impl SubgraphCarver {
    /// A carver that, when gloss links are enabled, derives them from the
    /// graph on every [`carve`](Self::carve) call.
    pub fn new(config: CarveConfig) -> Self {
        SubgraphCarver { config, gloss: None }
    }

    /// A carver with gloss links for `graph` computed up front. Only carve
    /// `graph` (unchanged) with it.
    pub fn for_graph(graph: &OntologyGraph, config: CarveConfig) -> Self {
        let gloss = config.gloss_links.then(|| GlossLinks::build(graph));
        SubgraphCarver { config, gloss }
    }

    pub fn config(&self) -> &CarveConfig {
        &self.config
    }

    /// Carves the subgraph connecting the candidates of `tokens`.
    pub fn carve(
        &self,
        graph: &OntologyGraph,
        tokens: &[ContentToken],
    ) -> Result<SenseSubgraph, WsdError> {
        let mut subgraph = SenseSubgraph::default();
        for token in tokens {
            for &id in &token.candidates {
                if !graph.contains(id) {
                    return Err(WsdError::UnknownSynset { id });
                }
                subgraph.synsets.insert(id);
            }
        }

        let built;
        let gloss = match (&self.gloss, self.config.gloss_links) {
            (_, false) => None,
            (Some(links), true) => Some(links),
            (None, true) => {
                built = GlossLinks::build(graph);
                Some(&built)
            }
        };

        let mut next = 0;
        while let Some(&start) = subgraph.synsets.get_index(next) {
            next += 1;
            let mut path = vec![start];
            self.search(graph, gloss, &mut path, &mut subgraph);
        }

        tracing::debug!(
            "carved {} synsets with {} links from {} tokens",
            subgraph.synsets.len(),
            subgraph.edges.len(),
            tokens.len()
        );
        Ok(subgraph)
    }

    fn search(
        &self,
        graph: &OntologyGraph,
        gloss: Option<&GlossLinks>,
        path: &mut Vec<SynsetId>,
        subgraph: &mut SenseSubgraph,
    ) {
        let Some(&current) = path.last() else {
            return;
        };
        if path.len() > self.config.max_depth {
            return;
        }
        let mut neighbors = graph.neighbors(current);
        if let Some(gloss) = gloss {
            neighbors.extend(gloss.linked(current));
        }
        for neighbor in neighbors {
            if path.contains(&neighbor) {
                continue;
            }
            path.push(neighbor);
            if subgraph.synsets.contains(&neighbor) {
                for pair in path.windows(2) {
                    subgraph.link(pair[0], pair[1]);
                }
                for &member in path.iter() {
                    subgraph.synsets.insert(member);
                }
            } else {
                self.search(graph, gloss, path, subgraph);
            }
            path.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexigraph_core::{Lemma, PartOfSpeech, Relation, Synset};

    fn chain(len: usize) -> (OntologyGraph, Vec<SynsetId>) {
        let mut graph = OntologyGraph::new();
        let ids: Vec<SynsetId> = (0..len)
            .map(|i| {
                graph.add_synset(
                    Synset::new(PartOfSpeech::Noun).with_lemma(Lemma::new(format!("n{i}"))),
                )
            })
            .collect();
        for pair in ids.windows(2) {
            graph.add_relation(pair[0], Relation::Hypernym, pair[1]).unwrap();
        }
        (graph, ids)
    }

    fn token(id: SynsetId) -> ContentToken {
        ContentToken::new("w", Some(PartOfSpeech::Noun), [id])
    }

    fn bounded(max_depth: usize) -> SubgraphCarver {
        SubgraphCarver::new(CarveConfig {
            max_depth,
            ..CarveConfig::default()
        })
    }

    fn noun(graph: &mut OntologyGraph, form: &str, definition: &str) -> SynsetId {
        graph.add_synset(
            Synset::new(PartOfSpeech::Noun)
                .with_lemma(Lemma::new(form))
                .with_definition(definition),
        )
    }

    #[test]
    fn path_within_bound_links_every_hop_both_ways() {
        let (graph, ids) = chain(4);
        let subgraph = bounded(3)
            .carve(&graph, &[token(ids[0]), token(ids[3])])
            .unwrap();

        assert!(subgraph.contains_edge(ids[0], ids[1]));
        assert!(subgraph.contains_edge(ids[1], ids[2]));
        assert!(subgraph.contains_edge(ids[2], ids[3]));
        assert!(subgraph.contains_edge(ids[3], ids[2]));
        assert_eq!(subgraph.synsets().len(), 4);
        assert_eq!(subgraph.degree(ids[0]), 2);
        assert_eq!(subgraph.degree(ids[1]), 4);
    }

    #[test]
    fn path_beyond_bound_is_not_linked() {
        let (graph, ids) = chain(5);
        let subgraph = bounded(3)
            .carve(&graph, &[token(ids[0]), token(ids[4])])
            .unwrap();

        assert!(subgraph.edges().is_empty());
        assert_eq!(subgraph.synsets().len(), 2);
    }

    #[test]
    fn siblings_connect_through_shared_hypernym() {
        let mut graph = OntologyGraph::new();
        let animal = noun(&mut graph, "animal", "");
        let dog = noun(&mut graph, "dog", "");
        let cat = noun(&mut graph, "cat", "");
        graph.add_relation(dog, Relation::Hypernym, animal).unwrap();
        graph.add_relation(cat, Relation::Hypernym, animal).unwrap();

        let subgraph = bounded(2).carve(&graph, &[token(dog), token(cat)]).unwrap();
        assert!(subgraph.contains_edge(dog, animal));
        assert!(subgraph.contains_edge(animal, cat));
        assert!(subgraph.contains_edge(cat, animal));
        assert!(subgraph.synsets().contains(&animal));

        let subgraph = bounded(1).carve(&graph, &[token(dog), token(cat)]).unwrap();
        assert!(subgraph.edges().is_empty());
    }

    #[test]
    fn discovered_members_are_searched_too() {
        // n0 -> n1 -> n2, and n3 -> n1. Only n0, n2 and n3 are candidates;
        // n1 joins the subgraph once a path through it is found.
        let (mut graph, ids) = chain(3);
        let extra = graph
            .add_synset(Synset::new(PartOfSpeech::Noun).with_lemma(Lemma::new("n3")));
        graph.add_relation(extra, Relation::Hypernym, ids[1]).unwrap();
        let candidates = [token(ids[0]), token(ids[2]), token(extra)];

        // With max_depth 1 nothing is adjacent to another candidate.
        let subgraph = bounded(1).carve(&graph, &candidates).unwrap();
        assert!(subgraph.edges().is_empty());

        let subgraph = bounded(2).carve(&graph, &candidates).unwrap();
        assert!(subgraph.contains_edge(ids[0], ids[1]));
        assert!(subgraph.contains_edge(extra, ids[1]));
        assert!(subgraph.synsets().contains(&ids[1]));
    }

    #[test]
    fn gloss_links_only_monosemous_words() {
        let mut graph = OntologyGraph::new();
        let feline = noun(&mut graph, "feline", "");
        let bank_a = noun(&mut graph, "bank", "");
        let bank_b = noun(&mut graph, "bank", "");
        let cat = noun(&mut graph, "cat", "a small feline, seen near a bank");

        let gloss = GlossLinks::build(&graph);
        assert_eq!(gloss.linked(cat).collect::<Vec<_>>(), vec![feline]);
        assert_eq!(gloss.linked(feline).collect::<Vec<_>>(), vec![cat]);
        assert_eq!(gloss.linked(bank_a).count() + gloss.linked(bank_b).count(), 0);
    }

    #[test]
    fn gloss_links_feed_carving_when_enabled() {
        let mut graph = OntologyGraph::new();
        let feline = noun(&mut graph, "feline", "");
        let cat = noun(&mut graph, "cat", "a small feline");
        let tokens = [token(cat), token(feline)];

        let with_gloss = SubgraphCarver::for_graph(&graph, CarveConfig::default());
        let subgraph = with_gloss.carve(&graph, &tokens).unwrap();
        assert!(subgraph.contains_edge(cat, feline));
        assert!(subgraph.contains_edge(feline, cat));
        assert_eq!(subgraph, SubgraphCarver::default().carve(&graph, &tokens).unwrap());

        let without = SubgraphCarver::new(CarveConfig {
            gloss_links: false,
            ..CarveConfig::default()
        });
        assert!(without.carve(&graph, &tokens).unwrap().edges().is_empty());
    }

    #[test]
    fn unknown_candidate_is_an_error() {
        let (graph, _) = chain(1);
        let err = SubgraphCarver::default()
            .carve(&graph, &[token(SynsetId(99))])
            .unwrap_err();
        assert!(matches!(err, WsdError::UnknownSynset { .. }));
    }
}

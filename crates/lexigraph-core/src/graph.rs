//! OntologyGraph: canonical synset and relation storage.
//!
//! [`OntologyGraph`] is the single entry point for building and querying a
//! lexical ontology. Synsets are the node weights of a petgraph
//! `StableGraph`, relations are its directed edges, and a [`LemmaIndex`] is
//! kept in step with every mutation so word forms always resolve to live
//! synsets.
//!
//! # Invariants
//!
//! - No edge is a self-loop, and no two edges share `(source, label, target)`.
//! - Hypernym edges form a DAG: a synset is never its own ancestor. Both
//!   [`add_relation`](OntologyGraph::add_relation) and
//!   [`merge`](OntologyGraph::merge) reject a mutation that would break this
//!   before touching the graph.
//! - A synset's cached depth range is dropped whenever a hypernym edge on any
//!   of its upward paths changes.
//!
//! All mutation is in place. Callers that explore alternatives (the
//! branch-and-bound extender) undo their own changes, typically through
//! [`ScopedInsertion`](crate::scoped::ScopedInsertion).

use std::collections::HashSet;

use indexmap::IndexSet;
use petgraph::graph::NodeIndex;
use petgraph::stable_graph::StableGraph;
use petgraph::visit::EdgeRef;
use petgraph::{Directed, Direction};
use serde::{Deserialize, Serialize};

use crate::error::OntologyError;
use crate::id::SynsetId;
use crate::index::{LemmaIndex, OntologyIndex};
use crate::pos::PartOfSpeech;
use crate::relation::Relation;
use crate::synset::{DepthRange, Lemma, Synset};

/// The lexical ontology.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OntologyGraph {
    graph: StableGraph<Synset, Relation, Directed, u32>,
    lemmas: LemmaIndex,
}

impl OntologyGraph {
    /// Creates an empty ontology.
    pub fn new() -> Self {
        Self::default()
    }

    // -----------------------------------------------------------------------
    // Read-only accessors
    // -----------------------------------------------------------------------

    /// Returns a read-only reference to the underlying petgraph graph.
    pub fn inner(&self) -> &StableGraph<Synset, Relation, Directed, u32> {
        &self.graph
    }

    /// Returns the lemma index.
    pub fn lemma_index(&self) -> &LemmaIndex {
        &self.lemmas
    }

    /// Looks up a synset by id.
    pub fn synset(&self, id: SynsetId) -> Option<&Synset> {
        self.graph.node_weight(id.into())
    }

    /// Looks up a synset by id for editing its gloss or attributes.
    ///
    /// Lemmas are not editable through this handle; use
    /// [`add_lemma`](Self::add_lemma) so the index stays consistent.
    pub fn synset_mut(&mut self, id: SynsetId) -> Option<&mut Synset> {
        self.graph.node_weight_mut(id.into())
    }

    pub fn contains(&self, id: SynsetId) -> bool {
        self.graph.contains_node(id.into())
    }

    /// Returns the number of synsets.
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Returns the number of relation edges.
    pub fn relation_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Iterates over every live synset id.
    pub fn synset_ids(&self) -> impl Iterator<Item = SynsetId> + '_ {
        self.graph.node_indices().map(SynsetId::from)
    }

    // -----------------------------------------------------------------------
    // Synset methods
    // -----------------------------------------------------------------------

    /// Adds a synset, pointing its lemmas back at the new id and indexing them.
    pub fn add_synset(&mut self, synset: Synset) -> SynsetId {
        let idx = self.graph.add_node(synset);
        let id = SynsetId::from(idx);
        let synset = &mut self.graph[idx];
        for lemma in synset.lemmas_mut() {
            lemma.synset = Some(id);
            self.lemmas.insert(&lemma.form, id);
        }
        id
    }

    /// Adds a lemma to an existing synset.
    pub fn add_lemma(&mut self, id: SynsetId, mut lemma: Lemma) -> Result<(), OntologyError> {
        let synset = self
            .graph
            .node_weight_mut(id.into())
            .ok_or(OntologyError::SynsetNotFound { id })?;
        lemma.synset = Some(id);
        self.lemmas.insert(&lemma.form, id);
        synset.lemmas_mut().push(lemma);
        Ok(())
    }

    /// Removes a synset together with every edge from or to it.
    ///
    /// Returns the removed synset. Its lemmas keep their stale back-reference.
    pub fn remove_synset(&mut self, id: SynsetId) -> Result<Synset, OntologyError> {
        if !self.contains(id) {
            return Err(OntologyError::SynsetNotFound { id });
        }
        self.invalidate_depths_from(&[id]);
        let synset = self
            .graph
            .remove_node(id.into())
            .ok_or(OntologyError::SynsetNotFound { id })?;
        for lemma in synset.lemmas() {
            self.lemmas.remove(&lemma.form, id);
        }
        Ok(synset)
    }

    // -----------------------------------------------------------------------
    // Relation methods
    // -----------------------------------------------------------------------

    /// Adds a directed `from -rel-> to` edge.
    ///
    /// Returns `Ok(false)` if the identical edge already exists. Self-loops,
    /// and hypernym edges that would make a synset its own ancestor, are
    /// rejected with [`OntologyError::InvalidOperation`].
    pub fn add_relation(
        &mut self,
        from: SynsetId,
        rel: Relation,
        to: SynsetId,
    ) -> Result<bool, OntologyError> {
        self.require(from)?;
        self.require(to)?;
        if from == to {
            return Err(OntologyError::invalid(format!(
                "relation '{rel}' from synset {from} to itself"
            )));
        }
        if self.has_edge(from, &rel, to) {
            return Ok(false);
        }
        if rel == Relation::Hypernym && self.reaches_upward(to, from) {
            return Err(OntologyError::invalid(format!(
                "hypernym {from} -> {to} would make synset {from} its own ancestor"
            )));
        }

        if rel == Relation::Hypernym {
            self.invalidate_depths_from(&[from]);
        } else if let Some(synset) = self.graph.node_weight_mut(from.into()) {
            synset.invalidate_depth();
        }
        self.graph.add_edge(from.into(), to.into(), rel);
        Ok(true)
    }

    /// Adds `a -rel-> b` and, when `rel` has a reflexive counterpart,
    /// `b -reflexive-> a`. Mirroring only ever happens through this method.
    pub fn add_relation_pair(
        &mut self,
        a: SynsetId,
        rel: Relation,
        b: SynsetId,
    ) -> Result<(), OntologyError> {
        let back = rel.reflexive();
        self.add_relation(a, rel, b)?;
        if let Some(back) = back {
            self.add_relation(b, back, a)?;
        }
        Ok(())
    }

    /// Removes the `from -rel-> to` edge. Returns whether an edge was removed.
    pub fn remove_relation(
        &mut self,
        from: SynsetId,
        rel: &Relation,
        to: SynsetId,
    ) -> Result<bool, OntologyError> {
        self.require(from)?;
        self.require(to)?;
        let edge = self
            .graph
            .edges_connecting(from.into(), to.into())
            .find(|e| e.weight() == rel)
            .map(|e| e.id());
        let Some(edge) = edge else {
            return Ok(false);
        };
        if *rel == Relation::Hypernym {
            self.invalidate_depths_from(&[from]);
        } else if let Some(synset) = self.graph.node_weight_mut(from.into()) {
            synset.invalidate_depth();
        }
        self.graph.remove_edge(edge);
        Ok(true)
    }

    /// Targets of every `id -rel-> *` edge. Empty if `id` is unknown.
    pub fn relations(&self, id: SynsetId, rel: &Relation) -> Vec<SynsetId> {
        if !self.contains(id) {
            return Vec::new();
        }
        self.graph
            .edges(id.into())
            .filter(|e| e.weight() == rel)
            .map(|e| SynsetId::from(e.target()))
            .collect()
    }

    /// Every outgoing `(label, target)` pair of `id`.
    pub fn all_relations(&self, id: SynsetId) -> impl Iterator<Item = (&Relation, SynsetId)> + '_ {
        let idx: NodeIndex<u32> = id.into();
        self.graph
            .contains_node(idx)
            .then(|| self.graph.edges(idx))
            .into_iter()
            .flatten()
            .map(|e| (e.weight(), SynsetId::from(e.target())))
    }

    /// Distinct labels on `id`'s outgoing edges.
    pub fn known_relation_types(&self, id: SynsetId) -> IndexSet<Relation> {
        self.all_relations(id).map(|(rel, _)| rel.clone()).collect()
    }

    /// Number of outgoing edges of `id`.
    pub fn num_relations(&self, id: SynsetId) -> usize {
        self.all_relations(id).count()
    }

    /// Synsets sharing an edge of any label with `id`, in either direction.
    /// Outgoing targets come first, then incoming sources; each appears once.
    pub fn neighbors(&self, id: SynsetId) -> IndexSet<SynsetId> {
        let idx: NodeIndex<u32> = id.into();
        if !self.graph.contains_node(idx) {
            return IndexSet::new();
        }
        self.graph
            .neighbors_directed(idx, Direction::Outgoing)
            .chain(self.graph.neighbors_directed(idx, Direction::Incoming))
            .map(SynsetId::from)
            .collect()
    }

    /// Hypernym targets of `id`.
    pub fn parents(&self, id: SynsetId) -> Vec<SynsetId> {
        self.relations(id, &Relation::Hypernym)
    }

    /// Hyponym targets of `id`.
    pub fn children(&self, id: SynsetId) -> Vec<SynsetId> {
        self.relations(id, &Relation::Hyponym)
    }

    // -----------------------------------------------------------------------
    // Hierarchy
    // -----------------------------------------------------------------------

    /// Every simple upward path from a parentless root down to `id`.
    ///
    /// Each path is ordered root first and ends with `id`. Diamond
    /// inheritance yields one path per route.
    pub fn parent_paths(&self, id: SynsetId) -> Result<Vec<Vec<SynsetId>>, OntologyError> {
        self.require(id)?;
        let mut on_path = HashSet::new();
        Ok(self.collect_paths(id, &mut on_path))
    }

    fn collect_paths(&self, id: SynsetId, on_path: &mut HashSet<SynsetId>) -> Vec<Vec<SynsetId>> {
        on_path.insert(id);
        let parents: Vec<SynsetId> = self
            .parents(id)
            .into_iter()
            .filter(|p| !on_path.contains(p))
            .collect();

        let mut paths = Vec::new();
        if parents.is_empty() {
            paths.push(vec![id]);
        } else {
            for parent in parents {
                for mut path in self.collect_paths(parent, on_path) {
                    path.push(id);
                    paths.push(path);
                }
            }
        }
        on_path.remove(&id);
        paths
    }

    /// The flattened set of all hypernym ancestors of `id` (excluding `id`).
    pub fn ancestors(&self, id: SynsetId) -> Result<IndexSet<SynsetId>, OntologyError> {
        self.require(id)?;
        let mut seen = IndexSet::new();
        let mut stack = self.parents(id);
        while let Some(next) = stack.pop() {
            if next != id && seen.insert(next) {
                stack.extend(self.parents(next));
            }
        }
        Ok(seen)
    }

    /// Shortest hypernym distance from `id` to a root. Roots have depth 0.
    pub fn min_depth(&self, id: SynsetId) -> Result<usize, OntologyError> {
        self.depth_range(id).map(|d| d.min)
    }

    /// Longest hypernym distance from `id` to a root.
    pub fn max_depth(&self, id: SynsetId) -> Result<usize, OntologyError> {
        self.depth_range(id).map(|d| d.max)
    }

    /// Min and max root distance, computed once and cached on the synset.
    pub fn depth_range(&self, id: SynsetId) -> Result<DepthRange, OntologyError> {
        self.require(id)?;
        let mut visiting = HashSet::new();
        Ok(self.compute_depth(id, &mut visiting))
    }

    fn compute_depth(&self, id: SynsetId, visiting: &mut HashSet<SynsetId>) -> DepthRange {
        let synset = &self.graph[NodeIndex::<u32>::from(id)];
        if let Some(depth) = synset.depth.get() {
            return *depth;
        }

        visiting.insert(id);
        let mut range: Option<DepthRange> = None;
        for parent in self.parents(id) {
            if visiting.contains(&parent) {
                continue;
            }
            let parent_range = self.compute_depth(parent, visiting);
            range = Some(match range {
                None => DepthRange {
                    min: parent_range.min + 1,
                    max: parent_range.max + 1,
                },
                Some(r) => DepthRange {
                    min: r.min.min(parent_range.min + 1),
                    max: r.max.max(parent_range.max + 1),
                },
            });
        }
        visiting.remove(&id);

        let range = range.unwrap_or(DepthRange { min: 0, max: 0 });
        *synset.depth.get_or_init(|| range)
    }

    // -----------------------------------------------------------------------
    // Merge
    // -----------------------------------------------------------------------

    /// Merges `b` into `a`.
    ///
    /// Requires equal parts of speech. `b`'s lemmas and examples are appended
    /// after `a`'s, definitions are joined with `"; "`, every edge from or to
    /// `b` is re-homed onto `a` (self-loops and duplicates dropped) and
    /// attributes merge label by label. `b` no longer exists afterwards.
    ///
    /// On error neither synset is modified.
    pub fn merge(&mut self, a: SynsetId, b: SynsetId) -> Result<(), OntologyError> {
        let pos_a = self
            .synset(a)
            .ok_or(OntologyError::SynsetNotFound { id: a })?
            .pos();
        let pos_b = self
            .synset(b)
            .ok_or(OntologyError::SynsetNotFound { id: b })?
            .pos();
        if a == b {
            return Err(OntologyError::invalid(format!(
                "cannot merge synset {a} into itself"
            )));
        }
        if pos_a != pos_b {
            return Err(OntologyError::invalid(format!(
                "cannot merge synsets with different parts of speech ({pos_a} and {pos_b})"
            )));
        }
        if self.merge_would_cycle(a, b) {
            return Err(OntologyError::invalid(format!(
                "merging {b} into {a} would make {a} its own ancestor"
            )));
        }

        let b_idx: NodeIndex<u32> = b.into();
        let outgoing: Vec<(Relation, SynsetId)> = self
            .graph
            .edges(b_idx)
            .map(|e| (e.weight().clone(), SynsetId::from(e.target())))
            .collect();
        let incoming: Vec<(SynsetId, Relation)> = self
            .graph
            .edges_directed(b_idx, Direction::Incoming)
            .map(|e| (SynsetId::from(e.source()), e.weight().clone()))
            .collect();

        self.invalidate_depths_from(&[a, b]);
        let absorbed = self.remove_synset(b)?;

        for (rel, target) in outgoing {
            if target != a && !self.has_edge(a, &rel, target) {
                self.graph.add_edge(a.into(), target.into(), rel);
            }
        }
        for (source, rel) in incoming {
            if source != a && !self.has_edge(source, &rel, a) {
                self.graph.add_edge(source.into(), a.into(), rel);
            }
        }

        for lemma in absorbed.lemmas() {
            self.lemmas.insert(&lemma.form, a);
        }
        let target = &mut self.graph[NodeIndex::<u32>::from(a)];
        let first_new = target.lemmas().len();
        target.absorb(absorbed);
        for lemma in &mut target.lemmas_mut()[first_new..] {
            lemma.synset = Some(a);
        }

        tracing::debug!("merged synset {} into {}", b, a);
        Ok(())
    }

    /// Would treating `a` and `b` as one node close a hypernym cycle?
    fn merge_would_cycle(&self, a: SynsetId, b: SynsetId) -> bool {
        let mut stack: Vec<SynsetId> = self
            .parents(a)
            .into_iter()
            .chain(self.parents(b))
            .filter(|p| *p != a && *p != b)
            .collect();
        let mut seen = HashSet::new();
        while let Some(next) = stack.pop() {
            if next == a || next == b {
                return true;
            }
            if seen.insert(next) {
                stack.extend(self.parents(next));
            }
        }
        false
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    fn require(&self, id: SynsetId) -> Result<(), OntologyError> {
        if self.contains(id) {
            Ok(())
        } else {
            Err(OntologyError::SynsetNotFound { id })
        }
    }

    fn has_edge(&self, from: SynsetId, rel: &Relation, to: SynsetId) -> bool {
        self.graph
            .edges_connecting(from.into(), to.into())
            .any(|e| e.weight() == rel)
    }

    /// Is `target` reachable from `start` by following hypernym edges
    /// (including `start == target`)?
    fn reaches_upward(&self, start: SynsetId, target: SynsetId) -> bool {
        let mut stack = vec![start];
        let mut seen = HashSet::new();
        while let Some(next) = stack.pop() {
            if next == target {
                return true;
            }
            if seen.insert(next) {
                stack.extend(self.parents(next));
            }
        }
        false
    }

    /// Drops the cached depth of each start synset and of every synset below
    /// it (anything reaching it through incoming hypernym edges).
    fn invalidate_depths_from(&mut self, starts: &[SynsetId]) {
        let mut stack: Vec<NodeIndex<u32>> = starts.iter().map(|&id| id.into()).collect();
        let mut seen = HashSet::new();
        while let Some(idx) = stack.pop() {
            if !seen.insert(idx) {
                continue;
            }
            let Some(synset) = self.graph.node_weight_mut(idx) else {
                continue;
            };
            synset.invalidate_depth();
            stack.extend(
                self.graph
                    .edges_directed(idx, Direction::Incoming)
                    .filter(|e| *e.weight() == Relation::Hypernym)
                    .map(|e| e.source()),
            );
        }
    }
}

impl OntologyIndex for OntologyGraph {
    fn lookup(&self, lemma: &str, pos: Option<PartOfSpeech>) -> Vec<SynsetId> {
        self.lemmas
            .get(lemma)
            .iter()
            .copied()
            .filter(|id| match (pos, self.synset(*id)) {
                (_, None) => false,
                (None, Some(_)) => true,
                (Some(pos), Some(synset)) => synset.pos() == pos,
            })
            .collect()
    }

    fn known_lemmas(&self) -> Vec<&str> {
        self.lemmas.forms().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::AttributeValue;

    fn noun(graph: &mut OntologyGraph, form: &str) -> SynsetId {
        graph.add_synset(Synset::new(PartOfSpeech::Noun).with_lemma(Lemma::new(form)))
    }

    fn is_a(graph: &mut OntologyGraph, child: SynsetId, parent: SynsetId) {
        graph.add_relation(child, Relation::Hypernym, parent).unwrap();
    }

    #[test]
    fn neighbors_cover_both_directions_once() {
        let mut graph = OntologyGraph::new();
        let animal = noun(&mut graph, "animal");
        let dog = noun(&mut graph, "dog");
        let cat = noun(&mut graph, "cat");
        is_a(&mut graph, dog, animal);
        is_a(&mut graph, cat, animal);
        graph.add_relation(dog, Relation::AlsoSee, cat).unwrap();
        graph.add_relation(cat, Relation::AlsoSee, dog).unwrap();

        let around_animal = graph.neighbors(animal);
        assert_eq!(around_animal.len(), 2);
        assert!(around_animal.contains(&dog) && around_animal.contains(&cat));
        let around_dog = graph.neighbors(dog);
        assert_eq!(around_dog.len(), 2);
        assert!(around_dog.contains(&animal) && around_dog.contains(&cat));
        assert!(graph.neighbors(SynsetId(42)).is_empty());
    }

    #[test]
    fn add_synset_indexes_lemmas_and_sets_back_references() {
        let mut graph = OntologyGraph::new();
        let dog = noun(&mut graph, "dog");

        assert_eq!(graph.lookup("Dog", None), vec![dog]);
        assert_eq!(graph.synset(dog).unwrap().lemmas()[0].synset, Some(dog));
        assert!(graph.lookup("dog", Some(PartOfSpeech::Verb)).is_empty());
        assert_eq!(graph.known_lemmas(), vec!["dog"]);
    }

    #[test]
    fn lookup_or_any_falls_back_across_pos() {
        let mut graph = OntologyGraph::new();
        let run = graph.add_synset(Synset::new(PartOfSpeech::Verb).with_lemma(Lemma::new("run")));
        assert_eq!(graph.lookup_or_any("run", Some(PartOfSpeech::Noun)), vec![run]);
    }

    #[test]
    fn remove_synset_drops_edges_and_index_entries() {
        let mut graph = OntologyGraph::new();
        let animal = noun(&mut graph, "animal");
        let dog = noun(&mut graph, "dog");
        is_a(&mut graph, dog, animal);

        let removed = graph.remove_synset(dog).unwrap();
        assert_eq!(removed.name(), "dog.n.1");
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.relation_count(), 0);
        assert!(graph.lookup("dog", None).is_empty());
        assert!(matches!(
            graph.remove_synset(dog),
            Err(OntologyError::SynsetNotFound { .. })
        ));
    }

    #[test]
    fn relations_are_not_mirrored() {
        let mut graph = OntologyGraph::new();
        let animal = noun(&mut graph, "animal");
        let dog = noun(&mut graph, "dog");
        is_a(&mut graph, dog, animal);

        assert_eq!(graph.parents(dog), vec![animal]);
        assert!(graph.children(animal).is_empty());

        graph.add_relation_pair(animal, Relation::Hyponym, dog).unwrap();
        assert_eq!(graph.children(animal), vec![dog]);
    }

    #[test]
    fn duplicate_edges_are_ignored() {
        let mut graph = OntologyGraph::new();
        let a = noun(&mut graph, "a");
        let b = noun(&mut graph, "b");
        assert!(graph.add_relation(a, Relation::Antonym, b).unwrap());
        assert!(!graph.add_relation(a, Relation::Antonym, b).unwrap());
        assert_eq!(graph.num_relations(a), 1);
    }

    #[test]
    fn self_loops_and_hypernym_cycles_are_rejected() {
        let mut graph = OntologyGraph::new();
        let a = noun(&mut graph, "a");
        let b = noun(&mut graph, "b");
        let c = noun(&mut graph, "c");
        is_a(&mut graph, a, b);
        is_a(&mut graph, b, c);

        let err = graph.add_relation(a, Relation::custom("x"), a).unwrap_err();
        assert!(err.is_invalid_operation());
        let err = graph.add_relation(c, Relation::Hypernym, a).unwrap_err();
        assert!(err.is_invalid_operation());
        // Non-hierarchical labels may close loops.
        assert!(graph.add_relation(c, Relation::AlsoSee, a).unwrap());
    }

    #[test]
    fn ancestors_and_depth_follow_hypernym_chain() {
        let mut graph = OntologyGraph::new();
        let a = noun(&mut graph, "a");
        let b = noun(&mut graph, "b");
        let c = noun(&mut graph, "c");
        is_a(&mut graph, a, b);
        is_a(&mut graph, b, c);

        let ancestors = graph.ancestors(a).unwrap();
        assert!(ancestors.contains(&b));
        assert!(ancestors.contains(&c));
        assert!(!ancestors.contains(&a));
        assert_eq!(graph.min_depth(a).unwrap(), 2);
        assert_eq!(graph.max_depth(c).unwrap(), 0);
    }

    #[test]
    fn diamond_inheritance_yields_multiple_paths() {
        let mut graph = OntologyGraph::new();
        let root = noun(&mut graph, "entity");
        let left = noun(&mut graph, "left");
        let mid = noun(&mut graph, "mid");
        let right = noun(&mut graph, "right");
        let leaf = noun(&mut graph, "leaf");
        is_a(&mut graph, left, root);
        is_a(&mut graph, mid, root);
        is_a(&mut graph, right, mid);
        is_a(&mut graph, leaf, left);
        is_a(&mut graph, leaf, right);

        let mut paths = graph.parent_paths(leaf).unwrap();
        paths.sort_by_key(|p| p.len());
        assert_eq!(paths, vec![vec![root, left, leaf], vec![root, mid, right, leaf]]);
        assert_eq!(graph.min_depth(leaf).unwrap(), 2);
        assert_eq!(graph.max_depth(leaf).unwrap(), 3);
    }

    #[test]
    fn depth_cache_is_invalidated_below_changed_edge() {
        let mut graph = OntologyGraph::new();
        let root = noun(&mut graph, "root");
        let mid = noun(&mut graph, "mid");
        let leaf = noun(&mut graph, "leaf");
        is_a(&mut graph, leaf, mid);
        assert_eq!(graph.min_depth(leaf).unwrap(), 1);
        assert!(graph.synset(leaf).unwrap().cached_depth().is_some());

        is_a(&mut graph, mid, root);
        assert!(graph.synset(leaf).unwrap().cached_depth().is_none());
        assert_eq!(graph.min_depth(leaf).unwrap(), 2);
    }

    #[test]
    fn merge_rehomes_edges_and_content() {
        let mut graph = OntologyGraph::new();
        let root = noun(&mut graph, "root");
        let a = noun(&mut graph, "car");
        let b = noun(&mut graph, "auto");
        let wheel = noun(&mut graph, "wheel");
        let sedan = noun(&mut graph, "sedan");
        is_a(&mut graph, a, root);
        is_a(&mut graph, b, root);
        graph.add_relation(b, Relation::PartMeronym, wheel).unwrap();
        is_a(&mut graph, sedan, b);
        graph.add_relation(a, Relation::SimilarTo, b).unwrap();
        graph
            .synset_mut(b)
            .unwrap()
            .set_attribute("freq", AttributeValue::Count(2));

        graph.merge(a, b).unwrap();

        assert!(!graph.contains(b));
        assert_eq!(graph.parents(a), vec![root]);
        assert_eq!(graph.relations(a, &Relation::PartMeronym), vec![wheel]);
        assert_eq!(graph.parents(sedan), vec![a]);
        assert!(graph.relations(a, &Relation::SimilarTo).is_empty());
        assert_eq!(graph.lookup("auto", None), vec![a]);
        let merged = graph.synset(a).unwrap();
        assert_eq!(merged.lemmas()[1].synset, Some(a));
        assert_eq!(merged.attribute("freq"), Some(&AttributeValue::Count(2)));
    }

    #[test]
    fn merge_with_mismatched_pos_leaves_both_unchanged() {
        let mut graph = OntologyGraph::new();
        let a = noun(&mut graph, "run");
        let b = graph.add_synset(Synset::new(PartOfSpeech::Verb).with_lemma(Lemma::new("run")));
        let before_a = serde_json::to_string(graph.synset(a).unwrap()).unwrap();
        let before_b = serde_json::to_string(graph.synset(b).unwrap()).unwrap();

        let err = graph.merge(a, b).unwrap_err();
        assert!(err.is_invalid_operation());
        assert_eq!(serde_json::to_string(graph.synset(a).unwrap()).unwrap(), before_a);
        assert_eq!(serde_json::to_string(graph.synset(b).unwrap()).unwrap(), before_b);
    }

    #[test]
    fn merge_rejects_hypernym_cycle() {
        let mut graph = OntologyGraph::new();
        let top = noun(&mut graph, "top");
        let mid = noun(&mut graph, "mid");
        let low = noun(&mut graph, "low");
        is_a(&mut graph, mid, top);
        is_a(&mut graph, low, mid);

        // low -> mid -> top: folding low into top would give top -> mid -> top.
        let err = graph.merge(top, low).unwrap_err();
        assert!(err.is_invalid_operation());
        assert!(graph.contains(low));
        assert_eq!(graph.parents(low), vec![mid]);
    }

    #[test]
    fn serde_roundtrip_preserves_structure() {
        let mut graph = OntologyGraph::new();
        let a = noun(&mut graph, "a");
        let b = noun(&mut graph, "b");
        is_a(&mut graph, a, b);

        let json = serde_json::to_string(&graph).unwrap();
        let back: OntologyGraph = serde_json::from_str(&json).unwrap();
        assert_eq!(back.len(), 2);
        assert_eq!(back.parents(a), vec![b]);
        assert_eq!(back.lookup("a", None), vec![a]);
    }
}

//! Distance and subsumption queries over the hypernym hierarchy.
//!
//! These are read-only helpers layered on [`OntologyGraph`]'s parent links:
//! distances to ancestors, path distances through a shared ancestor, lowest
//! common hypernyms, cousin distances between two words' senses, and the
//! hypernym status of a word pair. The attachment scorers and the
//! path-similarity evaluator are built on them.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::error::OntologyError;
use crate::graph::OntologyGraph;
use crate::id::SynsetId;

/// How a (child word, ancestor word) pair relates to the existing hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HypernymStatus {
    /// Neither word has a synset.
    TermsMissing,
    /// Only the child word is known; the ancestor would be new.
    NovelHyponym,
    /// Only the ancestor word is known; the child would be new.
    NovelHypernym,
    /// Some ancestor sense is already above some child sense.
    KnownHypernym,
    /// Both words are known but no child sense sits below an ancestor sense.
    KnownNonHypernym,
}

/// Hypernym distance from `id` to each of its ancestors, including `id`
/// itself at distance 0.
///
/// With `find_max` the longest simple route to each ancestor is kept,
/// otherwise the shortest.
pub fn parent_distances(
    graph: &OntologyGraph,
    id: SynsetId,
    find_max: bool,
) -> Result<IndexMap<SynsetId, usize>, OntologyError> {
    if !graph.contains(id) {
        return Err(OntologyError::SynsetNotFound { id });
    }
    let mut distances = IndexMap::new();
    distances.insert(id, 0);
    let mut on_path = IndexSet::new();
    on_path.insert(id);
    for parent in graph.parents(id) {
        walk_up(graph, parent, 1, find_max, &mut distances, &mut on_path);
    }
    Ok(distances)
}

fn walk_up(
    graph: &OntologyGraph,
    id: SynsetId,
    depth: usize,
    find_max: bool,
    distances: &mut IndexMap<SynsetId, usize>,
    on_path: &mut IndexSet<SynsetId>,
) {
    if !on_path.insert(id) {
        return;
    }
    distances
        .entry(id)
        .and_modify(|d| *d = if find_max { (*d).max(depth) } else { (*d).min(depth) })
        .or_insert(depth);
    for parent in graph.parents(id) {
        walk_up(graph, parent, depth + 1, find_max, distances, on_path);
    }
    on_path.pop();
}

/// Shortest number of hypernym hops joining `a` and `b` through a common
/// ancestor, or `None` when they share none.
pub fn shortest_path_distance(
    graph: &OntologyGraph,
    a: SynsetId,
    b: SynsetId,
) -> Result<Option<usize>, OntologyError> {
    path_distance(graph, a, b, false)
}

/// Longest number of hypernym hops joining `a` and `b` through a common
/// ancestor, or `None` when they share none.
pub fn longest_path_distance(
    graph: &OntologyGraph,
    a: SynsetId,
    b: SynsetId,
) -> Result<Option<usize>, OntologyError> {
    path_distance(graph, a, b, true)
}

fn path_distance(
    graph: &OntologyGraph,
    a: SynsetId,
    b: SynsetId,
    find_max: bool,
) -> Result<Option<usize>, OntologyError> {
    let from_a = parent_distances(graph, a, find_max)?;
    let from_b = parent_distances(graph, b, find_max)?;
    let through_shared = from_a
        .iter()
        .filter_map(|(shared, da)| from_b.get(shared).map(|db| da + db));
    Ok(if find_max {
        through_shared.max()
    } else {
        through_shared.min()
    })
}

/// `1 / (1 + shortest path distance)`, or 0 when `a` and `b` are unconnected.
pub fn path_similarity(
    graph: &OntologyGraph,
    a: SynsetId,
    b: SynsetId,
) -> Result<f64, OntologyError> {
    Ok(shortest_path_distance(graph, a, b)?
        .map(|d| 1.0 / (1.0 + d as f64))
        .unwrap_or(0.0))
}

/// The common ancestors of `a` and `b` lying deepest below the roots.
///
/// A synset counts as its own ancestor, so if `a` subsumes `b` the result is
/// `[a]`. Empty when the two share no root.
pub fn lowest_common_hypernyms(
    graph: &OntologyGraph,
    a: SynsetId,
    b: SynsetId,
) -> Result<Vec<SynsetId>, OntologyError> {
    let paths_a = graph.parent_paths(a)?;
    let paths_b = graph.parent_paths(b)?;

    let mut depth_from_root: IndexMap<SynsetId, usize> = IndexMap::new();
    for path in &paths_a {
        for (depth, id) in path.iter().enumerate() {
            let entry = depth_from_root.entry(*id).or_insert(depth);
            *entry = (*entry).max(depth);
        }
    }

    let mut shared = IndexSet::new();
    for path in &paths_b {
        for (depth, id) in path.iter().enumerate() {
            if let Some(known) = depth_from_root.get_mut(id) {
                *known = (*known).max(depth);
                shared.insert(*id);
            }
        }
    }

    let deepest = shared
        .iter()
        .filter_map(|id| depth_from_root.get(id))
        .copied()
        .max();
    Ok(match deepest {
        Some(deepest) => shared
            .into_iter()
            .filter(|id| depth_from_root.get(id) == Some(&deepest))
            .collect(),
        None => Vec::new(),
    })
}

/// Cousin distance between two words, each given as its candidate senses.
///
/// Over every pairing of a sense from `first` with a sense from `second`,
/// finds the shared ancestor minimizing the combined distance and returns
/// `(distance from the first sense, distance from the second sense)`.
/// Returns `None` when no pairing shares an ancestor or when either side of
/// the best pairing lies deeper than `max_depth`.
pub fn cousin_distance(
    graph: &OntologyGraph,
    first: &[SynsetId],
    second: &[SynsetId],
    max_depth: usize,
) -> Result<Option<(usize, usize)>, OntologyError> {
    let second_distances = second
        .iter()
        .map(|id| parent_distances(graph, *id, false))
        .collect::<Result<Vec<_>, _>>()?;

    let mut best: Option<(usize, usize)> = None;
    for id in first {
        let from_first = parent_distances(graph, *id, false)?;
        for from_second in &second_distances {
            for (shared, d1) in &from_first {
                let Some(d2) = from_second.get(shared) else {
                    continue;
                };
                if best.map_or(true, |(b1, b2)| d1 + d2 < b1 + b2) {
                    best = Some((*d1, *d2));
                }
            }
        }
    }
    Ok(best.filter(|(d1, d2)| *d1 <= max_depth && *d2 <= max_depth))
}

/// Classifies a (child word, ancestor word) pair given each word's senses.
pub fn hypernym_status(
    graph: &OntologyGraph,
    child_senses: &[SynsetId],
    ancestor_senses: &[SynsetId],
) -> Result<HypernymStatus, OntologyError> {
    match (child_senses.is_empty(), ancestor_senses.is_empty()) {
        (true, true) => return Ok(HypernymStatus::TermsMissing),
        (true, false) => return Ok(HypernymStatus::NovelHypernym),
        (false, true) => return Ok(HypernymStatus::NovelHyponym),
        (false, false) => {}
    }

    let mut known = IndexSet::new();
    for child in child_senses {
        known.extend(graph.ancestors(*child)?);
    }
    for child in child_senses {
        known.shift_remove(child);
    }

    if ancestor_senses.iter().any(|a| known.contains(a)) {
        Ok(HypernymStatus::KnownHypernym)
    } else {
        Ok(HypernymStatus::KnownNonHypernym)
    }
}

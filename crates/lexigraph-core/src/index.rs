//! Lemma-to-synset lookup.
//!
//! [`LemmaIndex`] is maintained by [`OntologyGraph`](crate::graph::OntologyGraph)
//! as synsets are added, removed and merged. [`OntologyIndex`] is the lookup
//! contract the extender and the disambiguators resolve words through.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::id::SynsetId;
use crate::pos::PartOfSpeech;

/// Resolves word forms to candidate synsets.
pub trait OntologyIndex {
    /// Returns the synsets containing `lemma`, optionally restricted to one
    /// part of speech. Matching is case-insensitive.
    fn lookup(&self, lemma: &str, pos: Option<PartOfSpeech>) -> Vec<SynsetId>;

    /// Every indexed word form.
    fn known_lemmas(&self) -> Vec<&str>;

    /// Like [`lookup`](Self::lookup), but retries across every part of
    /// speech when the tagged lookup finds nothing.
    fn lookup_or_any(&self, lemma: &str, pos: Option<PartOfSpeech>) -> Vec<SynsetId> {
        let found = self.lookup(lemma, pos);
        if found.is_empty() && pos.is_some() {
            self.lookup(lemma, None)
        } else {
            found
        }
    }
}

/// Lowercased form -> synsets, in insertion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LemmaIndex {
    entries: IndexMap<String, SmallVec<[SynsetId; 4]>>,
}

impl LemmaIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, form: &str, id: SynsetId) {
        let senses = self.entries.entry(normalize(form)).or_default();
        if !senses.contains(&id) {
            senses.push(id);
        }
    }

    pub(crate) fn remove(&mut self, form: &str, id: SynsetId) {
        let key = normalize(form);
        if let Some(senses) = self.entries.get_mut(&key) {
            senses.retain(|s| *s != id);
            if senses.is_empty() {
                self.entries.shift_remove(&key);
            }
        }
    }

    /// All synsets for a form, regardless of part of speech.
    pub fn get(&self, form: &str) -> &[SynsetId] {
        self.entries
            .get(&normalize(form))
            .map(|senses| senses.as_slice())
            .unwrap_or(&[])
    }

    /// Every indexed form, in first-insertion order.
    pub fn forms(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn normalize(form: &str) -> String {
    form.trim().to_lowercase()
}

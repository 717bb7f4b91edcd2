//! Attachment evidence for terms waiting to be added to the ontology.
//!
//! Evidence names candidate parents by lemma rather than by synset id, so
//! that a batch term inserted earlier in the same session is a real candidate
//! for the terms after it. Lemmas are resolved through the graph's index each
//! time an attachment decision is made.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use lexigraph_core::{Lemma, OntologyGraph, OntologyIndex, PartOfSpeech, Synset, SynsetId};

use crate::error::ExtendError;

/// One candidate parent lemma with the probability that attaching under it
/// is correct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateParent {
    pub lemma: String,
    pub probability: f64,
}

/// Everything known about one pending term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordEvidence {
    pub term: String,
    #[serde(default = "default_pos")]
    pub pos: PartOfSpeech,
    #[serde(default)]
    pub candidates: Vec<CandidateParent>,
    /// Cousin-relationship scores against other terms, keyed by lemma.
    #[serde(default)]
    pub cousins: IndexMap<String, f64>,
}

fn default_pos() -> PartOfSpeech {
    PartOfSpeech::Noun
}

impl WordEvidence {
    /// Creates noun evidence with no candidates.
    pub fn new(term: impl Into<String>) -> Self {
        WordEvidence {
            term: term.into(),
            pos: PartOfSpeech::Noun,
            candidates: Vec::new(),
            cousins: IndexMap::new(),
        }
    }

    pub fn with_pos(mut self, pos: PartOfSpeech) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_candidate(mut self, lemma: impl Into<String>, probability: f64) -> Self {
        self.candidates.push(CandidateParent {
            lemma: lemma.into(),
            probability,
        });
        self
    }

    pub fn with_cousin(mut self, lemma: impl Into<String>, score: f64) -> Self {
        self.cousins.insert(lemma.into(), score);
        self
    }

    /// Checks the term is non-empty and every probability and cousin score
    /// lies in `[0, 1]`.
    pub fn validate(&self) -> Result<(), ExtendError> {
        if self.term.trim().is_empty() {
            return Err(self.invalid("empty term"));
        }
        for candidate in &self.candidates {
            if !in_unit_range(candidate.probability) {
                return Err(self.invalid(format!(
                    "probability {} for parent '{}' is outside [0, 1]",
                    candidate.probability, candidate.lemma
                )));
            }
        }
        for (lemma, score) in &self.cousins {
            if !in_unit_range(*score) {
                return Err(self.invalid(format!(
                    "cousin score {score} for '{lemma}' is outside [0, 1]"
                )));
            }
        }
        Ok(())
    }

    /// The synsets a candidate lemma currently resolves to, in this term's
    /// part of speech.
    pub fn resolve(&self, graph: &OntologyGraph, candidate: &CandidateParent) -> Vec<SynsetId> {
        graph.lookup(&candidate.lemma, Some(self.pos))
    }

    /// The fresh synset inserted for this term.
    pub fn to_synset(&self) -> Synset {
        Synset::new(self.pos).with_lemma(Lemma::new(self.term.clone()))
    }

    /// Case-insensitive key used to detect duplicate terms and batch parents.
    pub(crate) fn key(&self) -> String {
        normalize(&self.term)
    }

    fn invalid(&self, reason: impl Into<String>) -> ExtendError {
        ExtendError::InvalidEvidence {
            term: self.term.clone(),
            reason: reason.into(),
        }
    }
}

pub(crate) fn normalize(lemma: &str) -> String {
    lemma.trim().to_lowercase()
}

fn in_unit_range(value: f64) -> bool {
    (0.0..=1.0).contains(&value)
}

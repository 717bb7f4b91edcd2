//! Synset and lemma node payloads.
//!
//! A [`Synset`] is the node weight stored in the ontology graph: one word
//! sense with its lemmas, gloss and attributes. Relations are not stored on
//! the synset itself; they are the graph's edges and are queried through
//! [`OntologyGraph`](crate::graph::OntologyGraph).

use std::sync::OnceLock;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::attribute::AttributeValue;
use crate::id::SynsetId;
use crate::pos::PartOfSpeech;

/// A surface word form belonging to a synset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lemma {
    /// The word as written.
    pub form: String,
    /// Back-reference to the owning synset. `None` until the synset is added
    /// to a graph; lookup only, never ownership.
    pub synset: Option<SynsetId>,
    /// Lexicographer file name (e.g. `noun.animal`).
    pub lex_file: String,
    /// Lexical id distinguishing identical forms within a lexicographer file.
    pub lex_id: u32,
    /// Position of this sense among all senses of the form.
    pub sense_index: u32,
}

impl Lemma {
    /// Creates an unattached lemma with empty lexical metadata.
    pub fn new(form: impl Into<String>) -> Self {
        Lemma {
            form: form.into(),
            synset: None,
            lex_file: String::new(),
            lex_id: 0,
            sense_index: 0,
        }
    }

    /// Sets the lexicographer file and lexical id.
    pub fn with_lex_info(mut self, lex_file: impl Into<String>, lex_id: u32) -> Self {
        self.lex_file = lex_file.into();
        self.lex_id = lex_id;
        self
    }

    /// Sets the sense index.
    pub fn with_sense_index(mut self, sense_index: u32) -> Self {
        self.sense_index = sense_index;
        self
    }
}

/// Cached distance from a synset to the hierarchy roots along hypernym edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthRange {
    pub min: usize,
    pub max: usize,
}

/// One word sense.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Synset {
    pos: PartOfSpeech,
    lemmas: Vec<Lemma>,
    definition: String,
    examples: Vec<String>,
    attributes: IndexMap<String, AttributeValue>,
    /// Sense number used in the display name (`dog.n.1`).
    pub sense_number: u32,
    /// WordNet data-file byte offset; 0 for synsets created in-process.
    pub offset: u32,
    #[serde(skip)]
    pub(crate) depth: OnceLock<DepthRange>,
}

impl Synset {
    /// Creates an empty synset.
    pub fn new(pos: PartOfSpeech) -> Self {
        Synset {
            pos,
            lemmas: Vec::new(),
            definition: String::new(),
            examples: Vec::new(),
            attributes: IndexMap::new(),
            sense_number: 1,
            offset: 0,
            depth: OnceLock::new(),
        }
    }

    /// Adds a lemma before the synset is inserted into a graph.
    pub fn with_lemma(mut self, lemma: Lemma) -> Self {
        self.lemmas.push(lemma);
        self
    }

    /// Sets the definition before insertion.
    pub fn with_definition(mut self, definition: impl Into<String>) -> Self {
        self.definition = definition.into();
        self
    }

    /// Adds an example sentence before insertion.
    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.examples.push(example.into());
        self
    }

    pub fn pos(&self) -> PartOfSpeech {
        self.pos
    }

    pub fn lemmas(&self) -> &[Lemma] {
        &self.lemmas
    }

    pub fn definition(&self) -> &str {
        &self.definition
    }

    pub fn examples(&self) -> &[String] {
        &self.examples
    }

    pub fn set_definition(&mut self, definition: impl Into<String>) {
        self.definition = definition.into();
    }

    pub fn add_example(&mut self, example: impl Into<String>) {
        self.examples.push(example.into());
    }

    /// The display name `<first lemma>.<pos>.<sense number>`, lowercased.
    pub fn name(&self) -> String {
        let head = self
            .lemmas
            .first()
            .map(|l| l.form.to_lowercase())
            .unwrap_or_default();
        format!("{}.{}.{}", head, self.pos, self.sense_number)
    }

    /// The definition followed by each example.
    pub fn gloss(&self) -> String {
        let mut gloss = self.definition.clone();
        for example in &self.examples {
            gloss.push_str(&format!("; \"{}\"", example));
        }
        gloss
    }

    pub fn attribute(&self, label: &str) -> Option<&AttributeValue> {
        self.attributes.get(label)
    }

    /// Sets an attribute, returning the previous value under that label.
    pub fn set_attribute(
        &mut self,
        label: impl Into<String>,
        value: AttributeValue,
    ) -> Option<AttributeValue> {
        self.attributes.insert(label.into(), value)
    }

    pub fn attribute_labels(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }

    /// The cached depth range, if it has been computed since the last
    /// relation change.
    pub fn cached_depth(&self) -> Option<DepthRange> {
        self.depth.get().copied()
    }

    pub(crate) fn lemmas_mut(&mut self) -> &mut Vec<Lemma> {
        &mut self.lemmas
    }

    pub(crate) fn invalidate_depth(&mut self) {
        self.depth.take();
    }

    /// Absorbs `other`'s content (not its relations, which live in the graph).
    ///
    /// Lemmas and examples are appended after this synset's own, definitions
    /// are joined with `"; "`, and attributes merge label by label.
    pub(crate) fn absorb(&mut self, other: Synset) {
        self.lemmas.extend(other.lemmas);
        self.examples.extend(other.examples);
        if self.definition.is_empty() {
            self.definition = other.definition;
        } else if !other.definition.is_empty() {
            self.definition.push_str("; ");
            self.definition.push_str(&other.definition);
        }
        for (label, value) in other.attributes {
            match self.attributes.get_mut(&label) {
                Some(existing) => existing.merge(&value),
                None => {
                    self.attributes.insert(label, value);
                }
            }
        }
        self.invalidate_depth();
    }
}

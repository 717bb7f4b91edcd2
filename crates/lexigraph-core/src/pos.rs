//! Part-of-speech tags for synsets.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The four content-word categories a synset can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Adjective,
    Adverb,
}

impl PartOfSpeech {
    /// Every part of speech, in WordNet file order.
    pub const ALL: [PartOfSpeech; 4] = [
        PartOfSpeech::Noun,
        PartOfSpeech::Verb,
        PartOfSpeech::Adjective,
        PartOfSpeech::Adverb,
    ];

    /// The one-letter WordNet code (`n`, `v`, `a`, `r`).
    pub fn code(self) -> char {
        match self {
            PartOfSpeech::Noun => 'n',
            PartOfSpeech::Verb => 'v',
            PartOfSpeech::Adjective => 'a',
            PartOfSpeech::Adverb => 'r',
        }
    }

    /// Parses a WordNet code. Adjective satellites (`s`) fold into
    /// [`PartOfSpeech::Adjective`].
    pub fn from_code(code: char) -> Option<PartOfSpeech> {
        match code.to_ascii_lowercase() {
            'n' => Some(PartOfSpeech::Noun),
            'v' => Some(PartOfSpeech::Verb),
            'a' | 's' => Some(PartOfSpeech::Adjective),
            'r' => Some(PartOfSpeech::Adverb),
            _ => None,
        }
    }

    /// Maps a Penn Treebank tag onto a content-word category.
    ///
    /// Returns `None` for function words (determiners, prepositions, ...).
    pub fn from_penn_tag(tag: &str) -> Option<PartOfSpeech> {
        match tag.chars().next()?.to_ascii_uppercase() {
            'N' => Some(PartOfSpeech::Noun),
            'V' => Some(PartOfSpeech::Verb),
            'J' => Some(PartOfSpeech::Adjective),
            'R' => Some(PartOfSpeech::Adverb),
            _ => None,
        }
    }
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

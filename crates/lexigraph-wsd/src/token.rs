//! Content tokens: the words a ranker annotates.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use lexigraph_core::{OntologyIndex, PartOfSpeech, SynsetId};

/// A content word (noun, verb, adjective or adverb) of one sentence, with
/// its candidate senses and, once ranked, the chosen sense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentToken {
    pub surface: String,
    pub pos: Option<PartOfSpeech>,
    pub candidates: SmallVec<[SynsetId; 4]>,
    /// Written by a ranker; `None` until then, or if no sense was chosen.
    pub sense: Option<SynsetId>,
}

impl ContentToken {
    pub fn new(
        surface: impl Into<String>,
        pos: Option<PartOfSpeech>,
        candidates: impl IntoIterator<Item = SynsetId>,
    ) -> Self {
        ContentToken {
            surface: surface.into(),
            pos,
            candidates: candidates.into_iter().collect(),
            sense: None,
        }
    }
}

/// Resolves `(word, Penn tag)` pairs into content tokens.
///
/// Words whose tag is not a content-word tag are dropped. Candidates come
/// from the tagged part of speech, falling back to every part of speech when
/// that finds nothing; a word with no senses at all is kept with an empty
/// candidate list.
pub fn resolve_tokens<I: OntologyIndex + ?Sized>(
    index: &I,
    words: &[(&str, &str)],
) -> Vec<ContentToken> {
    words
        .iter()
        .filter_map(|(word, tag)| {
            let pos = PartOfSpeech::from_penn_tag(tag)?;
            let candidates = index.lookup_or_any(word, Some(pos));
            Some(ContentToken::new(*word, Some(pos), candidates))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexigraph_core::{Lemma, OntologyGraph, Synset};

    #[test]
    fn function_words_are_dropped_and_pos_falls_back() {
        let mut graph = OntologyGraph::new();
        let bank = graph.add_synset(Synset::new(PartOfSpeech::Noun).with_lemma(Lemma::new("bank")));
        let run = graph.add_synset(Synset::new(PartOfSpeech::Verb).with_lemma(Lemma::new("run")));

        let tokens = resolve_tokens(
            &graph,
            &[("the", "DT"), ("bank", "NN"), ("run", "NN"), ("quickly", "RB")],
        );

        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].candidates.as_slice(), &[bank]);
        assert_eq!(tokens[1].candidates.as_slice(), &[run]);
        assert!(tokens[2].candidates.is_empty());
        assert_eq!(tokens[2].pos, Some(PartOfSpeech::Adverb));
    }
}

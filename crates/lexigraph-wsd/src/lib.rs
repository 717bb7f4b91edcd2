//! Graph-based word sense disambiguation.
//!
//! A sentence arrives as [`ContentToken`]s carrying candidate senses from
//! the lemma index. A [`SenseRanker`] writes one chosen sense per token:
//!
//! - [`FirstSenseRanker`] takes the first candidate.
//! - [`DegreeCentralityRanker`] carves a depth-bounded subgraph linking the
//!   sentence's candidates and prefers the best-connected sense.
//! - [`PersonalizedPageRankRanker`] ranks senses by random walks restarted
//!   at the focus token and its context window.
//!
//! Rankers only read the ontology, so one ranker can serve many threads.

pub mod carve;
pub mod config;
pub mod degree;
pub mod error;
pub mod first_sense;
pub mod pagerank;
pub mod token;

pub use carve::{GlossLinks, SenseSubgraph, SubgraphCarver};
pub use config::{CarveConfig, PageRankConfig};
pub use degree::{select_by_degree, DegreeCentralityRanker};
pub use error::WsdError;
pub use first_sense::FirstSenseRanker;
pub use pagerank::{Overlay, PersonalizedPageRankRanker, RankVector, TransitionGraph};
pub use token::{resolve_tokens, ContentToken};

/// Chooses a sense for each token of one sentence.
pub trait SenseRanker {
    /// Sets `sense` on every token that has at least one candidate and
    /// returns how many were set. Tokens without candidates are untouched.
    fn annotate(&self, tokens: &mut [ContentToken]) -> Result<usize, WsdError>;
}

//! First-sense baseline.

use crate::error::WsdError;
use crate::token::ContentToken;
use crate::SenseRanker;

/// Picks each token's first candidate. Candidates come from the lemma index
/// in sense order, so this is the most-frequent-sense baseline.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstSenseRanker;

impl SenseRanker for FirstSenseRanker {
    fn annotate(&self, tokens: &mut [ContentToken]) -> Result<usize, WsdError> {
        let mut annotated = 0;
        for token in tokens.iter_mut() {
            if let Some(&first) = token.candidates.first() {
                token.sense = Some(first);
                annotated += 1;
            }
        }
        Ok(annotated)
    }
}

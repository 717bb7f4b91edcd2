//! Mergeable auxiliary values attached to synsets.
//!
//! Attributes hold computed data (feature vectors, source documents, counts)
//! keyed by a string label. When two synsets merge, attributes sharing a
//! label are combined with [`AttributeValue::merge`].

use serde::{Deserialize, Serialize};

/// A typed attribute value with its own merge rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum AttributeValue {
    /// Dense vector; merges by elementwise sum.
    Vector(Vec<f64>),
    /// Document names; merges by appending names not already present.
    Documents(Vec<String>),
    /// Occurrence count; merges by sum.
    Count(u64),
}

impl AttributeValue {
    /// Folds `other` into `self`.
    ///
    /// Vectors of different lengths are summed as if the shorter one were
    /// zero-padded. Values of different kinds leave `self` unchanged.
    pub fn merge(&mut self, other: &AttributeValue) {
        match (self, other) {
            (AttributeValue::Vector(mine), AttributeValue::Vector(theirs)) => {
                if theirs.len() > mine.len() {
                    mine.resize(theirs.len(), 0.0);
                }
                for (slot, value) in mine.iter_mut().zip(theirs) {
                    *slot += value;
                }
            }
            (AttributeValue::Documents(mine), AttributeValue::Documents(theirs)) => {
                for doc in theirs {
                    if !mine.contains(doc) {
                        mine.push(doc.clone());
                    }
                }
            }
            (AttributeValue::Count(mine), AttributeValue::Count(theirs)) => {
                *mine = mine.saturating_add(*theirs);
            }
            (mine, theirs) => {
                tracing::debug!(
                    "skipping attribute merge of mismatched kinds: {:?} <- {:?}",
                    mine,
                    theirs
                );
            }
        }
    }
}

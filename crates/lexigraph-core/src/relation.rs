//! Relation labels for ontology edges.
//!
//! Every edge in the ontology graph carries a [`Relation`]. The canonical
//! WordNet pointer types are enum variants; anything else (hand-made links,
//! ephemeral labels synthesized by rankers) goes through
//! [`Relation::Custom`]. Edges are directed and never mirrored implicitly:
//! adding `a -hypernym-> b` does not add `b -hyponym-> a`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A typed edge label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    Hypernym,
    InstanceHypernym,
    Hyponym,
    InstanceHyponym,
    Antonym,
    MemberHolonym,
    SubstanceHolonym,
    PartHolonym,
    MemberMeronym,
    SubstanceMeronym,
    PartMeronym,
    Attribute,
    Entailment,
    Cause,
    AlsoSee,
    VerbGroup,
    SimilarTo,
    DerivationallyRelated,
    /// Any label outside the canonical vocabulary.
    Custom(String),
}

impl Relation {
    /// The canonical relations, in WordNet pointer-table order.
    pub const CANONICAL: [Relation; 18] = [
        Relation::Hypernym,
        Relation::InstanceHypernym,
        Relation::Hyponym,
        Relation::InstanceHyponym,
        Relation::Antonym,
        Relation::MemberHolonym,
        Relation::SubstanceHolonym,
        Relation::PartHolonym,
        Relation::MemberMeronym,
        Relation::SubstanceMeronym,
        Relation::PartMeronym,
        Relation::Attribute,
        Relation::Entailment,
        Relation::Cause,
        Relation::AlsoSee,
        Relation::VerbGroup,
        Relation::SimilarTo,
        Relation::DerivationallyRelated,
    ];

    /// Builds a custom label.
    pub fn custom(label: impl Into<String>) -> Relation {
        Relation::Custom(label.into())
    }

    /// Returns `true` for [`Relation::Custom`].
    pub fn is_custom(&self) -> bool {
        matches!(self, Relation::Custom(_))
    }

    /// The label's name: snake_case for canonical relations, the raw label
    /// for custom ones.
    pub fn name(&self) -> &str {
        match self {
            Relation::Hypernym => "hypernym",
            Relation::InstanceHypernym => "instance_hypernym",
            Relation::Hyponym => "hyponym",
            Relation::InstanceHyponym => "instance_hyponym",
            Relation::Antonym => "antonym",
            Relation::MemberHolonym => "member_holonym",
            Relation::SubstanceHolonym => "substance_holonym",
            Relation::PartHolonym => "part_holonym",
            Relation::MemberMeronym => "member_meronym",
            Relation::SubstanceMeronym => "substance_meronym",
            Relation::PartMeronym => "part_meronym",
            Relation::Attribute => "attribute",
            Relation::Entailment => "entailment",
            Relation::Cause => "cause",
            Relation::AlsoSee => "also_see",
            Relation::VerbGroup => "verb_group",
            Relation::SimilarTo => "similar_to",
            Relation::DerivationallyRelated => "derivationally_related",
            Relation::Custom(label) => label.as_str(),
        }
    }

    /// The WordNet pointer symbol, or `None` for custom labels.
    pub fn symbol(&self) -> Option<&'static str> {
        let symbol = match self {
            Relation::Hypernym => "@",
            Relation::InstanceHypernym => "@i",
            Relation::Hyponym => "~",
            Relation::InstanceHyponym => "~i",
            Relation::Antonym => "!",
            Relation::MemberHolonym => "#m",
            Relation::SubstanceHolonym => "#s",
            Relation::PartHolonym => "#p",
            Relation::MemberMeronym => "%m",
            Relation::SubstanceMeronym => "%s",
            Relation::PartMeronym => "%p",
            Relation::Attribute => "=",
            Relation::Entailment => "*",
            Relation::Cause => ">",
            Relation::AlsoSee => "^",
            Relation::VerbGroup => "$",
            Relation::SimilarTo => "&",
            Relation::DerivationallyRelated => "+",
            Relation::Custom(_) => return None,
        };
        Some(symbol)
    }

    /// The relation that points back the other way, if WordNet defines one.
    pub fn reflexive(&self) -> Option<Relation> {
        match self {
            Relation::Hypernym => Some(Relation::Hyponym),
            Relation::Hyponym => Some(Relation::Hypernym),
            Relation::InstanceHypernym => Some(Relation::InstanceHyponym),
            Relation::InstanceHyponym => Some(Relation::InstanceHypernym),
            Relation::Antonym => Some(Relation::Antonym),
            Relation::MemberHolonym => Some(Relation::MemberMeronym),
            Relation::MemberMeronym => Some(Relation::MemberHolonym),
            Relation::SubstanceHolonym => Some(Relation::SubstanceMeronym),
            Relation::SubstanceMeronym => Some(Relation::SubstanceHolonym),
            Relation::PartHolonym => Some(Relation::PartMeronym),
            Relation::PartMeronym => Some(Relation::PartHolonym),
            Relation::AlsoSee => Some(Relation::AlsoSee),
            Relation::SimilarTo => Some(Relation::SimilarTo),
            Relation::DerivationallyRelated => Some(Relation::DerivationallyRelated),
            Relation::Attribute
            | Relation::Entailment
            | Relation::Cause
            | Relation::VerbGroup
            | Relation::Custom(_) => None,
        }
    }

    /// Parses a canonical name or pointer symbol; anything else becomes a
    /// custom label.
    pub fn parse(label: &str) -> Relation {
        Relation::CANONICAL
            .into_iter()
            .find(|rel| rel.name() == label || rel.symbol() == Some(label))
            .unwrap_or_else(|| Relation::Custom(label.to_string()))
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<&str> for Relation {
    fn from(label: &str) -> Self {
        Relation::parse(label)
    }
}

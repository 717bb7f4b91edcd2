pub mod attribute;
pub mod error;
pub mod graph;
pub mod hierarchy;
pub mod id;
pub mod index;
pub mod pos;
pub mod relation;
pub mod scoped;
pub mod synset;

// Re-export commonly used types
pub use attribute::AttributeValue;
pub use error::OntologyError;
pub use graph::OntologyGraph;
pub use hierarchy::HypernymStatus;
pub use id::SynsetId;
pub use index::{LemmaIndex, OntologyIndex};
pub use pos::PartOfSpeech;
pub use relation::Relation;
pub use scoped::ScopedInsertion;
pub use synset::{DepthRange, Lemma, Synset};

//! Carving and ranking configuration.

use serde::{Deserialize, Serialize};

use crate::error::WsdError;

/// Bounds on subgraph carving.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarveConfig {
    /// Maximum number of edges on a path between two connected senses.
    pub max_depth: usize,
    /// Also step between a synset and the senses of monosemous words in its
    /// definition.
    pub gloss_links: bool,
}

impl Default for CarveConfig {
    fn default() -> Self {
        CarveConfig {
            max_depth: 5,
            gloss_links: true,
        }
    }
}

/// Personalized PageRank parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageRankConfig {
    /// Probability of following an edge rather than teleporting to a seed.
    pub damping: f64,
    /// Iteration stops once the L1 change between iterates drops below this.
    pub tolerance: f64,
    pub max_iterations: usize,
    /// Context tokens taken on each side of the focus token.
    pub window: usize,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        PageRankConfig {
            damping: 0.85,
            tolerance: 1e-10,
            max_iterations: 100,
            window: 5,
        }
    }
}

impl PageRankConfig {
    pub fn validate(&self) -> Result<(), WsdError> {
        if !(0.0..1.0).contains(&self.damping) {
            return Err(WsdError::InvalidConfig {
                reason: format!("damping {} must lie in [0, 1)", self.damping),
            });
        }
        if self.tolerance.is_nan() || self.tolerance <= 0.0 {
            return Err(WsdError::InvalidConfig {
                reason: format!("tolerance {} must be positive", self.tolerance),
            });
        }
        if self.max_iterations == 0 {
            return Err(WsdError::InvalidConfig {
                reason: "max_iterations must be at least 1".into(),
            });
        }
        Ok(())
    }
}

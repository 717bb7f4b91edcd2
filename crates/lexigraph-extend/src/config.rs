//! Extender configuration.

use serde::{Deserialize, Serialize};

/// Tuning knobs shared by both extenders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtenderConfig {
    /// Sort the batch most-connected-first before inserting. Only affects the
    /// order terms are tried in, never which terms are accepted.
    pub order_by_connectivity: bool,
}

impl Default for ExtenderConfig {
    fn default() -> Self {
        ExtenderConfig {
            order_by_connectivity: true,
        }
    }
}

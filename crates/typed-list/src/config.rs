use crate::types::MAX_TYPE_DEPTH;
use serde::Deserialize;

/// Construction-time knobs for a list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ListConfig {
    /// Slots reserved up front.
    pub initial_capacity: usize,
    /// Deepest list-in-list nesting accepted for the item type.
    pub max_type_depth: usize,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 0,
            max_type_depth: MAX_TYPE_DEPTH,
        }
    }
}

impl ListConfig {
    pub fn from_json(text: &str) -> Result<Self, String> {
        serde_json::from_str(text).map_err(|e| format!("Invalid list config: {}", e))
    }

    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    pub fn with_max_type_depth(mut self, depth: usize) -> Self {
        self.max_type_depth = depth;
        self
    }
}

//! # Item Model Configuration
//!
//! Constants for the item size heuristic.

use serde::{Deserialize, Serialize};

/// Default fixed overhead added to every size estimate, in bytes.
pub const DEFAULT_BASE_BYTES: usize = 2000;

/// Default multiplier applied to the raw estimate.
pub const DEFAULT_SAFETY_FACTOR: usize = 2;

/// Parameters of `CommonItem::estimated_size_with`.
///
/// The estimate is a heuristic used to size transport batches; it is not an
/// exact serialised size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizeEstimate {
    /// Fixed overhead per item.
    pub base_bytes: usize,
    /// Multiplier applied after summing all parts.
    pub safety_factor: usize,
}

impl Default for SizeEstimate {
    fn default() -> Self {
        Self {
            base_bytes: DEFAULT_BASE_BYTES,
            safety_factor: DEFAULT_SAFETY_FACTOR,
        }
    }
}

impl SizeEstimate {
    /// Create a config for testing (no overhead, no multiplier).
    pub fn for_testing() -> Self {
        Self {
            base_bytes: 0,
            safety_factor: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SizeEstimate::default();
        assert_eq!(config.base_bytes, 2000);
        assert_eq!(config.safety_factor, 2);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: SizeEstimate = serde_json::from_str(r#"{"base_bytes": 10}"#).unwrap();
        assert_eq!(config.base_bytes, 10);
        assert_eq!(config.safety_factor, DEFAULT_SAFETY_FACTOR);
    }
}

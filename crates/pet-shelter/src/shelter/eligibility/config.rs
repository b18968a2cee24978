use serde::{Deserialize, Serialize};

/// Thresholds gating an adoption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityConfig {
    pub minimum_age: i32,
    pub untrained_dog_minimum_age: i32,
    pub adoption_quota: usize,
}

impl Default for EligibilityConfig {
    fn default() -> Self {
        Self {
            minimum_age: 18,
            untrained_dog_minimum_age: 21,
            adoption_quota: 3,
        }
    }
}

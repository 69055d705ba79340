//! Gate policy: quota range and probability clamp.

use serde::{Deserialize, Serialize};

use super::seed::SeedScheme;
use crate::domain::ConfigError;

/// Upper bound on `max_target`; keeps `randbelow` within a single 32-bit draw.
pub const MAX_TARGET_LIMIT: u32 = 10_000;

/// Sampling policy for the gate.
///
/// Default: quota uniform in [5, 20], pacing probability clamped to [0.15, 1.0].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatePolicy {
    pub min_target: u32,
    pub max_target: u32,
    pub probability_floor: f64,
    pub probability_ceiling: f64,
    pub seed_scheme: SeedScheme,
}

impl Default for GatePolicy {
    fn default() -> Self {
        Self {
            min_target: 5,
            max_target: 20,
            probability_floor: 0.15,
            probability_ceiling: 1.0,
            seed_scheme: SeedScheme::PythonCompat,
        }
    }
}

impl GatePolicy {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_target < 1 {
            return Err(ConfigError::Invalid("gate.min_target must be at least 1".into()));
        }
        if self.max_target < self.min_target {
            return Err(ConfigError::Invalid(format!(
                "gate.max_target ({}) is below gate.min_target ({})",
                self.max_target, self.min_target
            )));
        }
        if self.max_target > MAX_TARGET_LIMIT {
            return Err(ConfigError::Invalid(format!(
                "gate.max_target must not exceed {MAX_TARGET_LIMIT}"
            )));
        }
        for (name, value) in [
            ("probability_floor", self.probability_floor),
            ("probability_ceiling", self.probability_ceiling),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Invalid(format!(
                    "gate.{name} must be within [0, 1], got {value}"
                )));
            }
        }
        if self.probability_floor > self.probability_ceiling {
            return Err(ConfigError::Invalid(
                "gate.probability_floor is above gate.probability_ceiling".into(),
            ));
        }
        Ok(())
    }

    /// Pacing probability for `remaining_needed` samples over `hours_remaining` hours.
    ///
    /// `remaining / max(1, hours)`, clamped to `[floor, ceiling]`.
    pub fn pacing_probability(&self, remaining_needed: u32, hours_remaining: u32) -> f64 {
        let ratio = remaining_needed as f64 / hours_remaining.max(1) as f64;
        ratio.clamp(self.probability_floor, self.probability_ceiling)
    }
}

//! Decision model: the gate's "run now?" answer and what it was based on.
//!
//! `DecisionContext` is derived fresh on every call and never persisted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Inputs the gate derived for one decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionContext {
    /// Current UTC date. Seed and prefix key.
    pub calendar_date: NaiveDate,

    /// Daily quota drawn from the date-seeded generator.
    pub target_count: u32,

    /// Observations already recorded today.
    pub observed_count: u32,

    /// `24 - hour`, in `1..=24`.
    pub hours_remaining: u32,
}

impl DecisionContext {
    /// `YYYY-MM-DD`
    pub fn date_key(&self) -> String {
        self.calendar_date.format("%Y-%m-%d").to_string()
    }

    pub fn target_reached(&self) -> bool {
        self.observed_count >= self.target_count
    }

    /// `target - observed`; zero once the target is reached.
    pub fn remaining_needed(&self) -> u32 {
        self.target_count.saturating_sub(self.observed_count)
    }
}

/// Why the gate decided what it did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GateReason {
    /// Quota met. No randomness consulted.
    TargetReached,

    /// Bernoulli draw against the pacing probability.
    Paced { probability: f64, draw: f64 },
}

/// The gate's answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateDecision {
    pub run: bool,
    pub reason: GateReason,
    pub context: DecisionContext,
}

impl GateDecision {
    /// Pacing probability, if one was computed.
    pub fn probability(&self) -> Option<f64> {
        match self.reason {
            GateReason::Paced { probability, .. } => Some(probability),
            GateReason::TargetReached => None,
        }
    }

    /// Line published to the decision output channel.
    pub fn output_line(&self) -> String {
        format!("run={}", self.run)
    }
}

impl fmt::Display for GateDecision {
    /// Human-readable justification.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ctx = &self.context;
        match self.reason {
            GateReason::TargetReached => write!(
                f,
                "already reached target {} (count={})",
                ctx.target_count, ctx.observed_count
            ),
            GateReason::Paced { probability, .. } => write!(
                f,
                "count={}, target={}, remaining_hours={}, p={:.2}",
                ctx.observed_count, ctx.target_count, ctx.hours_remaining, probability
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(target: u32, observed: u32, hours: u32) -> DecisionContext {
        DecisionContext {
            calendar_date: NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
            target_count: target,
            observed_count: observed,
            hours_remaining: hours,
        }
    }

    #[test]
    fn target_reached_reason() {
        let decision = GateDecision {
            run: false,
            reason: GateReason::TargetReached,
            context: context(12, 12, 5),
        };
        assert_eq!(decision.to_string(), "already reached target 12 (count=12)");
        assert_eq!(decision.output_line(), "run=false");
        assert_eq!(decision.probability(), None);
    }

    #[test]
    fn paced_reason_rounds_probability() {
        let decision = GateDecision {
            run: true,
            reason: GateReason::Paced {
                probability: 10.0 / 24.0,
                draw: 0.1,
            },
            context: context(10, 0, 24),
        };
        assert_eq!(
            decision.to_string(),
            "count=0, target=10, remaining_hours=24, p=0.42"
        );
        assert_eq!(decision.output_line(), "run=true");
    }

    #[test]
    fn remaining_needed_saturates() {
        assert_eq!(context(10, 2, 4).remaining_needed(), 8);
        assert_eq!(context(10, 14, 4).remaining_needed(), 0);
        assert!(context(10, 14, 4).target_reached());
        assert_eq!(context(10, 2, 4).date_key(), "2024-02-29");
    }
}

//! SamplingGate - 「今 fetch するか？」の判断
//!
//! 純粋関数として設計されます（now + 履歴 → Decision）。副作用なし。
//! 1 日の目標件数は日付だけから決まり、同じ日なら何度呼んでも同じ値になります。

use chrono::{DateTime, NaiveDate, Timelike, Utc};

use super::policy::GatePolicy;
use crate::domain::observation::date_key;
use crate::domain::{ConfigError, DecisionContext, GateDecision, GateReason, HistorySnapshot};
use crate::ports::Decider;

/// Default gate: date-seeded daily quota plus time-decayed probability.
///
/// 1. seed a generator from `YYYY-MM-DD`
/// 2. first draw: `target_count` in `[min_target, max_target]`
/// 3. quota met → `run=false`, nothing else drawn
/// 4. otherwise `p = clamp(remaining / max(1, remaining_hours))` and a second
///    draw `u`; `run = u < p`
#[derive(Debug, Clone)]
pub struct SamplingGate {
    policy: GatePolicy,
}

impl SamplingGate {
    /// Create a gate, rejecting an invalid policy up front so `decide` never fails.
    pub fn new(policy: GatePolicy) -> Result<Self, ConfigError> {
        policy.validate()?;
        Ok(Self { policy })
    }

    pub fn policy(&self) -> &GatePolicy {
        &self.policy
    }

    /// Daily quota for `date`. Pure function of the date and seed scheme.
    pub fn target_for(&self, date: NaiveDate) -> u32 {
        let key = date.format("%Y-%m-%d").to_string();
        let mut draws = self.policy.seed_scheme.generator(&key);
        draws.draw_in_range(self.policy.min_target, self.policy.max_target)
    }

    /// Build the context for `now` without drawing the second value.
    pub fn context(&self, now: DateTime<Utc>, history: &HistorySnapshot) -> DecisionContext {
        let today = now.date_naive();
        let observed = history.observed_on(&date_key(now));
        DecisionContext {
            calendar_date: today,
            target_count: self.target_for(today),
            observed_count: u32::try_from(observed).unwrap_or(u32::MAX),
            hours_remaining: hours_remaining(now),
        }
    }
}

impl Decider for SamplingGate {
    fn decide(&self, now: DateTime<Utc>, history: &HistorySnapshot) -> GateDecision {
        let today = date_key(now);
        let mut draws = self.policy.seed_scheme.generator(&today);
        // first draw from the seed is always the target
        let target_count = draws.draw_in_range(self.policy.min_target, self.policy.max_target);

        let observed = history.observed_on(&today);
        let context = DecisionContext {
            calendar_date: now.date_naive(),
            target_count,
            observed_count: u32::try_from(observed).unwrap_or(u32::MAX),
            hours_remaining: hours_remaining(now),
        };

        if context.target_reached() {
            let decision = GateDecision {
                run: false,
                reason: GateReason::TargetReached,
                context,
            };
            tracing::info!(
                target_count,
                count = decision.context.observed_count,
                "{decision}"
            );
            return decision;
        }

        let probability = self
            .policy
            .pacing_probability(context.remaining_needed(), context.hours_remaining);
        let draw = draws.draw_unit();
        let decision = GateDecision {
            run: draw < probability,
            reason: GateReason::Paced { probability, draw },
            context,
        };
        tracing::info!(
            target_count,
            count = decision.context.observed_count,
            remaining_hours = decision.context.hours_remaining,
            p = probability,
            run = decision.run,
            "{decision}"
        );
        decision
    }
}

/// `24 - hour` for the UTC hour of `now`; always in `1..=24`.
pub fn hours_remaining(now: DateTime<Utc>) -> u32 {
    24 - now.hour()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::SeedScheme;
    use chrono::TimeZone;
    use rstest::rstest;

    fn gate() -> SamplingGate {
        SamplingGate::new(GatePolicy::default()).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 30, 0).unwrap()
    }

    fn history_with(date: &str, n: usize) -> HistorySnapshot {
        let mut stamps: Vec<String> = (0..n).map(|i| format!("{date} 00:{i:02}:00")).collect();
        stamps.push("1999-01-01 00:00:00".to_string());
        HistorySnapshot::Loaded(stamps)
    }

    #[test]
    fn target_is_deterministic_per_date() {
        let g = gate();
        let date = NaiveDate::from_ymd_opt(2026, 10, 14).unwrap();
        assert_eq!(g.target_for(date), g.target_for(date));
        assert_eq!(g.target_for(date), 13);
    }

    #[test]
    fn target_always_in_range() {
        for scheme in [SeedScheme::PythonCompat, SeedScheme::Pcg] {
            let g = SamplingGate::new(GatePolicy {
                seed_scheme: scheme,
                ..GatePolicy::default()
            })
            .unwrap();
            let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
            for offset in 0..400 {
                let date = start + chrono::Days::new(offset);
                assert!((5..=20).contains(&g.target_for(date)));
            }
        }
    }

    #[test]
    fn reached_target_never_runs() {
        // 2024-02-29 seeds a target of 12
        let g = gate();
        for hour in 0..24 {
            let decision = g.decide(at(2024, 2, 29, hour), &history_with("2024-02-29", 12));
            assert!(!decision.run);
            assert_eq!(decision.reason, GateReason::TargetReached);
            assert_eq!(decision.to_string(), "already reached target 12 (count=12)");
        }
        let over = g.decide(at(2024, 2, 29, 3), &history_with("2024-02-29", 30));
        assert!(!over.run);
    }

    #[test]
    fn ceiling_probability_always_runs() {
        // 2024-03-02: target 10, 2 observed, 4 hours left -> ratio 2.0 -> p = 1.0
        let decision = gate().decide(at(2024, 3, 2, 20), &history_with("2024-03-02", 2));
        assert_eq!(decision.context.target_count, 10);
        assert_eq!(decision.context.hours_remaining, 4);
        assert_eq!(decision.probability(), Some(1.0));
        assert!(decision.run);
        assert_eq!(decision.to_string(), "count=2, target=10, remaining_hours=4, p=1.00");
    }

    #[test]
    fn bernoulli_draw_matches_reference_generator() {
        // 2024-01-01: target 10, unit draw 0.7668... against p = 10/24
        let decision = gate().decide(at(2024, 1, 1, 0), &HistorySnapshot::empty());
        assert_eq!(decision.context.target_count, 10);
        assert_eq!(decision.context.hours_remaining, 24);
        assert!(!decision.run);
        assert_eq!(
            decision.reason,
            GateReason::Paced {
                probability: 10.0 / 24.0,
                draw: 0.7668443899133772
            }
        );
        assert_eq!(decision.to_string(), "count=0, target=10, remaining_hours=24, p=0.42");

        // 2024-01-09: target 20, unit draw 0.1033 against p = 20/24
        let decision = gate().decide(at(2024, 1, 9, 0), &HistorySnapshot::empty());
        assert_eq!(decision.context.target_count, 20);
        assert!(decision.run);
    }

    #[rstest]
    #[case::low_draw_runs("2024-04-11", (2024, 4, 11), true)]
    #[case::high_draw_skips("2024-02-09", (2024, 2, 9), false)]
    fn floor_probability_applies(
        #[case] date: &str,
        #[case] ymd: (i32, u32, u32),
        #[case] expected_run: bool,
    ) {
        // target 20, 19 observed, 24 hours left -> ratio 1/24 -> floor 0.15
        let decision = gate().decide(at(ymd.0, ymd.1, ymd.2, 0), &history_with(date, 19));
        assert_eq!(decision.context.target_count, 20);
        assert_eq!(decision.probability(), Some(0.15));
        assert_eq!(decision.run, expected_run);
    }

    #[test]
    fn unavailable_history_counts_zero() {
        let history = HistorySnapshot::Unavailable("no such file".to_string());
        let decision = gate().decide(at(2024, 2, 29, 23), &history);
        assert_eq!(decision.context.observed_count, 0);
        assert_eq!(decision.context.hours_remaining, 1);
        // 12 needed in the last hour -> p = 1.0
        assert!(decision.run);
    }

    #[test]
    fn context_matches_decision() {
        let g = gate();
        let now = at(2024, 3, 2, 20);
        let history = history_with("2024-03-02", 2);
        assert_eq!(g.context(now, &history), g.decide(now, &history).context);
    }

    #[test]
    fn hours_remaining_spans_one_to_twenty_four() {
        assert_eq!(hours_remaining(at(2024, 1, 1, 0)), 24);
        assert_eq!(hours_remaining(at(2024, 1, 1, 23)), 1);
    }

    #[test]
    fn invalid_policy_is_rejected() {
        let policy = GatePolicy {
            max_target: 1,
            ..GatePolicy::default()
        };
        assert!(SamplingGate::new(policy).is_err());
    }
}

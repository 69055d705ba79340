use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::observation::date_key;
use crate::domain::{Observation, OrbitrailError};
use crate::gate::SamplingGate;
use crate::ports::ObservationStore;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackSummary {
    pub date: String,
    pub total_points: usize,
    pub today_points: usize,
    pub target_today: u32,
    pub latest: Option<Observation>,
}

impl TrackSummary {
    pub fn collect(
        store: &dyn ObservationStore,
        gate: &SamplingGate,
        now: DateTime<Utc>,
    ) -> Result<Self, OrbitrailError> {
        let table = store.load()?;
        let date = date_key(now);
        Ok(Self {
            total_points: table.len(),
            today_points: table.iter().filter(|o| o.recorded_on(&date)).count(),
            target_today: gate.target_for(now.date_naive()),
            latest: table.last().cloned(),
            date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::GatePolicy;
    use crate::impls::InMemoryObservationStore;
    use chrono::TimeZone;

    #[test]
    fn summarizes_today() {
        let rows = ["2024-01-01 23:00:00", "2024-01-02 00:10:00", "2024-01-02 03:00:00"]
            .iter()
            .map(|ts| Observation {
                lat: 1.0,
                lon: 2.0,
                ts: ts.to_string(),
            })
            .collect();
        let store = InMemoryObservationStore::with_rows(rows);
        let gate = SamplingGate::new(GatePolicy::default()).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 1, 2, 4, 0, 0).unwrap();

        let summary = TrackSummary::collect(&store, &gate, now).unwrap();
        assert_eq!(summary.date, "2024-01-02");
        assert_eq!(summary.total_points, 3);
        assert_eq!(summary.today_points, 2);
        assert_eq!(summary.latest.unwrap().ts, "2024-01-02 03:00:00");
        assert!((5..=20).contains(&summary.target_today));
    }

    #[test]
    fn empty_store_has_no_latest() {
        let store = InMemoryObservationStore::new();
        let gate = SamplingGate::new(GatePolicy::default()).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let summary = TrackSummary::collect(&store, &gate, now).unwrap();
        assert_eq!(summary.total_points, 0);
        assert_eq!(summary.target_today, 10);
        assert!(summary.latest.is_none());
    }
}

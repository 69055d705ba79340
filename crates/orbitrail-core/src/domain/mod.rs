//! Domain model (observations, gate decisions, history snapshots, ids, errors).

pub mod decision;
pub mod errors;
pub mod history;
pub mod ids;
pub mod observation;

pub use self::decision::{DecisionContext, GateDecision, GateReason};
pub use self::errors::{ConfigError, ErrorKind, FetchError, OrbitrailError, RenderError, StoreError};
pub use self::history::HistorySnapshot;
pub use self::ids::RunId;
pub use self::observation::{Observation, TIMESTAMP_FORMAT};

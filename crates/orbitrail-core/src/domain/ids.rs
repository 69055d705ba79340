//! Domain identifiers.
//!
//! 1 回の起動（invocation）を ULID で識別します。
//! ログの span と `InvocationReport` に載せるだけで、永続化はしません。

use serde::{Deserialize, Serialize};
use std::fmt;
use ulid::Ulid;

/// 起動 1 回分の ID（Display は `run-<ULID>`）
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RunId(Ulid);

impl RunId {
    pub fn from_ulid(ulid: Ulid) -> Self {
        Self(ulid)
    }

    pub fn as_ulid(&self) -> Ulid {
        self.0
    }

    /// ULID の timestamp 部分（ミリ秒）
    pub fn timestamp_ms(&self) -> u64 {
        self.0.timestamp_ms()
    }
}

impl From<Ulid> for RunId {
    fn from(ulid: Ulid) -> Self {
        Self::from_ulid(ulid)
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "run-{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_has_prefix() {
        let id = RunId::from(Ulid::from_parts(1_700_000_000_000, 42));
        assert!(id.to_string().starts_with("run-"));
        assert_eq!(id.timestamp_ms(), 1_700_000_000_000);
    }
}

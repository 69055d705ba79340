//! HistorySnapshot - ゲートが見る履歴（fail-open）
//!
//! 読み込みに失敗しても例外にはせず、`Unavailable` として「0 件」に倒します。
//! 履歴が読めないことで「実行する」判断を塞がないため。

use crate::domain::OrbitrailError;

/// Result of reading the observation history for the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistorySnapshot {
    /// 読めた timestamp 列
    Loaded(Vec<String>),
    /// 読めなかった（理由だけ保持）
    Unavailable(String),
}

impl HistorySnapshot {
    pub fn empty() -> Self {
        HistorySnapshot::Loaded(Vec::new())
    }

    /// ストアの読み込み結果を fail-open で包む
    pub fn from_read(result: Result<Vec<String>, OrbitrailError>) -> Self {
        match result {
            Ok(timestamps) => HistorySnapshot::Loaded(timestamps),
            Err(err) => {
                tracing::warn!(error = %err, "history unavailable, counting zero observations");
                HistorySnapshot::Unavailable(err.to_string())
            }
        }
    }

    /// `date_key` で始まる timestamp の件数。`Unavailable` は 0。
    pub fn observed_on(&self, date_key: &str) -> usize {
        match self {
            HistorySnapshot::Loaded(timestamps) => timestamps
                .iter()
                .filter(|ts| ts.starts_with(date_key))
                .count(),
            HistorySnapshot::Unavailable(_) => 0,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, HistorySnapshot::Loaded(_))
    }
}

impl Default for HistorySnapshot {
    fn default() -> Self {
        Self::empty()
    }
}

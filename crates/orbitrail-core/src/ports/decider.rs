//! Decider port - 「今 fetch するか？」を決める
//!
//! Decider は純粋関数として設計されます（副作用なし）。
//! 決定の公開（`run=true/false`）は呼び出し側の責務です。

use chrono::{DateTime, Utc};

use crate::domain::{GateDecision, HistorySnapshot};

/// Decider は現在時刻と履歴から GateDecision を生成
///
/// # 設計原則
/// - 純粋関数（now + history → decision）
/// - 失敗しない（履歴が読めない場合は `HistorySnapshot::Unavailable` で渡される）
pub trait Decider {
    fn decide(&self, now: DateTime<Utc>, history: &HistorySnapshot) -> GateDecision;
}

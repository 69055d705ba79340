//! DecisionSink port - 決定の出力チャネル
//!
//! 外側のオーケストレーション（CI の job など）が読む key/value ファイルに
//! `run=true` / `run=false` を 1 行書きます。

use crate::domain::{GateDecision, OrbitrailError};

pub trait DecisionSink {
    fn publish(&self, decision: &GateDecision) -> Result<(), OrbitrailError>;
}

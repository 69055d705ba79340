//! PositionSource port - 追跡対象の現在位置

use crate::domain::{Observation, OrbitrailError};

/// PositionSource は現在位置を 1 件返す
///
/// 失敗（到達不能, 非 2xx, 不正な payload）は致命的。リトライしない。
/// 次回の起動がリトライの代わり。
pub trait PositionSource {
    fn fetch_current_position(&self) -> Result<Observation, OrbitrailError>;
}

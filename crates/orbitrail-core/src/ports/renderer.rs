//! TrackRenderer port - 軌跡の可視化

use crate::domain::{Observation, OrbitrailError};

/// TrackRenderer はテーブル全体から 1 つの文書を生成
///
/// # 前提条件
/// - `track` は空でないこと（最新点を強調表示するため）
pub trait TrackRenderer {
    fn render(&self, track: &[Observation]) -> Result<String, OrbitrailError>;
}

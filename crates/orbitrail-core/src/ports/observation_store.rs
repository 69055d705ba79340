//! ObservationStore port - 観測テーブルの永続化
//!
//! 追記のみのテーブル（lat, lon, ts）。書き込みは毎回全量の書き換え。

use crate::domain::{HistorySnapshot, Observation, OrbitrailError};

pub trait ObservationStore {
    /// 全行を読む。ストアが存在しなければ空テーブル。
    fn load(&self) -> Result<Vec<Observation>, OrbitrailError>;

    /// `ts` 列だけを読む。列がなければエラー。
    fn load_timestamps(&self) -> Result<Vec<String>, OrbitrailError>;

    /// `row` を末尾に追加し、ストア全体を書き換える。追加後のテーブルを返す。
    fn append_and_persist(
        &self,
        table: Vec<Observation>,
        row: Observation,
    ) -> Result<Vec<Observation>, OrbitrailError>;

    /// ゲート用の fail-open 読み込み
    fn history(&self) -> HistorySnapshot {
        HistorySnapshot::from_read(self.load_timestamps())
    }
}

//! InMemory 実装（開発用・テスト用）
//!
//! - **InMemoryObservationStore**: Vec で持つ観測テーブル
//! - **StaticPositionSource**: 決まった結果を返す position source
//! - **RecordingSink**: 公開された行を記録する DecisionSink
//! - **RecordingRenderer**: 渡された行数を記録する TrackRenderer

use std::cell::{Cell, RefCell};
use std::path::PathBuf;

use crate::domain::{FetchError, GateDecision, Observation, OrbitrailError, RenderError, StoreError};
use crate::ports::{DecisionSink, ObservationStore, PositionSource, TrackRenderer};

#[derive(Debug, Default)]
pub struct InMemoryObservationStore {
    rows: RefCell<Vec<Observation>>,
    unreadable: Cell<bool>,
}

impl InMemoryObservationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: Vec<Observation>) -> Self {
        Self {
            rows: RefCell::new(rows),
            unreadable: Cell::new(false),
        }
    }

    /// 以降の `load_timestamps` を失敗させる（fail-open の確認用）
    pub fn make_unreadable(&self) {
        self.unreadable.set(true);
    }

    pub fn rows(&self) -> Vec<Observation> {
        self.rows.borrow().clone()
    }
}

impl ObservationStore for InMemoryObservationStore {
    fn load(&self) -> Result<Vec<Observation>, OrbitrailError> {
        Ok(self.rows())
    }

    fn load_timestamps(&self) -> Result<Vec<String>, OrbitrailError> {
        if self.unreadable.get() {
            return Err(StoreError::MissingColumn {
                path: PathBuf::from("<memory>"),
                column: "ts",
            }
            .into());
        }
        Ok(self.rows.borrow().iter().map(|o| o.ts.clone()).collect())
    }

    fn append_and_persist(
        &self,
        mut table: Vec<Observation>,
        row: Observation,
    ) -> Result<Vec<Observation>, OrbitrailError> {
        table.push(row);
        *self.rows.borrow_mut() = table.clone();
        Ok(table)
    }
}

/// Returns the same observation on every fetch, or fails if none is set.
#[derive(Debug, Default)]
pub struct StaticPositionSource {
    next: Option<Observation>,
    calls: Cell<usize>,
}

impl StaticPositionSource {
    pub fn new(observation: Observation) -> Self {
        Self {
            next: Some(observation),
            calls: Cell::new(0),
        }
    }

    /// 常に InvalidPayload で失敗する source
    pub fn failing() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl PositionSource for StaticPositionSource {
    fn fetch_current_position(&self) -> Result<Observation, OrbitrailError> {
        self.calls.set(self.calls.get() + 1);
        self.next.clone().ok_or_else(|| {
            FetchError::InvalidPayload("no position configured".into()).into()
        })
    }
}

#[derive(Debug, Default)]
pub struct RecordingSink {
    lines: RefCell<Vec<String>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }
}

impl DecisionSink for RecordingSink {
    fn publish(&self, decision: &GateDecision) -> Result<(), OrbitrailError> {
        self.lines.borrow_mut().push(decision.output_line());
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct RecordingRenderer {
    rendered: RefCell<Vec<usize>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// 各 render 呼び出しでの行数
    pub fn rendered(&self) -> Vec<usize> {
        self.rendered.borrow().clone()
    }
}

impl TrackRenderer for RecordingRenderer {
    fn render(&self, track: &[Observation]) -> Result<String, OrbitrailError> {
        let latest = track.last().ok_or(RenderError::EmptyTrack)?;
        self.rendered.borrow_mut().push(track.len());
        Ok(format!("{} points, latest {}", track.len(), latest.ts))
    }
}

//! AppBuilder - アプリケーションの構築とワイヤリング
//!
//! # 学習ポイント
//! - Builder パターンの実装
//! - 起動時検証（Fail-fast 設計）：ポートが足りなければ build() で失敗

use std::path::PathBuf;

use chrono::{DateTime, Utc};

use super::invocation::{Invocation, InvocationReport};
use super::pipeline::{PipelineReport, TrackPipeline};
use crate::config::OrbitrailConfig;
use crate::domain::{GateDecision, OrbitrailError};
use crate::gate::SamplingGate;
use crate::impls::{CsvObservationStore, GlobeRenderer, OpenNotifySource, sink_for};
use crate::observability::TrackSummary;
use crate::ports::{
    Clock, Decider, DecisionSink, IdGenerator, ObservationStore, PositionSource, SystemClock,
    TrackRenderer, UlidGenerator,
};

/// AppBuilder はアプリケーションを構築
///
/// # 使用例
/// ```ignore
/// let app = AppBuilder::from_config(&config)?
///     .clock(FixedClock::new(at))
///     .build()?;
/// let report = app.run()?;
/// ```
#[derive(Default)]
pub struct AppBuilder {
    clock: Option<Box<dyn Clock>>,
    gate: Option<SamplingGate>,
    decider: Option<Box<dyn Decider>>,
    source: Option<Box<dyn PositionSource>>,
    store: Option<Box<dyn ObservationStore>>,
    renderer: Option<Box<dyn TrackRenderer>>,
    sink: Option<Box<dyn DecisionSink>>,
    html_file: Option<PathBuf>,
}

impl AppBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 本番用の実装で全ポートを埋める
    pub fn from_config(config: &OrbitrailConfig) -> Result<Self, OrbitrailError> {
        config.validate()?;
        let gate = SamplingGate::new(config.gate.clone())?;
        Ok(Self::new()
            .clock(SystemClock)
            .gate(gate)
            .source(OpenNotifySource::new(&config.source)?)
            .store(CsvObservationStore::new(config.store.data_file.clone()))
            .renderer(GlobeRenderer::new(&config.render))
            .boxed_sink(sink_for(config.output.decision_file.as_deref()))
            .html_file(config.render.html_file.clone()))
    }

    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    /// The sampling gate; also used as the decider unless one is set explicitly.
    pub fn gate(mut self, gate: SamplingGate) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn decider(mut self, decider: impl Decider + 'static) -> Self {
        self.decider = Some(Box::new(decider));
        self
    }

    pub fn source(mut self, source: impl PositionSource + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn store(mut self, store: impl ObservationStore + 'static) -> Self {
        self.store = Some(Box::new(store));
        self
    }

    pub fn renderer(mut self, renderer: impl TrackRenderer + 'static) -> Self {
        self.renderer = Some(Box::new(renderer));
        self
    }

    pub fn sink(mut self, sink: impl DecisionSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    pub fn boxed_sink(mut self, sink: Box<dyn DecisionSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn html_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.html_file = Some(path.into());
        self
    }

    /// AppBuilder を構築して App を生成
    ///
    /// # 検証
    /// - すべてのポートが設定されているか
    /// - gate と decider のどちらかがあるか
    pub fn build(self) -> Result<App, OrbitrailError> {
        let gate = self.gate.ok_or(OrbitrailError::MissingPort("sampling gate"))?;
        let decider: Box<dyn Decider> = match self.decider {
            Some(decider) => decider,
            None => Box::new(gate.clone()),
        };
        Ok(App {
            clock: self.clock.ok_or(OrbitrailError::MissingPort("clock"))?,
            gate,
            decider,
            source: self.source.ok_or(OrbitrailError::MissingPort("position source"))?,
            store: self.store.ok_or(OrbitrailError::MissingPort("observation store"))?,
            renderer: self.renderer.ok_or(OrbitrailError::MissingPort("renderer"))?,
            sink: self.sink.ok_or(OrbitrailError::MissingPort("decision sink"))?,
            html_file: self.html_file.ok_or(OrbitrailError::MissingPort("html file"))?,
        })
    }
}

/// Wired application. One method per CLI command.
pub struct App {
    clock: Box<dyn Clock>,
    gate: SamplingGate,
    decider: Box<dyn Decider>,
    source: Box<dyn PositionSource>,
    store: Box<dyn ObservationStore>,
    renderer: Box<dyn TrackRenderer>,
    sink: Box<dyn DecisionSink>,
    html_file: PathBuf,
}

impl App {
    fn pipeline(&self) -> TrackPipeline<'_> {
        TrackPipeline::new(
            self.source.as_ref(),
            self.store.as_ref(),
            self.renderer.as_ref(),
            &self.html_file,
        )
    }

    fn invocation(&self) -> Invocation<'_> {
        Invocation::new(
            UlidGenerator::new(self.clock.as_ref()).generate_run_id(),
            self.clock.as_ref(),
            self.decider.as_ref(),
            self.store.as_ref(),
            self.sink.as_ref(),
            self.pipeline(),
        )
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// gate → 公開 → (run なら) pipeline
    pub fn run(&self) -> Result<InvocationReport, OrbitrailError> {
        self.invocation().run()
    }

    /// 決定して公開するだけ
    pub fn gate(&self) -> Result<GateDecision, OrbitrailError> {
        self.invocation().decide()
    }

    /// gate を通さずに pipeline を実行
    pub fn fetch(&self) -> Result<PipelineReport, OrbitrailError> {
        self.pipeline().run()
    }

    pub fn summary(&self) -> Result<TrackSummary, OrbitrailError> {
        TrackSummary::collect(self.store.as_ref(), &self.gate, self.clock.now())
    }
}

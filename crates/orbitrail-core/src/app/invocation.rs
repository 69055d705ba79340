//! Invocation - 1 回の起動
//!
//! gate → 決定の公開 → (run なら) pipeline。
//! 起動をまたいで残る状態は観測ストアのファイルだけです。

use serde::Serialize;

use super::pipeline::{PipelineReport, TrackPipeline};
use crate::domain::{GateDecision, OrbitrailError, RunId};
use crate::ports::{Clock, Decider, DecisionSink, ObservationStore};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvocationReport {
    pub run_id: RunId,
    pub decision: GateDecision,
    /// `None` when the gate said no.
    pub pipeline: Option<PipelineReport>,
}

pub struct Invocation<'a> {
    run_id: RunId,
    clock: &'a dyn Clock,
    decider: &'a dyn Decider,
    store: &'a dyn ObservationStore,
    sink: &'a dyn DecisionSink,
    pipeline: TrackPipeline<'a>,
}

impl<'a> Invocation<'a> {
    pub fn new(
        run_id: RunId,
        clock: &'a dyn Clock,
        decider: &'a dyn Decider,
        store: &'a dyn ObservationStore,
        sink: &'a dyn DecisionSink,
        pipeline: TrackPipeline<'a>,
    ) -> Self {
        Self {
            run_id,
            clock,
            decider,
            store,
            sink,
            pipeline,
        }
    }

    /// Decide and publish, without fetching.
    pub fn decide(&self) -> Result<GateDecision, OrbitrailError> {
        let history = self.store.history();
        let decision = self.decider.decide(self.clock.now(), &history);
        self.sink.publish(&decision)?;
        Ok(decision)
    }

    pub fn run(&self) -> Result<InvocationReport, OrbitrailError> {
        let _span = tracing::info_span!("invocation", run_id = %self.run_id).entered();

        let decision = self.decide()?;
        let pipeline = if decision.run {
            Some(self.pipeline.run()?)
        } else {
            tracing::info!("gate closed, skipping fetch");
            None
        };

        Ok(InvocationReport {
            run_id: self.run_id,
            decision,
            pipeline,
        })
    }
}

//! TrackPipeline - fetch → load → append+persist → render
//!
//! 部分的な成功はない：どこかで失敗したら起動全体が失敗します。
//! render は append の後にしか呼ばないので、空テーブルを描くことはありません。

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::{Observation, OrbitrailError, RenderError};
use crate::ports::{ObservationStore, PositionSource, TrackRenderer};

/// Result of one full fetch cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineReport {
    /// Rows in the store after the append.
    pub points: usize,
    pub latest: Observation,
    pub html_file: PathBuf,
}

pub struct TrackPipeline<'a> {
    source: &'a dyn PositionSource,
    store: &'a dyn ObservationStore,
    renderer: &'a dyn TrackRenderer,
    html_file: &'a Path,
}

impl<'a> TrackPipeline<'a> {
    pub fn new(
        source: &'a dyn PositionSource,
        store: &'a dyn ObservationStore,
        renderer: &'a dyn TrackRenderer,
        html_file: &'a Path,
    ) -> Self {
        Self {
            source,
            store,
            renderer,
            html_file,
        }
    }

    pub fn run(&self) -> Result<PipelineReport, OrbitrailError> {
        let latest = self.source.fetch_current_position()?;

        let table = self.store.load()?;
        let table = self.store.append_and_persist(table, latest.clone())?;

        let document = self.renderer.render(&table)?;
        std::fs::write(self.html_file, document).map_err(|source| RenderError::Write {
            path: self.html_file.to_path_buf(),
            source,
        })?;

        tracing::info!(
            points = table.len(),
            html_file = %self.html_file.display(),
            "map updated with {} points, latest at {}",
            table.len(),
            latest.ts
        );
        Ok(PipelineReport {
            points: table.len(),
            latest,
            html_file: self.html_file.to_path_buf(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FetchError;
    use crate::impls::{InMemoryObservationStore, RecordingRenderer, StaticPositionSource};

    fn obs(ts: &str) -> Observation {
        Observation {
            lat: 51.5,
            lon: -0.12,
            ts: ts.to_string(),
        }
    }

    #[test]
    fn appends_then_renders_full_track() {
        let dir = tempfile::tempdir().unwrap();
        let html = dir.path().join("iss_map.html");
        let source = StaticPositionSource::new(obs("2024-01-01 02:00:00"));
        let store = InMemoryObservationStore::with_rows(vec![
            obs("2024-01-01 00:00:00"),
            obs("2024-01-01 01:00:00"),
        ]);
        let renderer = RecordingRenderer::new();

        let report = TrackPipeline::new(&source, &store, &renderer, &html)
            .run()
            .unwrap();

        assert_eq!(report.points, 3);
        assert_eq!(report.latest.ts, "2024-01-01 02:00:00");
        assert_eq!(store.rows().len(), 3);
        assert_eq!(renderer.rendered(), vec![3]);
        assert_eq!(
            std::fs::read_to_string(&html).unwrap(),
            "3 points, latest 2024-01-01 02:00:00"
        );
    }

    #[test]
    fn first_run_renders_single_point() {
        let dir = tempfile::tempdir().unwrap();
        let html = dir.path().join("iss_map.html");
        let source = StaticPositionSource::new(obs("2024-01-01 00:00:00"));
        let store = InMemoryObservationStore::new();
        let renderer = RecordingRenderer::new();

        let report = TrackPipeline::new(&source, &store, &renderer, &html)
            .run()
            .unwrap();
        assert_eq!(report.points, 1);
    }

    #[test]
    fn fetch_failure_leaves_store_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let html = dir.path().join("iss_map.html");
        let source = StaticPositionSource::failing();
        let store = InMemoryObservationStore::with_rows(vec![obs("2024-01-01 00:00:00")]);
        let renderer = RecordingRenderer::new();

        let err = TrackPipeline::new(&source, &store, &renderer, &html)
            .run()
            .unwrap_err();
        assert!(matches!(err, OrbitrailError::Fetch(FetchError::InvalidPayload(_))));
        assert_eq!(store.rows().len(), 1);
        assert!(renderer.rendered().is_empty());
        assert!(!html.exists());
    }
}

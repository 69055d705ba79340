//! Decision output channel implementations.
//!
//! - **KeyValueFileSink**: `run=true|false` を key/value ファイルに追記（`$GITHUB_OUTPUT` など）
//! - **StdoutSink**: 出力先が設定されていないときは標準出力へ

use std::ffi::OsString;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::domain::{GateDecision, OrbitrailError};
use crate::ports::DecisionSink;

/// Environment variable naming the orchestrator's key/value file.
pub const GITHUB_OUTPUT_ENV: &str = "GITHUB_OUTPUT";

#[derive(Debug, Clone)]
pub struct KeyValueFileSink {
    path: PathBuf,
}

impl KeyValueFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DecisionSink for KeyValueFileSink {
    fn publish(&self, decision: &GateDecision) -> Result<(), OrbitrailError> {
        let output_error = |source: std::io::Error| OrbitrailError::Output {
            target: self.path.display().to_string(),
            source,
        };
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(output_error)?;
        writeln!(file, "{}", decision.output_line()).map_err(output_error)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl DecisionSink for StdoutSink {
    fn publish(&self, decision: &GateDecision) -> Result<(), OrbitrailError> {
        let mut out = std::io::stdout().lock();
        writeln!(out, "{}", decision.output_line()).map_err(|source| OrbitrailError::Output {
            target: "stdout".to_string(),
            source,
        })
    }
}

/// Pick the sink: explicit file, then `$GITHUB_OUTPUT`, then stdout.
pub fn sink_for(decision_file: Option<&Path>) -> Box<dyn DecisionSink> {
    match output_target(decision_file, std::env::var_os(GITHUB_OUTPUT_ENV)) {
        Some(path) => Box::new(KeyValueFileSink::new(path)),
        None => Box::new(StdoutSink),
    }
}

/// 空の環境変数は未設定として扱う
fn output_target(decision_file: Option<&Path>, from_env: Option<OsString>) -> Option<PathBuf> {
    decision_file
        .map(Path::to_path_buf)
        .or_else(|| from_env.filter(|v| !v.is_empty()).map(PathBuf::from))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DecisionContext, GateReason};
    use chrono::NaiveDate;
    use rstest::rstest;

    fn decision(run: bool) -> GateDecision {
        GateDecision {
            run,
            reason: GateReason::Paced {
                probability: 0.5,
                draw: if run { 0.1 } else { 0.9 },
            },
            context: DecisionContext {
                calendar_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                target_count: 10,
                observed_count: 1,
                hours_remaining: 18,
            },
        }
    }

    #[test]
    fn appends_one_line_per_decision() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output.env");
        std::fs::write(&path, "other=1\n").unwrap();

        let sink = KeyValueFileSink::new(&path);
        sink.publish(&decision(true)).unwrap();
        sink.publish(&decision(false)).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "other=1\nrun=true\nrun=false\n");
    }

    #[test]
    fn explicit_file_wins_over_environment() {
        let target = output_target(
            Some(Path::new("decision.env")),
            Some(OsString::from("/tmp/github_output")),
        );
        assert_eq!(target, Some(PathBuf::from("decision.env")));
    }

    #[rstest]
    #[case(Some("/tmp/github_output"), Some("/tmp/github_output"))]
    #[case(Some(""), None)]
    #[case(None, None)]
    fn environment_then_stdout(#[case] env: Option<&str>, #[case] expected: Option<&str>) {
        let target = output_target(None, env.map(OsString::from));
        assert_eq!(target, expected.map(PathBuf::from));
    }

    #[test]
    fn sink_for_explicit_file_writes_there() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("decision.env");
        sink_for(Some(&path)).publish(&decision(false)).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "run=false\n");
    }

    #[test]
    fn unwritable_target_is_an_output_error() {
        let dir = tempfile::tempdir().unwrap();
        let sink = KeyValueFileSink::new(dir.path().join("missing").join("output.env"));
        let err = sink.publish(&decision(true)).unwrap_err();
        assert!(matches!(err, OrbitrailError::Output { .. }));
    }
}

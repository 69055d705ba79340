//! Errors - エラー型と分類
//!
//! ゲート自身は失敗しません（履歴の読み込み失敗は `HistorySnapshot::Unavailable`）。
//! ここにあるのは fetch / store / render / config / 出力チャネルのエラーです。

use std::path::PathBuf;

use thiserror::Error;

/// ErrorKind は実行エラーの分類
///
/// - Transient: 一時的なエラー（次回の起動がリトライ代わり）
/// - Permanent: 恒久的なエラー（設定ミス・前提条件違反）
/// - Infrastructure: ファイルシステムなどの障害
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transient,
    Permanent,
    Infrastructure,
}

/// Upstream position fetch failures. Always fatal for the invocation.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("malformed position payload: {0}")]
    InvalidPayload(String),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode row for {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{path} has no `{column}` column")]
    MissingColumn { path: PathBuf, column: &'static str },
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("cannot render an empty track")]
    EmptyTrack,

    #[error("failed to encode figure: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// OrbitrailError はドメインエラー
#[derive(Debug, Error)]
pub enum OrbitrailError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to publish decision to {target}: {source}")]
    Output {
        target: String,
        #[source]
        source: std::io::Error,
    },

    #[error("app is missing a {0}")]
    MissingPort(&'static str),
}

impl OrbitrailError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            OrbitrailError::Fetch(_) => ErrorKind::Transient,
            OrbitrailError::Store(_) | OrbitrailError::Output { .. } => ErrorKind::Infrastructure,
            OrbitrailError::Render(RenderError::Write { .. }) => ErrorKind::Infrastructure,
            OrbitrailError::Render(_)
            | OrbitrailError::Config(_)
            | OrbitrailError::MissingPort(_) => ErrorKind::Permanent,
        }
    }
}

//! orbitrail-core
//!
//! Core building blocks for the orbitrail tracker.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（observation, decision, history, ids, errors）
//! - **ports**: 抽象化レイヤー（Clock, PositionSource, ObservationStore, TrackRenderer, DecisionSink, IdGenerator）
//! - **gate**: サンプリングゲート（日付シードの乱数 + 時間減衰の確率）
//! - **impls**: 実装（open-notify, CSV ストア, globe HTML, 出力チャネル, InMemory）
//! - **app**: アプリケーションロジック（builder, pipeline, invocation）
//! - **config**: TOML 設定
//! - **observability**: status views

pub mod domain;
pub mod ports;
pub mod gate;
pub mod impls;
pub mod app;
pub mod config;
pub mod observability;

pub use self::config::OrbitrailConfig;
pub use self::domain::{ErrorKind, OrbitrailError};
pub use self::gate::SamplingGate;

//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **OpenNotifySource**: open-notify API からの位置取得（blocking HTTP）
//! - **CsvObservationStore**: CSV の観測テーブル
//! - **GlobeRenderer**: plotly の globe HTML
//! - **KeyValueFileSink / StdoutSink**: 決定の出力チャネル
//! - **memory**: テスト用の InMemory 実装

pub mod csv_store;
pub mod globe;
pub mod memory;
pub mod open_notify;
pub mod output;

// 主要な型を再エクスポート
pub use self::csv_store::CsvObservationStore;
pub use self::globe::GlobeRenderer;
pub use self::memory::{InMemoryObservationStore, RecordingRenderer, RecordingSink, StaticPositionSource};
pub use self::open_notify::OpenNotifySource;
pub use self::output::{KeyValueFileSink, StdoutSink, sink_for};

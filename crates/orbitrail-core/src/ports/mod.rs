//! Ports - 抽象化レイヤー
//!
//! このモジュールは Hexagonal Architecture の「ポート」を定義します。
//! 各 trait は外部（時計, HTTP API, ファイル, 出力チャネル）への
//! インターフェースを提供し、実装の詳細を隠蔽します。
//!
//! # 設計原則
//! - 1 回の起動は同期・シングルスレッドで完結する
//! - 観測ストアは起動ごとに全量読み込み・全量書き換え（last-writer-wins）

pub mod clock;
pub mod decider;
pub mod decision_sink;
pub mod id_generator;
pub mod observation_store;
pub mod position_source;
pub mod renderer;

// 主要な trait を再エクスポート
pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::decider::Decider;
pub use self::decision_sink::DecisionSink;
pub use self::id_generator::{IdGenerator, UlidGenerator};
pub use self::observation_store::ObservationStore;
pub use self::position_source::PositionSource;
pub use self::renderer::TrackRenderer;

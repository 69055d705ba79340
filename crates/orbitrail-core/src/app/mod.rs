//! App - アプリケーション層
//!
//! このモジュールは、ports を組み合わせてアプリケーションロジックを実装します。
//!
//! # 主要コンポーネント
//! - **AppBuilder**: アプリケーションの構築とワイヤリング
//! - **Invocation**: 1 回の起動（gate → 公開 → pipeline）
//! - **TrackPipeline**: fetch → load → append+persist → render

pub mod builder;
pub mod invocation;
pub mod pipeline;

// 主要な型を再エクスポート
pub use self::builder::{App, AppBuilder};
pub use self::invocation::{Invocation, InvocationReport};
pub use self::pipeline::{PipelineReport, TrackPipeline};

//! Gate - サンプリングレートの調整役
//!
//! 「今日の目標件数」と「今日の残り時間」から、この起動で fetch するかを決めます。
//!
//! # 構成
//! - **policy**: 目標件数の範囲と確率の clamp
//! - **seed**: 日付シードの乱数（CPython 互換 / PCG）
//! - **mersenne**: CPython 互換の MT19937
//! - **sampling**: SamplingGate 本体

pub mod mersenne;
pub mod policy;
pub mod sampling;
pub mod seed;

pub use self::policy::GatePolicy;
pub use self::sampling::{SamplingGate, hours_remaining};
pub use self::seed::{DailyDraws, SeedScheme};

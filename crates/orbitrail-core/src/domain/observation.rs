//! Observation - 追跡対象の位置サンプル 1 件
//!
//! 1 行 = `(lat, lon, ts)`。`ts` は UTC の `YYYY-MM-DD HH:MM:SS` 文字列で、
//! ゲートは先頭 10 文字（日付）の prefix 一致で「今日の件数」を数えます。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::errors::FetchError;

/// ストアに書く timestamp の書式
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 日付キーの書式（ゲートのシード兼 prefix）
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single recorded position sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub lat: f64,
    pub lon: f64,
    pub ts: String,
}

impl Observation {
    /// Build an observation, rejecting coordinates outside the globe.
    pub fn new(lat: f64, lon: f64, at: DateTime<Utc>) -> Result<Self, FetchError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(FetchError::InvalidPayload(format!("latitude out of range: {lat}")));
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(FetchError::InvalidPayload(format!("longitude out of range: {lon}")));
        }
        Ok(Self {
            lat,
            lon,
            ts: at.format(TIMESTAMP_FORMAT).to_string(),
        })
    }

    /// Build an observation from a unix timestamp in seconds.
    pub fn from_unix(lat: f64, lon: f64, unix_secs: i64) -> Result<Self, FetchError> {
        let at = DateTime::<Utc>::from_timestamp(unix_secs, 0).ok_or_else(|| {
            FetchError::InvalidPayload(format!("timestamp out of range: {unix_secs}"))
        })?;
        Self::new(lat, lon, at)
    }

    /// `ts` が指定日（`YYYY-MM-DD`）で始まるか
    pub fn recorded_on(&self, date_key: &str) -> bool {
        self.ts.starts_with(date_key)
    }
}

/// `now` を日付キー（`YYYY-MM-DD`）に変換
pub fn date_key(now: DateTime<Utc>) -> String {
    now.format(DATE_FORMAT).to_string()
}

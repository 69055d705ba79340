//! OpenNotifySource - open-notify の `iss-now` API
//!
//! GET 1 回で `{iss_position: {latitude, longitude}, timestamp}` を取得します。
//! 座標は文字列で返ってくるが、数値でも受け付ける。

use serde::Deserialize;

use crate::config::SourceConfig;
use crate::domain::{FetchError, Observation, OrbitrailError};
use crate::ports::PositionSource;

/// Blocking HTTP source for the current ISS position.
pub struct OpenNotifySource {
    url: String,
    http_client: reqwest::blocking::Client,
}

impl OpenNotifySource {
    pub fn new(config: &SourceConfig) -> Result<Self, OrbitrailError> {
        let http_client = reqwest::blocking::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|source| FetchError::Transport {
                url: config.endpoint.clone(),
                source,
            })?;
        Ok(Self {
            url: config.endpoint.clone(),
            http_client,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl PositionSource for OpenNotifySource {
    fn fetch_current_position(&self) -> Result<Observation, OrbitrailError> {
        tracing::debug!(url = %self.url, "fetching current position");
        let transport = |source: reqwest::Error| FetchError::Transport {
            url: self.url.clone(),
            source,
        };

        let response = self.http_client.get(&self.url).send().map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            }
            .into());
        }

        let body = response.text().map_err(transport)?;
        let observation = parse_payload(&body)?;
        tracing::debug!(lat = observation.lat, lon = observation.lon, ts = %observation.ts, "position fetched");
        Ok(observation)
    }
}

#[derive(Debug, Deserialize)]
struct IssNow {
    iss_position: IssPosition,
    timestamp: i64,
}

#[derive(Debug, Deserialize)]
struct IssPosition {
    latitude: Coordinate,
    longitude: Coordinate,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Coordinate {
    Number(f64),
    Text(String),
}

impl Coordinate {
    fn value(&self, field: &str) -> Result<f64, FetchError> {
        match self {
            Coordinate::Number(v) => Ok(*v),
            Coordinate::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|e| FetchError::InvalidPayload(format!("{field} {s:?}: {e}"))),
        }
    }
}

/// Decode an `iss-now` response body.
pub fn parse_payload(body: &str) -> Result<Observation, FetchError> {
    let payload: IssNow =
        serde_json::from_str(body).map_err(|e| FetchError::InvalidPayload(e.to_string()))?;
    let lat = payload.iss_position.latitude.value("latitude")?;
    let lon = payload.iss_position.longitude.value("longitude")?;
    Observation::from_unix(lat, lon, payload.timestamp)
}

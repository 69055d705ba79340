//! Configuration (`orbitrail.toml`).
//!
//! Every field has a default, so running without a config file behaves
//! exactly like the zero-argument invocation.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::ConfigError;
use crate::gate::GatePolicy;

pub const DEFAULT_ENDPOINT: &str = "http://api.open-notify.org/iss-now.json";
pub const DEFAULT_PLOTLY_SRC: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitrailConfig {
    pub store: StoreConfig,
    pub render: RenderConfig,
    pub source: SourceConfig,
    pub gate: GatePolicy,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Observation table (CSV, `lat,lon,ts`).
    pub data_file: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("iss_positions.csv"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Globe document, overwritten on every run.
    pub html_file: PathBuf,
    pub plotly_src: String,
    pub star_count: usize,
    /// Every n-th point carries hover text.
    pub hover_every: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            html_file: PathBuf::from("iss_map.html"),
            plotly_src: DEFAULT_PLOTLY_SRC.to_string(),
            star_count: 200,
            hover_every: 20,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: 10,
        }
    }
}

impl SourceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Key/value file receiving `run=true|false`. Falls back to `$GITHUB_OUTPUT`.
    pub decision_file: Option<PathBuf>,
}

impl OrbitrailConfig {
    pub fn from_toml(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text, path)
    }

    /// Read `path` if it exists, otherwise use defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.gate.validate()?;
        if self.store.data_file.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("store.data_file is empty".into()));
        }
        if self.render.html_file.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("render.html_file is empty".into()));
        }
        if self.render.hover_every == 0 {
            return Err(ConfigError::Invalid("render.hover_every must be at least 1".into()));
        }
        if self.source.timeout_secs == 0 {
            return Err(ConfigError::Invalid("source.timeout_secs must be at least 1".into()));
        }
        if self.source.endpoint.is_empty() {
            return Err(ConfigError::Invalid("source.endpoint is empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::SeedScheme;

    #[test]
    fn defaults_match_zero_argument_run() {
        let config = OrbitrailConfig::default();
        assert_eq!(config.store.data_file, PathBuf::from("iss_positions.csv"));
        assert_eq!(config.render.html_file, PathBuf::from("iss_map.html"));
        assert_eq!(config.source.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.source.timeout(), Duration::from_secs(10));
        assert_eq!(config.gate, GatePolicy::default());
        assert!(config.output.decision_file.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let text = r#"
            [gate]
            max_target = 30
            seed_scheme = "pcg"

            [output]
            decision_file = "out.env"
        "#;
        let config = OrbitrailConfig::from_toml(text, Path::new("orbitrail.toml")).unwrap();
        assert_eq!(config.gate.max_target, 30);
        assert_eq!(config.gate.min_target, 5);
        assert_eq!(config.gate.seed_scheme, SeedScheme::Pcg);
        assert_eq!(config.output.decision_file, Some(PathBuf::from("out.env")));
        assert_eq!(config.render.star_count, 200);
    }

    #[test]
    fn invalid_bounds_are_rejected() {
        let text = "[gate]\nmin_target = 9\nmax_target = 3\n";
        let err = OrbitrailConfig::from_toml(text, Path::new("orbitrail.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let text = "[source]\ntimeout_secs = 0\n";
        assert!(OrbitrailConfig::from_toml(text, Path::new("orbitrail.toml")).is_err());
    }

    #[test]
    fn unknown_seed_scheme_fails_to_parse() {
        let text = "[gate]\nseed_scheme = \"xorshift\"\n";
        let err = OrbitrailConfig::from_toml(text, Path::new("orbitrail.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = OrbitrailConfig::load_or_default(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, OrbitrailConfig::default());
    }
}

//! Node configuration.
//!
//! Loaded from an optional TOML file named by `RV_CONFIG`, then overridden
//! field by field from the environment:
//!
//! | Variable            | Field                 |
//! |---------------------|-----------------------|
//! | `RV_LISTEN`         | `server.listen`       |
//! | `RV_ROUND_CAPACITY` | `round.capacity`      |
//! | `RV_ROUND_WAIT_MS`  | `round.wait_ms`       |

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use rv_matchmaker::{RoundConfig, RoundConfigError};

pub const ENV_CONFIG_PATH: &str = "RV_CONFIG";
pub const ENV_LISTEN: &str = "RV_LISTEN";
pub const ENV_ROUND_CAPACITY: &str = "RV_ROUND_CAPACITY";
pub const ENV_ROUND_WAIT_MS: &str = "RV_ROUND_WAIT_MS";

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for {var}: {value:?}")]
    InvalidOverride { var: &'static str, value: String },

    #[error("invalid listen address: {0}")]
    InvalidListen(String),

    #[error("max_body_bytes must be greater than zero")]
    ZeroBodyLimit,

    #[error(transparent)]
    Round(#[from] RoundConfigError),
}

/// Complete node configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    pub server: ServerConfig,
    pub round: RoundSection,
}

/// `[server]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind
    pub listen: String,
    /// Largest accepted request body
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: "0.0.0.0:8080".to_string(),
            max_body_bytes: 16 * 1024,
        }
    }
}

/// `[round]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundSection {
    /// Members that close a round immediately
    pub capacity: usize,
    /// Per-member wait before a timeout fires
    pub wait_ms: u64,
}

impl Default for RoundSection {
    fn default() -> Self {
        let defaults = RoundConfig::default();
        Self {
            capacity: defaults.capacity,
            wait_ms: defaults.wait.as_millis() as u64,
        }
    }
}

impl NodeConfig {
    /// Parse a TOML document. Absent sections and keys keep their defaults.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Read and parse a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Load from the process environment: file first, then overrides, then
    /// validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load_with(|var| std::env::var(var).ok())
    }

    /// Same as [`NodeConfig::from_env`] with an injectable variable lookup.
    pub fn load_with<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup(ENV_CONFIG_PATH) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };
        config.apply_overrides(&lookup)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides on top of the current values.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(listen) = lookup(ENV_LISTEN) {
            self.server.listen = listen;
        }
        if let Some(value) = lookup(ENV_ROUND_CAPACITY) {
            self.round.capacity = parse_override(ENV_ROUND_CAPACITY, value)?;
        }
        if let Some(value) = lookup(ENV_ROUND_WAIT_MS) {
            self.round.wait_ms = parse_override(ENV_ROUND_WAIT_MS, value)?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.listen_addr()?;
        if self.server.max_body_bytes == 0 {
            return Err(ConfigError::ZeroBodyLimit);
        }
        self.round_config().validate()?;
        Ok(())
    }

    /// Parsed listen address.
    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.server
            .listen
            .parse()
            .map_err(|_| ConfigError::InvalidListen(self.server.listen.clone()))
    }

    /// Round parameters for the matchmaker.
    pub fn round_config(&self) -> RoundConfig {
        RoundConfig::new(self.round.capacity, Duration::from_millis(self.round.wait_ms))
    }
}

fn parse_override<T>(var: &'static str, value: String) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
{
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidOverride { var, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn test_defaults_match_round_defaults() {
        let config = NodeConfig::default();
        assert_eq!(config.server.listen, "0.0.0.0:8080");
        assert_eq!(config.round_config(), RoundConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_document_keeps_defaults() {
        let config = NodeConfig::parse("[round]\ncapacity = 2\n").unwrap();
        assert_eq!(config.round.capacity, 2);
        assert_eq!(config.round.wait_ms, 3000);
        assert_eq!(config.server, ServerConfig::default());
    }

    #[test]
    fn test_parse_rejects_bad_toml() {
        let result = NodeConfig::parse("[round\ncapacity = ");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_reads_file_then_applies_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[server]\nlisten = \"127.0.0.1:9000\"\n\n[round]\ncapacity = 8\nwait_ms = 500"
        )
        .unwrap();
        let path = file.path().to_string_lossy().into_owned();

        let config = NodeConfig::load_with(lookup_from(&[
            (ENV_CONFIG_PATH, &path),
            (ENV_ROUND_WAIT_MS, "1200"),
        ]))
        .unwrap();

        assert_eq!(config.server.listen, "127.0.0.1:9000");
        assert_eq!(config.round.capacity, 8);
        assert_eq!(config.round.wait_ms, 1200);
    }

    #[test]
    fn test_missing_file_is_reported() {
        let result = NodeConfig::load_with(lookup_from(&[(
            ENV_CONFIG_PATH,
            "/nonexistent/rv-node.toml",
        )]));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_bad_override_names_the_variable() {
        let result = NodeConfig::load_with(lookup_from(&[(ENV_ROUND_CAPACITY, "four")]));
        match result {
            Err(ConfigError::InvalidOverride { var, value }) => {
                assert_eq!(var, ENV_ROUND_CAPACITY);
                assert_eq!(value, "four");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_zero_capacity_and_bad_listen() {
        let result = NodeConfig::load_with(lookup_from(&[(ENV_ROUND_CAPACITY, "0")]));
        assert!(matches!(
            result,
            Err(ConfigError::Round(RoundConfigError::ZeroCapacity))
        ));

        let result = NodeConfig::load_with(lookup_from(&[(ENV_LISTEN, "not-an-address")]));
        assert!(matches!(result, Err(ConfigError::InvalidListen(_))));
    }
}

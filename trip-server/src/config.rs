//! Server configuration from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::estimate::{ConfigError, EstimatorConfig};

/// Address to listen on when `ECOTRIP_BIND` is unset.
pub const DEFAULT_BIND: &str = "127.0.0.1:3000";

/// Errors reading the server environment.
#[derive(Debug, thiserror::Error)]
pub enum ServerConfigError {
    #[error("invalid ECOTRIP_BIND {value:?}: {source}")]
    InvalidBind {
        value: String,
        source: std::net::AddrParseError,
    },
}

/// Process-level settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Socket address for the HTTP listener
    pub bind: SocketAddr,

    /// Directory served under `/static`
    pub static_dir: PathBuf,

    /// Optional JSON file overriding the built-in factor tables
    pub factors_path: Option<PathBuf>,
}

impl ServerConfig {
    /// Read `ECOTRIP_BIND`, `ECOTRIP_STATIC_DIR` and `ECOTRIP_FACTORS`.
    pub fn from_env() -> Result<Self, ServerConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ServerConfigError> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind = match non_empty("ECOTRIP_BIND") {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|source| ServerConfigError::InvalidBind { value, source })?,
            None => default_bind(),
        };

        let static_dir = non_empty("ECOTRIP_STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(default_static_dir);

        let factors_path = non_empty("ECOTRIP_FACTORS").map(PathBuf::from);

        Ok(Self {
            bind,
            static_dir,
            factors_path,
        })
    }

    /// The factor tables: the override file if one is configured, otherwise
    /// the built-in defaults.
    pub fn load_estimator_config(&self) -> Result<EstimatorConfig, ConfigError> {
        match &self.factors_path {
            Some(path) => EstimatorConfig::from_file(path),
            None => Ok(EstimatorConfig::default()),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            static_dir: default_static_dir(),
            factors_path: None,
        }
    }
}

fn default_bind() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 3000))
}

fn default_static_dir() -> PathBuf {
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/static"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn default_config() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.bind.to_string(), DEFAULT_BIND);
        assert!(config.static_dir.ends_with("static"));
        assert!(config.factors_path.is_none());
    }

    #[test]
    fn custom_config() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("ECOTRIP_BIND", "0.0.0.0:8080"),
            ("ECOTRIP_STATIC_DIR", "/srv/ecotrip/static"),
            ("ECOTRIP_FACTORS", "/etc/ecotrip/factors.json"),
        ]))
        .unwrap();
        assert_eq!(config.bind.port(), 8080);
        assert_eq!(config.static_dir, PathBuf::from("/srv/ecotrip/static"));
        assert_eq!(
            config.factors_path,
            Some(PathBuf::from("/etc/ecotrip/factors.json"))
        );
    }

    #[test]
    fn blank_values_use_defaults() {
        let config =
            ServerConfig::from_lookup(lookup(&[("ECOTRIP_BIND", " "), ("ECOTRIP_FACTORS", "")]))
                .unwrap();
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn invalid_bind() {
        let err = ServerConfig::from_lookup(lookup(&[("ECOTRIP_BIND", "localhost")])).unwrap_err();
        assert!(err.to_string().starts_with("invalid ECOTRIP_BIND \"localhost\""));
    }

    #[test]
    fn loads_factor_override() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "max_distance_km": 10000.0 }}"#).unwrap();

        let config = ServerConfig {
            factors_path: Some(file.path().to_path_buf()),
            ..ServerConfig::default()
        };
        let factors = config.load_estimator_config().unwrap();
        assert_eq!(factors.max_distance_km, 10_000.0);

        let defaults = ServerConfig::default().load_estimator_config().unwrap();
        assert_eq!(defaults, EstimatorConfig::default());
    }
}

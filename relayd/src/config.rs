//! Configuration management for relayd.
//!
//! Loads a small TOML file; every field has a default so the daemon runs
//! without any configuration at all. The hardware identity of the relay
//! board (vendor/product id, command format) is deliberately not
//! configurable: it is the board's wire format, not a deployment choice.

use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::tracing::prelude::*;

/// Default listen port.
const DEFAULT_PORT: u16 = 2500;

/// Main configuration structure for the daemon.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,
}

/// API server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Listen address
    pub listen: SocketAddr,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            listen: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// With an explicit path the file must exist and parse. Without one,
    /// the standard location is used when present, defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let standard = Self::default_path();
                if !standard.exists() {
                    return Ok(Self::default());
                }
                standard
            }
        };

        let content = fs::read_to_string(&path)?;
        let config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;

        info!("loaded configuration from {}", path.display());
        Ok(config)
    }

    fn default_path() -> PathBuf {
        PathBuf::from("/etc/relayd/relayd.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_when_no_file_given() {
        let config = Config::default();
        assert_eq!(config.api.listen, "0.0.0.0:2500".parse().unwrap());
    }

    #[test]
    fn parses_listen_address() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api]\nlisten = \"127.0.0.1:8080\"").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.api.listen, "127.0.0.1:8080".parse().unwrap());
    }

    #[test]
    fn empty_file_falls_back_to_defaults() {
        let file = tempfile::NamedTempFile::new().unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.api.listen, "0.0.0.0:2500".parse().unwrap());
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = Config::load(Some(Path::new("/nonexistent/relayd.toml"))).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api\nlisten = 12").unwrap();

        let err = Config::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}

//! Configuration for the broker and its binary
//!
//! Sources, lowest precedence first: built-in defaults, an optional TOML
//! file, then `METABROKER_*` environment variables
//! (e.g. `METABROKER_ROOT_COORD_ADDR`).

use crate::common::{Error, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrokerConfig {
    /// Node ID stamped into request headers
    #[serde(default)]
    pub node_id: i64,

    /// Root coordinator gRPC endpoint (collection authority)
    #[serde(default)]
    pub root_coord_addr: Option<String>,

    /// Data coordinator gRPC endpoint (data authority)
    #[serde(default)]
    pub data_coord_addr: Option<String>,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_ms: u64,

    /// Deadline applied to each broker operation
    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,

    /// Bind address for the admin HTTP endpoints
    #[serde(default = "default_http_addr")]
    pub http_addr: SocketAddr,

    /// Logging filter directive
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_connect_timeout() -> u64 {
    5_000
}
fn default_request_timeout() -> u64 {
    10_000
}
fn default_http_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 9091))
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            node_id: 0,
            root_coord_addr: None,
            data_coord_addr: None,
            connect_timeout_ms: default_connect_timeout(),
            request_timeout_ms: default_request_timeout(),
            http_addr: default_http_addr(),
            log_level: default_log_level(),
        }
    }
}

impl BrokerConfig {
    /// Load from an optional file, then the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }
        let config = builder
            .add_source(
                config::Environment::with_prefix("METABROKER")
                    .prefix_separator("_")
                    .try_parsing(true),
            )
            .build()?;
        Ok(config.try_deserialize()?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.connect_timeout_ms == 0 {
            return Err(Error::InvalidConfig("connect_timeout_ms must be > 0".into()));
        }
        if self.request_timeout_ms == 0 {
            return Err(Error::InvalidConfig("request_timeout_ms must be > 0".into()));
        }
        for addr in [&self.root_coord_addr, &self.data_coord_addr]
            .into_iter()
            .flatten()
        {
            if !(addr.starts_with("http://") || addr.starts_with("https://")) {
                return Err(Error::InvalidConfig(format!(
                    "coordinator address must be an http(s) URL: {}",
                    addr
                )));
            }
        }
        Ok(())
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_defaults() {
        let config = BrokerConfig::default();
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.http_addr.port(), 9091);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
node_id = 3
root_coord_addr = "http://localhost:53100"
data_coord_addr = "http://localhost:13333"
request_timeout_ms = 2500
"#
        )
        .unwrap();

        let config = BrokerConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.node_id, 3);
        assert_eq!(
            config.root_coord_addr.as_deref(),
            Some("http://localhost:53100")
        );
        assert_eq!(config.request_timeout(), Duration::from_millis(2500));
        assert_eq!(config.connect_timeout_ms, 5_000);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_env_overrides_with_single_underscore() {
        std::env::set_var("METABROKER_HTTP_ADDR", "127.0.0.1:19091");
        let config = BrokerConfig::load(None);
        std::env::remove_var("METABROKER_HTTP_ADDR");

        let config = config.unwrap();
        assert_eq!(config.http_addr, "127.0.0.1:19091".parse().unwrap());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let res = BrokerConfig::load(Some(Path::new("/nonexistent/metabroker.toml")));
        assert!(matches!(res, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = BrokerConfig {
            request_timeout_ms: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = BrokerConfig {
            data_coord_addr: Some("localhost:13333".into()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}

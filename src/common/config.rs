//! Configuration file handling
//!
//! The base URL of the service under test lives in the `host` section under
//! `apihost`. It is resolved once at startup and handed to the runner.

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use super::paths::config_path;
use super::{Error, Result};

/// Main configuration structure
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Service location
    #[serde(default)]
    pub host: HostConfig,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,
}

/// Location of the service under test
#[derive(Debug, Deserialize)]
pub struct HostConfig {
    /// Base URL requests are made against, without a trailing path
    #[serde(default = "default_apihost")]
    pub apihost: String,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            apihost: default_apihost(),
        }
    }
}

fn default_apihost() -> String {
    "https://api.opentreeoflife.org".to_string()
}

/// HTTP client settings
#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    /// Request timeout; requests wait indefinitely when unset
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: None,
            user_agent: default_user_agent(),
        }
    }
}

fn default_user_agent() -> String {
    "opentree-ws-check".to_string()
}

impl HttpConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl Config {
    /// Load configuration from an explicit path, or the default config file
    ///
    /// Returns default configuration if no explicit path is given and the
    /// default file doesn't exist. An explicit path that doesn't exist is an
    /// error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        if let Some(path) = config_path() {
            if path.exists() {
                return Self::from_file(&path);
            }
        }
        Ok(Self::default())
    }

    /// Parse a TOML configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::ConfigParse(e.to_string()))
    }

    /// Look up a configuration value by section and key
    pub fn lookup(&self, section: &str, key: &str) -> Result<String> {
        match (section, key) {
            ("host", "apihost") => Ok(self.host.apihost.clone()),
            ("http", "user_agent") => Ok(self.http.user_agent.clone()),
            ("http", "timeout_secs") => self
                .http
                .timeout_secs
                .map(|t| t.to_string())
                .ok_or_else(|| Error::Config("http.timeout_secs is not set".to_string())),
            _ => Err(Error::Config(format!(
                "Unknown configuration key '{}.{}'",
                section, key
            ))),
        }
    }

    /// Override the API host, e.g. from a command-line flag
    pub fn with_apihost(mut self, apihost: Option<String>) -> Self {
        if let Some(host) = apihost {
            self.host.apihost = host;
        }
        self
    }
}

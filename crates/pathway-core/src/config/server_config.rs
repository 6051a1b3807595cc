//! HTTP server configuration.

use serde::{Deserialize, Serialize};

use super::defaults;

/// Configuration for the HTTP listener and static assets.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address. Default: "0.0.0.0".
    pub host: Option<String>,
    /// Bind port. Default: 5000.
    pub port: Option<u16>,
    /// Static front-end directory. Relative paths resolve against the
    /// executable's location. Default: "static".
    pub static_dir: Option<String>,
}

impl ServerConfig {
    pub fn effective_host(&self) -> &str {
        self.host.as_deref().unwrap_or(defaults::DEFAULT_HOST)
    }

    pub fn effective_port(&self) -> u16 {
        self.port.unwrap_or(defaults::DEFAULT_PORT)
    }

    pub fn effective_static_dir(&self) -> &str {
        self.static_dir
            .as_deref()
            .unwrap_or(defaults::DEFAULT_STATIC_DIR)
    }

    /// `host:port` for binding.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.effective_host(), self.effective_port())
    }
}

//! # Client configuration: `moodverse.toml`
//!
//! The backend address is fixed per build: the web binary embeds
//! `moodverse.toml` and parses it once at startup. Nothing here is read at
//! runtime from the user's environment.
//!
//! ```toml
//! [backend]
//! url = "http://localhost:5000"   # HTTP base of the mood backend
//! socket_path = "/socket.io/"     # realtime endpoint path on the same host
//! ```
//!
//! All structs derive or implement `Default`, so a missing or empty file is
//! equivalent to the default configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("backend url must start with http:// or https://, got {0:?}")]
    UnsupportedScheme(String),
}

/// Top-level configuration stored in `moodverse.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub backend: BackendConfig,
}

/// Where the mood backend lives.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_backend_url")]
    pub url: String,
    #[serde(default = "default_socket_path")]
    pub socket_path: String,
}

fn default_backend_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_socket_path() -> String {
    "/socket.io/".to_string()
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: default_backend_url(),
            socket_path: default_socket_path(),
        }
    }
}

impl ClientConfig {
    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "moodverse.toml"
    }

    /// Parse from TOML and check the backend URL scheme.
    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.backend.websocket_base()?;
        Ok(config)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl BackendConfig {
    /// HTTP base without a trailing slash.
    pub fn http_base(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    /// Absolute URL of an HTTP endpoint, `path` starting with `/`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.http_base(), path)
    }

    /// `ws://` / `wss://` counterpart of the HTTP base.
    pub fn websocket_base(&self) -> Result<String, ConfigError> {
        let base = self.http_base();
        if let Some(rest) = base.strip_prefix("https://") {
            Ok(format!("wss://{rest}"))
        } else if let Some(rest) = base.strip_prefix("http://") {
            Ok(format!("ws://{rest}"))
        } else {
            Err(ConfigError::UnsupportedScheme(self.url.clone()))
        }
    }

    /// Full Engine.IO v4 WebSocket URL for the realtime channel.
    pub fn realtime_url(&self) -> Result<String, ConfigError> {
        let path = self.socket_path.trim_matches('/');
        Ok(format!(
            "{}/{path}/?EIO=4&transport=websocket",
            self.websocket_base()?
        ))
    }
}

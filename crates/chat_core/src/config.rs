use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::paths::config_json_path;

const CONFIG_FILE_PATH: &str = "config.toml";

pub const DEFAULT_API_BASE: &str = "http://localhost:3000";
pub const DEFAULT_CHAT_PATH: &str = "/api/chat";
pub const DEFAULT_THINKING_TEXT: &str = "Thinking";
pub const DEFAULT_EMPTY_REPLY_TEXT: &str = "Sorry, no response was received.";
pub const DEFAULT_REQUEST_FAILED_TEXT: &str = "Failed to get a response from the server.";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(PathBuf),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Scheme and authority of the chat backend
    pub api_base: String,
    pub chat_path: String,
    pub http_proxy: String,
    pub https_proxy: String,
    pub timeout_secs: Option<u64>,
    /// Placeholder shown while a request is in flight
    pub thinking_text: String,
    /// Shown when the backend answers without a result
    pub empty_reply_text: String,
    /// Shown when a request fails without a usable error message
    pub request_failed_text: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            chat_path: DEFAULT_CHAT_PATH.to_string(),
            http_proxy: String::new(),
            https_proxy: String::new(),
            timeout_secs: None,
            thinking_text: DEFAULT_THINKING_TEXT.to_string(),
            empty_reply_text: DEFAULT_EMPTY_REPLY_TEXT.to_string(),
            request_failed_text: DEFAULT_REQUEST_FAILED_TEXT.to_string(),
        }
    }
}

impl Config {
    /// Load from ~/.chatmark/config.json, falling back to ./config.toml, then
    /// apply environment overrides. Unreadable files are logged and skipped.
    pub fn load() -> Self {
        let mut config = Config::default();

        let mut loaded = false;
        let json_path = config_json_path();
        if json_path.exists() {
            match Self::load_from(&json_path) {
                Ok(file_config) => {
                    config = file_config;
                    loaded = true;
                }
                Err(err) => log::warn!("{err}"),
            }
        }

        let toml_path = Path::new(CONFIG_FILE_PATH);
        if !loaded && toml_path.exists() {
            match Self::load_from(toml_path) {
                Ok(file_config) => config = file_config,
                Err(err) => log::warn!("{err}"),
            }
        }

        config.apply_env(|key| std::env::var(key).ok());
        config
    }

    /// Read an explicit JSON or TOML file, chosen by extension.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let parse_error = |message: String| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        };

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::from_str(&content).map_err(|e| parse_error(e.to_string())),
            Some("toml") => toml::from_str(&content).map_err(|e| parse_error(e.to_string())),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    /// Apply overrides from a variable lookup (the process environment in
    /// [`Config::load`]).
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(api_base) = lookup("CHAT_API_BASE") {
            self.api_base = api_base;
        }
        if let Some(chat_path) = lookup("CHAT_PATH") {
            self.chat_path = chat_path;
        }
        if let Some(http_proxy) = lookup("HTTP_PROXY") {
            self.http_proxy = http_proxy;
        }
        if let Some(https_proxy) = lookup("HTTPS_PROXY") {
            self.https_proxy = https_proxy;
        }
        if let Some(timeout) = lookup("CHAT_TIMEOUT_SECS") {
            match timeout.trim().parse::<u64>() {
                Ok(secs) => self.timeout_secs = Some(secs),
                Err(_) => log::warn!("Ignoring invalid CHAT_TIMEOUT_SECS: {timeout:?}"),
            }
        }
    }

    /// Full endpoint URL, tolerant of slashes on either side of the join
    pub fn chat_url(&self) -> String {
        let base = self.api_base.trim_end_matches('/');
        let path = self.chat_path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}

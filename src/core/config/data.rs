use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::constants::DEFAULT_BASE_URL;

#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the chat backend, e.g. "http://localhost:5001/api"
    pub base_url: Option<String>,
    /// File that receives tracing output while the chat view owns the terminal
    pub debug_log: Option<String>,
}

/// Keys accepted by `kwebbel set` and `kwebbel unset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    BaseUrl,
    DebugLog,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 2] = [ConfigKey::BaseUrl, ConfigKey::DebugLog];

    pub fn as_str(self) -> &'static str {
        match self {
            ConfigKey::BaseUrl => "base-url",
            ConfigKey::DebugLog => "debug-log",
        }
    }

    pub fn parse(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|candidate| candidate.as_str() == key)
    }
}

impl Config {
    pub fn get(&self, key: ConfigKey) -> Option<&str> {
        match key {
            ConfigKey::BaseUrl => self.base_url.as_deref(),
            ConfigKey::DebugLog => self.debug_log.as_deref(),
        }
    }

    pub fn set(&mut self, key: ConfigKey, value: Option<String>) {
        let value = value.filter(|v| !v.trim().is_empty());
        match key {
            ConfigKey::BaseUrl => self.base_url = value,
            ConfigKey::DebugLog => self.debug_log = value,
        }
    }
}

/// Pick the backend base URL: command line, then environment, then config
/// file, then the built-in default. Blank values are skipped.
pub fn resolve_base_url(
    cli_value: Option<&str>,
    env_value: Option<&str>,
    config: &Config,
) -> String {
    [cli_value, env_value, config.base_url.as_deref()]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|value| !value.is_empty())
        .unwrap_or(DEFAULT_BASE_URL)
        .to_string()
}

pub fn path_display(path: &Path) -> String {
    path.display().to_string()
}

//! Client configuration parsed from environment variables.

use std::path::PathBuf;

use crate::client::DEFAULT_BASE_URL;

pub const API_URL_VAR: &str = "BOOKMARKD_API_URL";
pub const STATE_VAR: &str = "BOOKMARKD_STATE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    /// File backing the persistent session store.
    pub state_file: PathBuf,
}

impl ClientConfig {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `BOOKMARKD_API_URL`: default `http://localhost:8080/api`
    /// - `BOOKMARKD_STATE`: default `$HOME/.bookmarkd/state.json`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = lookup(API_URL_VAR)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let state_file = lookup(STATE_VAR)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| default_state_file(lookup("HOME")));
        Self { base_url, state_file }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            state_file: default_state_file(None),
        }
    }
}

fn default_state_file(home: Option<String>) -> PathBuf {
    match home.filter(|h| !h.is_empty()) {
        Some(home) => PathBuf::from(home).join(".bookmarkd").join("state.json"),
        None => PathBuf::from(".bookmarkd-state.json"),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> ClientConfig {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        ClientConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_env() {
        let config = config_from(&[]);
        assert_eq!(config.base_url, "http://localhost:8080/api");
        assert_eq!(config.state_file, PathBuf::from(".bookmarkd-state.json"));
    }

    #[test]
    fn home_directory_state_file() {
        let config = config_from(&[("HOME", "/home/ann")]);
        assert_eq!(config.state_file, PathBuf::from("/home/ann/.bookmarkd/state.json"));
    }

    #[test]
    fn explicit_overrides() {
        let config = config_from(&[
            ("BOOKMARKD_API_URL", "https://bookmarkd.example/api"),
            ("BOOKMARKD_STATE", "/tmp/s.json"),
            ("HOME", "/home/ann"),
        ]);
        assert_eq!(config.base_url, "https://bookmarkd.example/api");
        assert_eq!(config.state_file, PathBuf::from("/tmp/s.json"));
    }

    #[test]
    fn blank_values_are_ignored() {
        let config = config_from(&[("BOOKMARKD_API_URL", "  ")]);
        assert_eq!(config.base_url, "http://localhost:8080/api");
    }
}

//! CLI configuration — read/write `~/.shopdesk/config.toml`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable overriding the configured backend URL.
pub const BACKEND_URL_ENV: &str = "SHOPDESK_BACKEND_URL";

/// Backend URL used when neither the config file nor the environment sets one.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000/";

/// Persisted CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Base URL of the shop backend, ending with `/`.
    pub backend_url:  String,
    /// Bearer token sent with every request; empty when logged out.
    #[serde(default)]
    pub access_token: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            backend_url:  DEFAULT_BACKEND_URL.to_owned(),
            access_token: String::new(),
        }
    }
}

impl CliConfig {
    /// Replace the backend URL with `url` when one is given.
    #[must_use]
    pub fn with_backend_override(self, url: Option<String>) -> Self {
        match url.filter(|u| !u.trim().is_empty()) {
            Some(backend_url) => Self {
                backend_url,
                ..self
            },
            None => self,
        }
    }
}

/// Return the default path for the CLI config file (`~/.shopdesk/config.toml`).
#[must_use]
pub fn default_config_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_owned());
    PathBuf::from(home).join(".shopdesk").join("config.toml")
}

/// Write `cfg` to `path`, creating parent directories if necessary.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file cannot be written.
pub fn save_config(cfg: &CliConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, toml::to_string(cfg)?)?;
    Ok(())
}

/// Load and deserialize a [`CliConfig`] from `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or deserialized.
pub fn load_config(path: &Path) -> Result<CliConfig> {
    let raw = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&raw)?)
}

/// Load the config at `path`, falling back to defaults when it does not exist,
/// then apply the [`BACKEND_URL_ENV`] override.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or deserialized.
pub fn resolve_config(path: &Path) -> Result<CliConfig> {
    let cfg = if path.exists() {
        load_config(path).with_context(|| format!("reading {}", path.display()))?
    } else {
        CliConfig::default()
    };
    Ok(cfg.with_backend_override(std::env::var(BACKEND_URL_ENV).ok()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn config_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let cfg = CliConfig {
            backend_url:  "https://shop.example.com/".to_owned(),
            access_token: "abc123".to_owned(),
        };
        save_config(&cfg, &path).unwrap();
        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn missing_token_defaults_to_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "backend_url = \"http://10.0.0.2:8000/\"\n").unwrap();
        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded.access_token, "");
    }

    #[test]
    fn blank_override_is_ignored() {
        let cfg = CliConfig::default().with_backend_override(Some("  ".to_owned()));
        assert_eq!(cfg.backend_url, DEFAULT_BACKEND_URL);
        let cfg = cfg.with_backend_override(Some("http://shop/".to_owned()));
        assert_eq!(cfg.backend_url, "http://shop/");
    }
}

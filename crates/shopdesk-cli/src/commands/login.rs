//! `shopdesk login <token>` — store the access token used for every request.

use std::path::Path;

use anyhow::{bail, Result};

use crate::config::{default_config_path, load_config, save_config, CliConfig};

/// Merge `token` (and optionally a new backend URL) into the config at `path`.
///
/// # Errors
///
/// Returns an error if the token is blank or the file cannot be read or written.
pub fn store_token(path: &Path, token: &str, backend_url: Option<String>) -> Result<CliConfig> {
    let token = token.trim();
    if token.is_empty() {
        bail!("access token must not be empty");
    }
    let existing = if path.exists() {
        load_config(path)?
    } else {
        CliConfig::default()
    };
    let cfg = CliConfig {
        access_token: token.to_owned(),
        ..existing.with_backend_override(backend_url)
    };
    save_config(&cfg, path)?;
    Ok(cfg)
}

/// Run `shopdesk login <token> [--backend <url>]`.
///
/// # Errors
///
/// Returns an error if the config file cannot be written.
pub fn run_login(token: &str, backend_url: Option<String>) -> Result<()> {
    let path = default_config_path();
    let cfg = store_token(&path, token, backend_url)?;
    println!(
        "Token saved for {}. Config saved to {}",
        cfg.backend_url,
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn login_keeps_the_backend_url() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        store_token(&path, "first", Some("http://shop.local/".to_owned())).unwrap();

        let cfg = store_token(&path, " second ", None).unwrap();

        assert_eq!(cfg.backend_url, "http://shop.local/");
        assert_eq!(load_config(&path).unwrap().access_token, "second");
    }

    #[test]
    fn blank_token_is_refused() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        assert!(store_token(&path, "   ", None).is_err());
        assert!(!path.exists());
    }
}

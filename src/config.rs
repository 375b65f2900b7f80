//! Runtime configuration: the identity service base URL, where the session is
//! kept, and the request timeout. Values come from CLI flags or their
//! `AUTHGATE_*` environment variables. Configuration values are public; do not
//! store secrets here.

use crate::api::DEFAULT_TIMEOUT;
use anyhow::{Context, Result, anyhow};
use std::{path::PathBuf, time::Duration};
use url::Url;

/// Directory under `$HOME` used when no session directory is configured.
pub const DEFAULT_SESSION_DIR: &str = ".authgate";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub session_dir: PathBuf,
    pub timeout: Duration,
}

impl AppConfig {
    /// Validates raw settings; unset optional values fall back to defaults.
    ///
    /// # Errors
    /// Returns an error if the base URL is empty, malformed or not HTTP(S), or
    /// if no home directory is available for the default session directory.
    pub fn new(
        api_base_url: &str,
        session_dir: Option<PathBuf>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let api_base_url = normalize_value(api_base_url)
            .ok_or_else(|| anyhow!("API base URL is not configured"))?;
        validate_base_url(&api_base_url)?;

        let session_dir = match session_dir {
            Some(dir) => dir,
            None => default_session_dir()?,
        };

        Ok(Self {
            api_base_url,
            session_dir,
            timeout: timeout.unwrap_or(DEFAULT_TIMEOUT),
        })
    }
}

fn validate_base_url(value: &str) -> Result<()> {
    let url = Url::parse(value).with_context(|| format!("invalid API base URL: {value}"))?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => return Err(anyhow!("Error parsing URL: unsupported scheme {scheme}")),
    }

    if url.host().is_none() {
        return Err(anyhow!("Error parsing URL: no host specified"));
    }

    Ok(())
}

/// # Errors
/// Returns an error if the home directory cannot be determined.
pub fn default_session_dir() -> Result<PathBuf> {
    Ok(dirs::home_dir()
        .context("Cannot determine home directory")?
        .join(DEFAULT_SESSION_DIR))
}

fn normalize_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn normalize_value_trims_and_rejects_empty() {
        assert_eq!(normalize_value(""), None);
        assert_eq!(normalize_value("   "), None);
        assert_eq!(
            normalize_value("  https://api.authgate.dev "),
            Some("https://api.authgate.dev".to_string())
        );
    }

    #[test]
    fn new_applies_defaults() {
        let config = AppConfig::new(
            " https://api.authgate.dev/api/v1 ",
            Some(PathBuf::from("/tmp/authgate")),
            None,
        )
        .unwrap();
        assert_eq!(config.api_base_url, "https://api.authgate.dev/api/v1");
        assert_eq!(config.session_dir, PathBuf::from("/tmp/authgate"));
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn new_keeps_explicit_timeout() {
        let config = AppConfig::new(
            "http://localhost:8000",
            Some(PathBuf::from("/tmp/authgate")),
            Some(Duration::from_secs(3)),
        )
        .unwrap();
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[test]
    fn new_rejects_bad_base_urls() {
        let dir = Some(PathBuf::from("/tmp/authgate"));
        assert!(AppConfig::new("", dir.clone(), None).is_err());
        assert!(AppConfig::new("not a url", dir.clone(), None).is_err());
        assert!(AppConfig::new("ftp://files.tld", dir.clone(), None).is_err());
        assert!(AppConfig::new("unix:/run/api.sock", dir, None).is_err());
    }
}

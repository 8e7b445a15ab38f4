//! Configuration management for songscout.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. It provides a centralized way to manage application
//! configuration including the catalog credentials, the identity service endpoint
//! and request timeouts.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use std::{env, path::PathBuf, time::Duration};

use crate::error::{Error, Result};

const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
const DEFAULT_SPOTIFY_API_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const DEFAULT_POPULAR_PLAYLIST_ID: &str = "37i9dQZF1DX9vYRBO9gjDe";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the necessary directory structure if it doesn't exist and loads
/// environment variables from a `.env` file located in the platform-specific
/// local data directory under `songscout/.env`. A missing file is not an
/// error: the process environment alone may carry the configuration.
///
/// # Directory Structure
///
/// The function looks for the `.env` file in:
/// - Linux: `~/.local/share/songscout/.env`
/// - macOS: `~/Library/Application Support/songscout/.env`
/// - Windows: `%LOCALAPPDATA%/songscout/.env`
///
/// # Errors
///
/// This function will return an error if:
/// - The parent directory cannot be created
/// - The `.env` file exists but cannot be read or parsed
pub async fn load_env() -> std::result::Result<(), String> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Returns the application's local data directory (`<data_local_dir>/songscout`).
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("songscout");
    path
}

/// Everything the catalog client needs to talk to the Spotify Web API.
#[derive(Debug, Clone)]
pub struct CatalogSettings {
    pub client_id: String,
    pub client_secret: String,
    pub api_url: String,
    pub token_url: String,
    pub popular_playlist_id: String,
    pub request_timeout: Duration,
}

impl CatalogSettings {
    /// Reads `SPOTIFY_API_AUTH_CLIENT_ID` and `SPOTIFY_API_AUTH_CLIENT_SECRET`
    /// (required) plus the optional URL, playlist and timeout overrides.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            client_id: required("SPOTIFY_API_AUTH_CLIENT_ID")?,
            client_secret: required("SPOTIFY_API_AUTH_CLIENT_SECRET")?,
            api_url: optional("SPOTIFY_API_URL", DEFAULT_SPOTIFY_API_URL),
            token_url: optional("SPOTIFY_API_TOKEN_URL", DEFAULT_SPOTIFY_API_TOKEN_URL),
            popular_playlist_id: optional(
                "SPOTIFY_POPULAR_PLAYLIST_ID",
                DEFAULT_POPULAR_PLAYLIST_ID,
            ),
            request_timeout: request_timeout()?,
        })
    }
}

/// Endpoint and key of the hosted identity service.
#[derive(Debug, Clone)]
pub struct IdentitySettings {
    pub url: String,
    pub api_key: String,
    pub request_timeout: Duration,
}

impl IdentitySettings {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            url: required("SUPABASE_URL")?,
            api_key: required("SUPABASE_API_KEY")?,
            request_timeout: request_timeout()?,
        })
    }
}

/// Returns the per-request timeout.
///
/// Retrieves `REQUEST_TIMEOUT_SECS`, defaulting to 10 seconds. Every catalog
/// and identity call is bounded by this value.
///
/// # Errors
///
/// Returns [`Error::Configuration`] when the variable is set but is not a
/// positive integer.
pub fn request_timeout() -> Result<Duration> {
    match env::var("REQUEST_TIMEOUT_SECS") {
        Ok(raw) => parse_timeout(&raw),
        Err(_) => Ok(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)),
    }
}

fn parse_timeout(raw: &str) -> Result<Duration> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(Error::Configuration(format!(
            "REQUEST_TIMEOUT_SECS must be a positive number of seconds, got '{}'",
            raw
        ))),
    }
}

fn required(key: &str) -> Result<String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(Error::Configuration(format!("{} must be set", key))),
    }
}

fn optional(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_positive_timeouts() {
        assert_eq!(parse_timeout("15").unwrap(), Duration::from_secs(15));
        assert_eq!(parse_timeout(" 3 ").unwrap(), Duration::from_secs(3));
    }

    #[test]
    fn rejects_zero_and_garbage_timeouts() {
        assert!(matches!(parse_timeout("0"), Err(Error::Configuration(_))));
        assert!(matches!(parse_timeout("soon"), Err(Error::Configuration(_))));
    }

    #[test]
    fn optional_falls_back_to_default() {
        let value = optional("SONGSCOUT_TEST_SURELY_UNSET_VARIABLE", "fallback");
        assert_eq!(value, "fallback");
    }

    #[test]
    fn required_reports_missing_key() {
        let err = required("SONGSCOUT_TEST_SURELY_UNSET_VARIABLE").unwrap_err();
        assert!(err.to_string().contains("SONGSCOUT_TEST_SURELY_UNSET_VARIABLE"));
    }
}

//! Configuration management for sptracks.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file in the local data directory. The lookup order is:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (API and token URLs only)

use std::{env, path::PathBuf};

use crate::{
    errors::{Error, Result},
    types::Credentials,
};

pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SPOTIFY_API_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Loads environment variables from `.env` in the local data directory.
///
/// The file lives under `sptracks/.env`:
/// - Linux: `~/.local/share/sptracks/.env`
/// - macOS: `~/Library/Application Support/sptracks/.env`
/// - Windows: `%LOCALAPPDATA%/sptracks/.env`
///
/// The directory is created when missing. A missing `.env` file is not an
/// error, the process environment is used as is.
///
/// # Errors
///
/// Returns [`Error::Configuration`] if the directory cannot be created or the
/// file exists but cannot be parsed.
pub async fn load_env() -> Result<()> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| Error::Configuration(e.to_string()))?;
    }

    if !path.is_file() {
        log::debug!("no env file at {}, using process environment", path.display());
        return Ok(());
    }

    dotenv::from_path(&path).map_err(|e| Error::Configuration(e.to_string()))?;
    Ok(())
}

pub fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("sptracks/.env");
    path
}

/// Returns the client credentials used for the client-credentials grant.
///
/// Reads `SPOTIFY_API_AUTH_CLIENT_ID` and `SPOTIFY_API_AUTH_CLIENT_SECRET`,
/// falling back to the older `sp_client_id` and `sp_client_secret` names.
pub fn spotify_credentials() -> Result<Credentials> {
    Ok(Credentials {
        client_id: var_with_fallback("SPOTIFY_API_AUTH_CLIENT_ID", "sp_client_id")?,
        client_secret: var_with_fallback("SPOTIFY_API_AUTH_CLIENT_SECRET", "sp_client_secret")?,
    })
}

/// Returns the Spotify Web API base URL, e.g. `https://api.spotify.com/v1`.
pub fn spotify_apiurl() -> String {
    env::var("SPOTIFY_API_URL").unwrap_or_else(|_| DEFAULT_SPOTIFY_API_URL.to_string())
}

/// Returns the URL of the token endpoint.
pub fn spotify_apitoken_url() -> String {
    env::var("SPOTIFY_API_TOKEN_URL")
        .unwrap_or_else(|_| DEFAULT_SPOTIFY_API_TOKEN_URL.to_string())
}

fn var_with_fallback(name: &str, legacy: &str) -> Result<String> {
    match env::var(name).or_else(|_| env::var(legacy)) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(Error::Configuration(format!("{} must be set", name))),
    }
}

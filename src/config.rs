use std::{collections::HashSet, env::VarError, path::PathBuf};

use crate::clients::{
    errors::{Error, Result},
    library::{PLAYLIST_ITEMS_PAGE_LIMIT, PLAYLISTS_PAGE_LIMIT, SAVED_TRACKS_LIMIT},
};

/// Environment variable holding the OAuth scopes to request.
pub const SCOPE_VAR: &str = "RSPOTIFY_SCOPE";
/// Optional override for where the OAuth token is cached.
pub const CACHE_PATH_VAR: &str = "RLIKER_CACHE_PATH";

/// Settings the run is started with. Built once in main and handed down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// OAuth scopes requested at authorization.
    pub scopes: HashSet<String>,
    /// File the OAuth token is cached in.
    pub cache_path: PathBuf,
    pub playlists_page_size: u32,
    pub playlist_items_page_size: u32,
    /// Ids per saved-tracks check or add call.
    pub batch_size: usize,
}

impl Config {
    /// Config with the service's page and batch limits.
    pub fn new(scopes: HashSet<String>, cache_path: PathBuf) -> Self {
        Config {
            scopes,
            cache_path,
            playlists_page_size: PLAYLISTS_PAGE_LIMIT,
            playlist_items_page_size: PLAYLIST_ITEMS_PAGE_LIMIT,
            batch_size: SAVED_TRACKS_LIMIT,
        }
    }

    /// Reads [`SCOPE_VAR`] and [`CACHE_PATH_VAR`] from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key))
    }

    /// Same as [`Config::from_env`] but reads variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> std::result::Result<String, VarError>,
    {
        let raw_scope = lookup(SCOPE_VAR).map_err(|e| {
            Error::ConfigurationError(format!("{SCOPE_VAR} is not set or invalid: {e}"))
        })?;
        let scopes = parse_scopes(&raw_scope)?;

        let cache_path = match lookup(CACHE_PATH_VAR) {
            Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
            Ok(_) | Err(VarError::NotPresent) => default_cache_path(),
            Err(e) => return Err(e.into()),
        };

        Ok(Config::new(scopes, cache_path))
    }
}

/// Splits a scope string on whitespace and commas.
pub fn parse_scopes(raw: &str) -> Result<HashSet<String>> {
    let scopes: HashSet<String> = raw
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect();

    if scopes.is_empty() {
        return Err(Error::ConfigurationError(format!(
            "{SCOPE_VAR} must name at least one OAuth scope"
        )));
    }
    Ok(scopes)
}

fn default_cache_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("/tmp")) // Fallback to /tmp if cache directory can't be determined
        .join(".rliker_cache")
}

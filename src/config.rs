//! Application configuration parsed from environment variables.

use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "/";
pub const DEFAULT_ASSET_BASE_URL: &str = "http://localhost:5173";
pub const DEFAULT_CHUNK_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CHUNK_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Error returned when a configuration value cannot be parsed.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config parse failed: {0}")]
    Parse(String),
}

/// HTTP timeouts for chunk fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// History base the app is mounted under. Always starts and ends with `/`.
    pub base_url: String,
    /// Host serving lazily loaded view chunks. Never ends with `/`.
    pub asset_base_url: String,
    pub chunk_timeouts: ChunkTimeouts,
    /// Deadline for a single lazy view load. `None` waits indefinitely.
    pub lazy_load_timeout_secs: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            asset_base_url: DEFAULT_ASSET_BASE_URL.to_owned(),
            chunk_timeouts: ChunkTimeouts {
                request_secs: DEFAULT_CHUNK_REQUEST_TIMEOUT_SECS,
                connect_secs: DEFAULT_CHUNK_CONNECT_TIMEOUT_SECS,
            },
            lazy_load_timeout_secs: None,
        }
    }
}

impl AppConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `BASE_URL`: history base, default `/`
    /// - `ASSET_BASE_URL`: chunk host, default `http://localhost:5173`
    /// - `CHUNK_REQUEST_TIMEOUT_SECS`: default 30
    /// - `CHUNK_CONNECT_TIMEOUT_SECS`: default 10
    /// - `LAZY_LOAD_TIMEOUT_SECS`: unset means no deadline
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if a numeric variable is malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build typed config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if a numeric value is malformed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = normalize_base(lookup("BASE_URL").as_deref().unwrap_or(DEFAULT_BASE_URL));
        let asset_base_url = lookup("ASSET_BASE_URL")
            .unwrap_or_else(|| DEFAULT_ASSET_BASE_URL.to_owned())
            .trim_end_matches('/')
            .to_owned();
        let chunk_timeouts = ChunkTimeouts {
            request_secs: parse_u64(&lookup, "CHUNK_REQUEST_TIMEOUT_SECS")?
                .unwrap_or(DEFAULT_CHUNK_REQUEST_TIMEOUT_SECS),
            connect_secs: parse_u64(&lookup, "CHUNK_CONNECT_TIMEOUT_SECS")?
                .unwrap_or(DEFAULT_CHUNK_CONNECT_TIMEOUT_SECS),
        };
        let lazy_load_timeout_secs = parse_u64(&lookup, "LAZY_LOAD_TIMEOUT_SECS")?;

        Ok(Self { base_url, asset_base_url, chunk_timeouts, lazy_load_timeout_secs })
    }

    #[must_use]
    pub fn lazy_load_timeout(&self) -> Option<Duration> {
        self.lazy_load_timeout_secs.map(Duration::from_secs)
    }
}

/// Normalize a history base to `/segment/.../` form.
#[must_use]
pub fn normalize_base(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        "/".to_owned()
    } else {
        format!("/{trimmed}/")
    }
}

fn parse_u64<F>(lookup: &F, key: &str) -> Result<Option<u64>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| ConfigError::Parse(format!("{key} must be a non-negative integer, got '{raw}'"))),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

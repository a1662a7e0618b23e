//! Runtime configuration, read from `ORGDIR_*` environment variables.

use std::path::PathBuf;
use std::time::Duration;

use orgdir_directory::RepositoryLatency;

/// Where persisted blobs live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    /// Process memory; nothing survives a restart.
    Memory,
    /// One file per key inside the directory.
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub storage: StorageBackend,
    pub latency: RepositoryLatency,
    /// Platform dark-mode answer used when no theme is persisted.
    pub prefers_dark: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage: StorageBackend::File(default_data_dir()),
            latency: RepositoryLatency::default(),
            prefers_dark: false,
        }
    }
}

impl AppConfig {
    /// In-memory storage and no simulated latency.
    pub fn for_tests() -> Self {
        Self {
            storage: StorageBackend::Memory,
            latency: RepositoryLatency::none(),
            prefers_dark: false,
        }
    }

    /// Build from the process environment.
    ///
    /// - `ORGDIR_STORAGE`: `memory` | `file` (default `file`)
    /// - `ORGDIR_DATA_DIR`: directory for the file backend
    /// - `ORGDIR_READ_LATENCY_MS` / `ORGDIR_WRITE_LATENCY_MS`
    /// - `ORGDIR_PREFERS_DARK`: `true|false|1|0`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Invalid values are logged and
    /// replaced by defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let data_dir = lookup("ORGDIR_DATA_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from);

        let storage = match lookup("ORGDIR_STORAGE").as_deref().map(str::trim) {
            None | Some("file") => StorageBackend::File(data_dir.unwrap_or_else(default_data_dir)),
            Some("memory") => StorageBackend::Memory,
            Some(other) => {
                tracing::warn!(value = other, "unknown ORGDIR_STORAGE; using file storage");
                StorageBackend::File(data_dir.unwrap_or_else(default_data_dir))
            }
        };

        let latency = RepositoryLatency {
            read: millis(&lookup, "ORGDIR_READ_LATENCY_MS").unwrap_or(defaults.latency.read),
            write: millis(&lookup, "ORGDIR_WRITE_LATENCY_MS").unwrap_or(defaults.latency.write),
        };

        let prefers_dark = match lookup("ORGDIR_PREFERS_DARK").as_deref().map(str::trim) {
            None => defaults.prefers_dark,
            Some("true") | Some("1") => true,
            Some("false") | Some("0") => false,
            Some(other) => {
                tracing::warn!(value = other, "invalid ORGDIR_PREFERS_DARK; ignoring");
                defaults.prefers_dark
            }
        };

        Self {
            storage,
            latency,
            prefers_dark,
        }
    }
}

fn millis<F>(lookup: &F, key: &str) -> Option<Duration>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<u64>() {
        Ok(ms) => Some(Duration::from_millis(ms)),
        Err(err) => {
            tracing::warn!(key, value = %raw, error = %err, "invalid latency; using default");
            None
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("orgdir"))
        .unwrap_or_else(|| PathBuf::from(".orgdir"))
}

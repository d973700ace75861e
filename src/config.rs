//! Runtime configuration from environment variables.

use crate::logic::{ManualRankPolicy, ViewOptions, MAX_BRACKET_SIZE};
use crate::store::{DirectoryStore, HttpStore, MemoryStore, SnapshotStore};
use crate::demo::demo_snapshot;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Where snapshots are read from.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Backend {
    /// Spreadsheet web app (`SNAPSHOT_BACKEND_URL`).
    Http { url: String },
    /// Directory of JSON documents (`SNAPSHOT_DIR`).
    Directory(PathBuf),
    /// Only the built-in demo snapshot.
    Demo,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ViewerConfig {
    pub host: String,
    pub port: u16,
    pub backend: Backend,
    pub backend_timeout: Duration,
    pub view: ViewOptions,
    pub static_dir: PathBuf,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            backend: Backend::Demo,
            backend_timeout: Duration::from_secs(10),
            view: ViewOptions::default(),
            static_dir: PathBuf::from("static"),
        }
    }
}

/// Trimmed, non-empty value of an environment variable.
pub fn env_default(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = env_default(key)?;
    match raw.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            log::warn!("Ignoring {}={}: not a valid value", key, raw);
            None
        }
    }
}

impl ViewerConfig {
    /// Read `HOST`, `PORT`, `SNAPSHOT_BACKEND_URL`, `SNAPSHOT_DIR`, `BACKEND_TIMEOUT_SECS`,
    /// `MANUAL_RANK_POLICY`, `MIN_BRACKET_SIZE` and `STATIC_DIR`. Unset or invalid values keep
    /// their defaults. A backend URL takes precedence over a snapshot directory.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(host) = env_default("HOST") {
            config.host = host;
        }
        if let Some(port) = env_parse("PORT") {
            config.port = port;
        }
        config.backend = match (env_default("SNAPSHOT_BACKEND_URL"), env_default("SNAPSHOT_DIR")) {
            (Some(url), _) => Backend::Http { url },
            (None, Some(dir)) => Backend::Directory(PathBuf::from(dir)),
            (None, None) => Backend::Demo,
        };
        if let Some(secs) = env_parse::<u64>("BACKEND_TIMEOUT_SECS") {
            config.backend_timeout = Duration::from_secs(secs);
        }
        if let Some(raw) = env_default("MANUAL_RANK_POLICY") {
            match ManualRankPolicy::from_config(&raw) {
                Some(policy) => config.view.manual_rank_policy = policy,
                None => log::warn!("Ignoring MANUAL_RANK_POLICY={}: use suppress or show", raw),
            }
        }
        if let Some(size) = env_parse::<u32>("MIN_BRACKET_SIZE") {
            let clamped = size.clamp(2, MAX_BRACKET_SIZE);
            if clamped != size {
                log::warn!(
                    "MIN_BRACKET_SIZE={} out of range, using {} (allowed 2..={})",
                    size,
                    clamped,
                    MAX_BRACKET_SIZE
                );
            }
            config.view.min_bracket_size = clamped;
        }
        if let Some(dir) = env_default("STATIC_DIR") {
            config.static_dir = PathBuf::from(dir);
        }
        config
    }

    /// Build the configured store.
    pub fn open_store(&self) -> Box<dyn SnapshotStore> {
        match &self.backend {
            Backend::Http { url } => Box::new(HttpStore::new(url.clone(), self.backend_timeout)),
            Backend::Directory(dir) => Box::new(DirectoryStore::new(dir.clone())),
            Backend::Demo => Box::new(MemoryStore::with_snapshots([demo_snapshot()])),
        }
    }
}

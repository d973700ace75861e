//! Snapshot persistence backends and the demo fallback.
//!
//! A backend only needs two operations: list the stored snapshots (most recent first)
//! and fetch one by date. All backends are blocking; the web layer calls them off the
//! async runtime.

use crate::demo::demo_snapshot;
use crate::models::{Snapshot, ViewerError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// One row of the snapshot list.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SnapshotSummary {
    pub date: String,
    pub title: String,
}

impl SnapshotSummary {
    fn of(snapshot: &Snapshot) -> Self {
        Self {
            date: snapshot.metadata.date.clone(),
            title: snapshot.metadata.title.clone(),
        }
    }
}

pub trait SnapshotStore: Send + Sync {
    /// Stored snapshots, most recent first.
    fn list_snapshots(&self) -> Result<Vec<SnapshotSummary>, ViewerError>;

    /// The snapshot stored for `date`, or `None` when there is none.
    fn get_snapshot(&self, date: &str) -> Result<Option<Snapshot>, ViewerError>;
}

/// Leading `YYYY-MM-DD` of a date label such as `2024-01-24 (TEST)`.
fn date_key(date: &str) -> Option<NaiveDate> {
    let head = date.trim().get(..10).unwrap_or(date);
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

/// Most recent first; labels without a readable date go last, in reverse label order.
fn sort_recent_first(list: &mut [SnapshotSummary]) {
    list.sort_by(|a, b| {
        date_key(&b.date)
            .cmp(&date_key(&a.date))
            .then_with(|| b.date.cmp(&a.date))
    });
}

/// Snapshots kept in memory. Inserting a date again replaces it.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    snapshots: Vec<Snapshot>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshots(snapshots: impl IntoIterator<Item = Snapshot>) -> Self {
        let mut store = Self::new();
        for s in snapshots {
            store.insert(s);
        }
        store
    }

    pub fn insert(&mut self, snapshot: Snapshot) {
        self.snapshots
            .retain(|s| s.metadata.date != snapshot.metadata.date);
        self.snapshots.push(snapshot);
    }
}

impl SnapshotStore for MemoryStore {
    fn list_snapshots(&self) -> Result<Vec<SnapshotSummary>, ViewerError> {
        let mut list: Vec<SnapshotSummary> = self.snapshots.iter().map(SnapshotSummary::of).collect();
        sort_recent_first(&mut list);
        Ok(list)
    }

    fn get_snapshot(&self, date: &str) -> Result<Option<Snapshot>, ViewerError> {
        Ok(self
            .snapshots
            .iter()
            .find(|s| s.metadata.date == date)
            .cloned())
    }
}

/// A directory of `*.json` snapshot documents. Unreadable files are skipped with a warning.
#[derive(Clone, Debug)]
pub struct DirectoryStore {
    dir: PathBuf,
}

impl DirectoryStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn read_all(&self) -> Result<Vec<Snapshot>, ViewerError> {
        let entries = fs::read_dir(&self.dir)
            .map_err(|e| ViewerError::Io(format!("{}: {}", self.dir.display(), e)))?;
        let mut snapshots = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match read_snapshot_file(&path) {
                Ok(s) => snapshots.push(s),
                Err(e) => log::warn!("Skipping {}: {}", path.display(), e),
            }
        }
        Ok(snapshots)
    }
}

/// Read one snapshot file. A missing `metadata.date` is taken from the file name.
pub fn read_snapshot_file(path: &Path) -> Result<Snapshot, ViewerError> {
    let raw = fs::read_to_string(path).map_err(|e| ViewerError::Io(e.to_string()))?;
    let mut snapshot = Snapshot::from_json(&raw)?;
    if snapshot.metadata.date.trim().is_empty() {
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            snapshot.metadata.date = stem.to_string();
        }
    }
    Ok(snapshot)
}

impl SnapshotStore for DirectoryStore {
    fn list_snapshots(&self) -> Result<Vec<SnapshotSummary>, ViewerError> {
        let mut list: Vec<SnapshotSummary> = self.read_all()?.iter().map(SnapshotSummary::of).collect();
        sort_recent_first(&mut list);
        Ok(list)
    }

    fn get_snapshot(&self, date: &str) -> Result<Option<Snapshot>, ViewerError> {
        Ok(self
            .read_all()?
            .into_iter()
            .find(|s| s.metadata.date == date))
    }
}

/// Reply envelope of the spreadsheet backend.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BackendReply {
    success: bool,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    list: Option<Vec<SnapshotSummary>>,
    /// The stored document: a JSON string as saved by the recorder, or an object.
    #[serde(default)]
    full_data: Option<serde_json::Value>,
}

/// Spreadsheet web-app backend answering `?action=getList` and `?action=getData&date=…`.
#[derive(Clone, Debug)]
pub struct HttpStore {
    base_url: String,
    timeout: Duration,
}

impl HttpStore {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            timeout,
        }
    }

    fn request(&self, query: &[(&str, &str)]) -> Result<BackendReply, ViewerError> {
        let unavailable = |e: reqwest::Error| ViewerError::UpstreamUnavailable(e.to_string());
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(unavailable)?;
        let resp = client
            .get(&self.base_url)
            .query(query)
            .send()
            .map_err(unavailable)?;
        let status = resp.status();
        let body = resp.text().map_err(unavailable)?;
        if !status.is_success() {
            return Err(ViewerError::UpstreamUnavailable(format!("status {}", status)));
        }
        serde_json::from_str(&body).map_err(|e| ViewerError::MalformedSnapshot(e.to_string()))
    }
}

impl SnapshotStore for HttpStore {
    fn list_snapshots(&self) -> Result<Vec<SnapshotSummary>, ViewerError> {
        let reply = self.request(&[("action", "getList")])?;
        if !reply.success {
            return Err(ViewerError::UpstreamUnavailable(
                reply.msg.unwrap_or_else(|| "list failed".to_string()),
            ));
        }
        // The backend already answers most recent first.
        Ok(reply.list.unwrap_or_default())
    }

    fn get_snapshot(&self, date: &str) -> Result<Option<Snapshot>, ViewerError> {
        let reply = self.request(&[("action", "getData"), ("date", date)])?;
        if !reply.success {
            log::debug!("Backend has no snapshot for {}: {:?}", date, reply.msg);
            return Ok(None);
        }
        match reply.full_data {
            Some(serde_json::Value::String(raw)) => Snapshot::from_json(&raw).map(Some),
            Some(value) => Snapshot::from_value(value).map(Some),
            None => Err(ViewerError::MalformedSnapshot("reply without fullData".to_string())),
        }
    }
}

/// A snapshot ready for rendering, with the reason it had to be replaced, if any.
#[derive(Clone, Debug)]
pub struct Loaded<T> {
    pub value: T,
    pub warning: Option<String>,
}

/// Fetch a snapshot, falling back to the demo snapshot when the backend fails.
/// A date the backend does not know is still an error.
pub fn load_or_demo(store: &dyn SnapshotStore, date: &str) -> Result<Loaded<Snapshot>, ViewerError> {
    match store.get_snapshot(date) {
        Ok(Some(snapshot)) => Ok(Loaded {
            value: snapshot,
            warning: None,
        }),
        Ok(None) => Err(ViewerError::SnapshotNotFound(date.to_string())),
        Err(e) => {
            log::warn!("Falling back to demo snapshot: {}", e);
            Ok(Loaded {
                value: demo_snapshot(),
                warning: Some(e.to_string()),
            })
        }
    }
}

/// List snapshots, falling back to the demo entry when the backend fails.
pub fn list_or_demo(store: &dyn SnapshotStore) -> Loaded<Vec<SnapshotSummary>> {
    match store.list_snapshots() {
        Ok(list) => Loaded {
            value: list,
            warning: None,
        },
        Err(e) => {
            log::warn!("Falling back to demo snapshot list: {}", e);
            Loaded {
                value: vec![SnapshotSummary::of(&demo_snapshot())],
                warning: Some(e.to_string()),
            }
        }
    }
}

//! Local filesystem snapshot store.
//!
//! The whole map is loaded on [`SnapshotStore::open`], mutated in memory
//! during the run and written back by [`SnapshotStore::flush`]. There is no
//! locking; the last writer wins.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::models::Comment;
use crate::storage::Namespace;

/// On-disk layout of the store file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoreData {
    /// Time of the last flush
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,

    #[serde(default)]
    entries: BTreeMap<String, Value>,
}

/// File-backed key/value store holding the previous run's observations.
#[derive(Debug)]
pub struct SnapshotStore {
    path: PathBuf,
    data: StoreData,
    dirty: bool,
}

impl SnapshotStore {
    /// Open the store at `path`, starting empty if the file does not exist.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let data = match fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No snapshot at {}, starting fresh", path.display());
                StoreData::default()
            }
            Err(e) => return Err(AppError::Io(e)),
        };

        Ok(Self {
            path,
            data,
            dirty: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Time of the last successful flush, if any.
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.data.updated_at
    }

    /// Whether there are writes not yet flushed.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn contains(&self, key: &str) -> bool {
        self.data.entries.contains_key(key)
    }

    /// Read and deserialize the value under `key`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.data.entries.get(key) {
            Some(value) => Ok(Some(T::deserialize(value)?)),
            None => Ok(None),
        }
    }

    /// Store `value` under `key`, replacing any previous value.
    pub fn set<T: Serialize + ?Sized>(&mut self, key: impl Into<String>, value: &T) -> Result<()> {
        let value = serde_json::to_value(value)?;
        self.data.entries.insert(key.into(), value);
        self.dirty = true;
        Ok(())
    }

    /// Number of keys in `namespace`.
    pub fn count(&self, namespace: Namespace) -> usize {
        let prefix = format!("{}/", namespace.prefix());
        self.data
            .entries
            .range(prefix.clone()..)
            .take_while(|(key, _)| key.starts_with(&prefix))
            .count()
    }

    // --- Namespaced accessors ---

    /// Last comment seen for a production. A missing key reads as `None`,
    /// the same as a production that had no comment.
    pub fn last_comment(&self, prod_id: &str) -> Result<Option<Comment>> {
        Ok(self
            .get::<Option<Comment>>(&Namespace::LastComment.key(prod_id))?
            .flatten())
    }

    pub fn set_last_comment(&mut self, prod_id: &str, comment: Option<&Comment>) -> Result<()> {
        self.set(Namespace::LastComment.key(prod_id), &comment)
    }

    pub fn is_known_production(&self, link: &str) -> bool {
        self.contains(&Namespace::KnownProduction.key(link))
    }

    /// Name recorded for a known production.
    pub fn known_production_name(&self, link: &str) -> Result<Option<String>> {
        self.get(&Namespace::KnownProduction.key(link))
    }

    pub fn remember_production(&mut self, link: &str, name: &str) -> Result<()> {
        self.set(Namespace::KnownProduction.key(link), name)
    }

    /// Write the store to disk (write to temp, then rename).
    pub fn flush(&mut self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        self.data.updated_at = Some(Utc::now());
        let bytes = serde_json::to_vec_pretty(&self.data)?;

        let tmp = self.path.with_extension("tmp");
        let mut file = fs::File::create(&tmp)?;
        file.write_all(&bytes)?;
        file.flush()?;
        drop(file);
        fs::rename(&tmp, &self.path)?;

        self.dirty = false;
        log::info!(
            "Snapshot saved to {} ({} entries)",
            self.path.display(),
            self.data.entries.len()
        );
        Ok(())
    }
}

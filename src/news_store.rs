//! # News Store Module
//!
//! Append-only news feed persisted as a single JSON document. Every read
//! loads the whole file again and every append rewrites it, so the file on
//! disk is always the source of truth.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::errors::NewsStoreError;
use crate::events::Attachment;

/// One published news item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsEntry {
    pub text: String,
    pub photo: Option<String>,
    pub document: Option<String>,
    #[serde(rename = "timestamp", with = "unix_seconds")]
    pub created_at: DateTime<Utc>,
}

impl NewsEntry {
    /// Build an entry stamped with the current time
    pub fn new(text: impl Into<String>, attachment: Option<Attachment>) -> Self {
        let (photo, document) = match attachment {
            Some(Attachment::Photo(id)) => (Some(id), None),
            Some(Attachment::Document(id)) => (None, Some(id)),
            None => (None, None),
        };
        Self {
            text: text.into(),
            photo,
            document,
            // Stored timestamps carry millisecond precision
            created_at: Utc::now().trunc_subsecs(3),
        }
    }

    /// Attachments in display order: photo first, then document
    pub fn attachments(&self) -> Vec<Attachment> {
        let photo = self.photo.clone().map(Attachment::Photo);
        let document = self.document.clone().map(Attachment::Document);
        photo.into_iter().chain(document).collect()
    }
}

/// Timestamps are fractional Unix seconds on disk
mod unix_seconds {
    use chrono::{DateTime, Utc};
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.timestamp_millis() as f64 / 1000.0)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let seconds = f64::deserialize(deserializer)?;
        DateTime::from_timestamp_millis((seconds * 1000.0).round() as i64)
            .ok_or_else(|| D::Error::custom(format!("timestamp {seconds} out of range")))
    }
}

/// File-backed news feed
#[derive(Debug)]
pub struct NewsStore {
    path: PathBuf,
    // Serializes read-modify-write cycles so concurrent appends are not lost
    write_lock: Mutex<()>,
}

impl NewsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every entry in insertion order.
    ///
    /// A missing or unparsable file reads as an empty feed.
    pub async fn load_all(&self) -> Vec<NewsEntry> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "News file not found, feed is empty");
                return Vec::new();
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to read news file, treating feed as empty");
                return Vec::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "News file is not valid JSON, treating feed as empty");
                Vec::new()
            }
        }
    }

    /// Strict read for the write path: only a missing file counts as empty.
    async fn read_existing(&self) -> Result<Vec<NewsEntry>, NewsStoreError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str(&content).map_err(NewsStoreError::Corrupt)
    }

    /// Append one entry and rewrite the whole file.
    ///
    /// Fails without touching the file when the existing content cannot be
    /// read or parsed.
    pub async fn append_one(&self, entry: NewsEntry) -> Result<(), NewsStoreError> {
        let _guard = self.write_lock.lock().await;

        let mut entries = self.read_existing().await?;
        entries.push(entry);
        let bytes = to_pretty_json(&entries)?;

        let path = self.path.clone();
        tokio::task::spawn_blocking(move || write_atomically(&path, &bytes))
            .await
            .map_err(std::io::Error::other)??;

        info!(path = %self.path.display(), entries = entries.len(), "News entry appended");
        Ok(())
    }
}

fn to_pretty_json(entries: &[NewsEntry]) -> Result<Vec<u8>, NewsStoreError> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    entries.serialize(&mut serializer)?;
    Ok(buffer)
}

/// Replace `path` with `bytes` through a temporary file in the same directory
fn write_atomically(path: &Path, bytes: &[u8]) -> Result<(), NewsStoreError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp_file = NamedTempFile::new_in(dir)?;
    temp_file.write_all(bytes)?;
    temp_file.as_file().sync_all()?;
    temp_file.persist(path)?;
    Ok(())
}

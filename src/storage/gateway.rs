use chrono::{Local, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use std::fs;
use std::path::PathBuf;

use crate::utils::error::{Result, RosterError};

/// Schema version written into every backing document.
const DOCUMENT_VERSION: &str = "1.0";

/// Reads and writes one JSON backing document per collection under a data
/// directory. Documents are overwritten wholesale; there is no locking, so a
/// second process writing the same document is last-writer-wins.
#[derive(Debug, Clone)]
pub struct FileGateway {
    data_dir: PathBuf,
}

impl FileGateway {
    /// Creates the data directory if it does not exist yet.
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir)?;
        Ok(Self { data_dir })
    }

    fn document_path(&self, collection: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", collection))
    }

    /// Loads a collection. A missing document yields an empty collection;
    /// unparseable content is fatal.
    pub fn load<T: DeserializeOwned>(&self, collection: &str) -> Result<Vec<T>> {
        let path = self.document_path(collection);

        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&path)?;
        let malformed = |source| RosterError::MalformedDocument {
            path: path.display().to_string(),
            source,
        };

        let document: Value = serde_json::from_str(&content).map_err(malformed)?;
        let items = document.get(collection).cloned().unwrap_or(json!([]));

        serde_json::from_value(items).map_err(|source| RosterError::MalformedDocument {
            path: path.display().to_string(),
            source,
        })
    }

    /// Overwrites the collection's document with the envelope format:
    /// the data array under the collection name, plus version, write
    /// timestamp, and element count metadata.
    pub fn save<T: Serialize>(&self, collection: &str, items: &[T]) -> Result<()> {
        let path = self.document_path(collection);

        let mut document = serde_json::Map::new();
        document.insert(collection.to_string(), serde_json::to_value(items)?);
        document.insert(
            "metadata".to_string(),
            json!({
                "version": DOCUMENT_VERSION,
                "last_updated": Utc::now().to_rfc3339(),
                "count": items.len(),
            }),
        );

        let content = serde_json::to_string_pretty(&Value::Object(document))?;
        fs::write(&path, content)?;

        tracing::debug!(collection, path = %path.display(), "collection saved");
        Ok(())
    }

    /// Copies the collection's document to `<collection>_<YYYYMMDD_HHMMSS>.bak`
    /// next to it. Returns None if there is nothing to back up.
    pub fn backup(&self, collection: &str) -> Result<Option<PathBuf>> {
        let source = self.document_path(collection);

        if !source.exists() {
            return Ok(None);
        }

        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let backup_path = self
            .data_dir
            .join(format!("{}_{}.bak", collection, timestamp));

        fs::copy(&source, &backup_path)?;

        tracing::info!(collection, path = %backup_path.display(), "backup created");
        Ok(Some(backup_path))
    }
}

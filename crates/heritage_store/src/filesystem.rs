//! JSON-file document store.
//!
//! Layout: `{data_dir}/{collection}.json`, each file a pretty-printed JSON
//! array of objects in insertion order.
//!
//! ```text
//! data/
//! ├── books.json
//! └── locations.json
//! ```

use crate::{Collection, CollectionLocks, Document, DocumentStore, Patch, write_atomic};
use heritage_core::{Record, StoreConfig};
use heritage_error::{HeritageResult, StoreError, StoreErrorKind};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Filesystem document store backend.
///
/// Mutations run load, mutate, save under a per-collection lock, so two
/// concurrent writers in this process cannot lose each other's updates.
/// Reads go straight to disk and rely on the atomic rename for consistency.
#[derive(Debug)]
pub struct JsonFileStore {
    data_dir: PathBuf,
    locks: CollectionLocks,
}

impl JsonFileStore {
    /// Create a store rooted at `data_dir`.
    ///
    /// Creates the directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created.
    #[tracing::instrument(skip(data_dir))]
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let data_dir = data_dir.into();

        std::fs::create_dir_all(&data_dir).map_err(|e| {
            StoreError::new(StoreErrorKind::DirectoryCreation(format!(
                "{}: {}",
                data_dir.display(),
                e
            )))
        })?;

        tracing::info!(path = %data_dir.display(), "Opened document store");
        Ok(Self {
            data_dir,
            locks: CollectionLocks::new(),
        })
    }

    /// Create a store from configuration.
    pub fn from_config(config: &StoreConfig) -> Result<Self, StoreError> {
        Self::new(config.data_dir())
    }

    /// Root directory of the collection files.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Typed view of a collection.
    pub fn collection<'a, R: Record>(&'a self, name: &'a str) -> Collection<'a, R> {
        Collection::new(self, name)
    }

    /// Backing file of `collection`.
    ///
    /// Names are limited to ASCII letters, digits, `-` and `_` so they cannot
    /// escape the data directory.
    pub fn collection_path(&self, collection: &str) -> Result<PathBuf, StoreError> {
        let valid = !collection.is_empty()
            && collection
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StoreError::new(StoreErrorKind::InvalidCollection(
                collection.to_string(),
            )));
        }
        Ok(self.data_dir.join(format!("{collection}.json")))
    }

    async fn read_collection(path: &Path) -> Result<Vec<Document>, StoreError> {
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            StoreError::new(StoreErrorKind::FileRead(format!("{}: {}", path.display(), e)))
        })?;

        let records: Vec<Document> = serde_json::from_slice(&bytes).map_err(|e| {
            StoreError::new(StoreErrorKind::Format(format!("{}: {}", path.display(), e)))
        })?;

        if let Some(id) = first_duplicate(&records) {
            return Err(StoreError::new(StoreErrorKind::Format(format!(
                "{}: duplicate id '{}'",
                path.display(),
                id
            ))));
        }

        Ok(records)
    }

    async fn write_collection(path: &Path, records: &[Document]) -> Result<(), StoreError> {
        let contents = serde_json::to_vec_pretty(records).map_err(|e| {
            StoreError::new(StoreErrorKind::Format(format!("{}: {}", path.display(), e)))
        })?;
        write_atomic(path, &contents).await
    }
}

fn first_duplicate(records: &[Document]) -> Option<&str> {
    let mut seen = HashSet::with_capacity(records.len());
    records
        .iter()
        .map(Document::id)
        .find(|id| !seen.insert(*id))
}

fn not_found(collection: &str, id: &str) -> StoreError {
    StoreError::new(StoreErrorKind::NotFound {
        collection: collection.to_string(),
        id: id.to_string(),
    })
}

#[async_trait::async_trait]
impl DocumentStore for JsonFileStore {
    #[tracing::instrument(skip(self))]
    async fn load(&self, collection: &str) -> HeritageResult<Vec<Document>> {
        let path = self.collection_path(collection)?;
        let records = Self::read_collection(&path).await?;
        tracing::debug!(count = records.len(), "Loaded collection");
        Ok(records)
    }

    #[tracing::instrument(skip(self, records), fields(count = records.len()))]
    async fn save(&self, collection: &str, records: &[Document]) -> HeritageResult<()> {
        let path = self.collection_path(collection)?;
        if let Some(id) = first_duplicate(records) {
            return Err(StoreError::new(StoreErrorKind::Conflict {
                collection: collection.to_string(),
                id: id.to_string(),
            })
            .into());
        }

        let _guard = self.locks.acquire(collection).await;
        Self::write_collection(&path, records).await?;
        tracing::info!("Saved collection");
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn get(&self, collection: &str, id: &str) -> HeritageResult<Document> {
        let path = self.collection_path(collection)?;
        Self::read_collection(&path)
            .await?
            .into_iter()
            .find(|record| record.id() == id)
            .ok_or_else(|| not_found(collection, id).into())
    }

    #[tracing::instrument(skip(self, record), fields(id = %record.id()))]
    async fn insert(&self, collection: &str, record: Document) -> HeritageResult<Document> {
        let path = self.collection_path(collection)?;
        let _guard = self.locks.acquire(collection).await;

        let mut records = Self::read_collection(&path).await?;
        if records.iter().any(|existing| existing.id() == record.id()) {
            return Err(StoreError::new(StoreErrorKind::Conflict {
                collection: collection.to_string(),
                id: record.id().to_string(),
            })
            .into());
        }

        records.push(record.clone());
        Self::write_collection(&path, &records).await?;

        tracing::info!(count = records.len(), "Inserted record");
        Ok(record)
    }

    #[tracing::instrument(skip(self, patch))]
    async fn update(&self, collection: &str, id: &str, patch: Patch) -> HeritageResult<Document> {
        let path = self.collection_path(collection)?;
        let _guard = self.locks.acquire(collection).await;

        let mut records = Self::read_collection(&path).await?;
        let record = records
            .iter_mut()
            .find(|record| record.id() == id)
            .ok_or_else(|| not_found(collection, id))?;
        record.merge(&patch);
        let merged = record.clone();

        Self::write_collection(&path, &records).await?;

        tracing::info!("Updated record");
        Ok(merged)
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, collection: &str, id: &str) -> HeritageResult<Document> {
        let path = self.collection_path(collection)?;
        let _guard = self.locks.acquire(collection).await;

        let mut records = Self::read_collection(&path).await?;
        let index = records
            .iter()
            .position(|record| record.id() == id)
            .ok_or_else(|| not_found(collection, id))?;
        let removed = records.remove(index);

        Self::write_collection(&path, &records).await?;

        tracing::info!(count = records.len(), "Deleted record");
        Ok(removed)
    }

    #[tracing::instrument(skip(self))]
    async fn ensure_collection(&self, collection: &str) -> HeritageResult<bool> {
        let path = self.collection_path(collection)?;
        let _guard = self.locks.acquire(collection).await;

        let exists = tokio::fs::try_exists(&path).await.map_err(|e| {
            StoreError::new(StoreErrorKind::FileRead(format!("{}: {}", path.display(), e)))
        })?;
        if exists {
            return Ok(false);
        }

        Self::write_collection(&path, &[]).await?;
        tracing::info!(path = %path.display(), "Created empty collection");
        Ok(true)
    }
}

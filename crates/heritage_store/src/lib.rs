//! Crash-safe JSON document store for the heritage catalogue.
//!
//! Each collection is one pretty-printed JSON array on disk. Every write
//! replaces the whole file by writing a uniquely named sibling temp file and
//! renaming it over the target, so readers never observe a partial
//! collection and a crash mid-write leaves the previous content in place.
//!
//! # Features
//!
//! - **Atomic writes**: temp file + fsync + rename, see [`StagedWrite`]
//! - **Single writer per collection**: insert/update/delete hold an
//!   in-process lock for the whole load, mutate, save span
//! - **Untyped core, typed edges**: the store handles [`Document`]s;
//!   [`Collection`] layers any [`heritage_core::Record`] on top
//!
//! # Example
//!
//! ```rust
//! use heritage_store::{Document, DocumentStore, JsonFileStore, Patch};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = JsonFileStore::new("/tmp/heritage-data")?;
//! store.ensure_collection("books").await?;
//!
//! let book = Document::try_from(serde_json::json!({ "id": "1", "title": "A", "author": "B" }))?;
//! store.insert("books", book).await?;
//!
//! let merged = store.update("books", "1", Patch::new().set("title", "X")).await?;
//! assert_eq!(merged.get("author"), Some(&serde_json::json!("B")));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod atomic;
mod collection;
mod document;
mod filesystem;
mod locks;

pub use atomic::{StagedWrite, write_atomic};
pub use collection::Collection;
pub use document::{Document, Patch};
pub use filesystem::JsonFileStore;
pub use heritage_error::{StoreError, StoreErrorKind};
pub use locks::CollectionLocks;

use heritage_error::HeritageResult;

/// Trait for document store backends.
///
/// A collection is addressed by name and holds records in insertion order.
/// Implementations must keep ids unique per collection and must never let a
/// reader observe a partially written collection.
#[async_trait::async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read the full collection.
    ///
    /// Fails with `FileRead` if the backing file is missing or unreadable and
    /// `Format` if the content is not a valid record sequence.
    async fn load(&self, collection: &str) -> HeritageResult<Vec<Document>>;

    /// Replace the full collection.
    ///
    /// On failure the previous content is left intact.
    async fn save(&self, collection: &str, records: &[Document]) -> HeritageResult<()>;

    /// Primary-key lookup.
    async fn get(&self, collection: &str, id: &str) -> HeritageResult<Document>;

    /// Append a record, failing with `Conflict` if its id is taken.
    async fn insert(&self, collection: &str, record: Document) -> HeritageResult<Document>;

    /// Shallow-merge `patch` into the record with `id` and return the result.
    async fn update(&self, collection: &str, id: &str, patch: Patch) -> HeritageResult<Document>;

    /// Remove the record with `id` and return it.
    async fn delete(&self, collection: &str, id: &str) -> HeritageResult<Document>;

    /// Create an empty collection if none exists. Returns true if one was created.
    async fn ensure_collection(&self, collection: &str) -> HeritageResult<bool>;
}

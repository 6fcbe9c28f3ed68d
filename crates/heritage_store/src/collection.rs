//! Typed access to a collection.

use crate::{Document, DocumentStore, Patch};
use heritage_core::Record;
use heritage_error::{HeritageError, HeritageResult};
use serde::Serialize;
use std::marker::PhantomData;

/// A collection viewed through a concrete record type.
///
/// Conversion happens at this edge: the store keeps whatever fields are on
/// disk, and a document that does not fit `R` surfaces as a `Format` error.
///
/// # Example
///
/// ```rust
/// use heritage_core::{Book, BOOKS};
/// use heritage_store::{Collection, JsonFileStore};
///
/// # async fn example(store: &JsonFileStore) -> heritage_error::HeritageResult<()> {
/// let books: Collection<'_, Book> = store.collection(BOOKS);
/// for book in books.list().await? {
///     println!("{} by {}", book.title, book.author);
/// }
/// # Ok(())
/// # }
/// ```
pub struct Collection<'a, R> {
    store: &'a dyn DocumentStore,
    name: &'a str,
    _record: PhantomData<fn() -> R>,
}

impl<'a, R: Record> Collection<'a, R> {
    /// Bind `name` on `store` to record type `R`.
    pub fn new(store: &'a dyn DocumentStore, name: &'a str) -> Self {
        Self {
            store,
            name,
            _record: PhantomData,
        }
    }

    /// Collection name.
    pub fn name(&self) -> &str {
        self.name
    }

    /// Every record, in insertion order.
    pub async fn list(&self) -> HeritageResult<Vec<R>> {
        let documents = self.store.load(self.name).await?;
        documents
            .into_iter()
            .map(|document| document.into_record::<R>().map_err(HeritageError::from))
            .collect()
    }

    /// The record with `id`.
    pub async fn get(&self, id: &str) -> HeritageResult<R> {
        Ok(self.store.get(self.name, id).await?.into_record()?)
    }

    /// Insert `record`, failing with `Conflict` if its id is taken.
    pub async fn insert(&self, record: &R) -> HeritageResult<R> {
        let document = Document::from_record(record)?;
        Ok(self.store.insert(self.name, document).await?.into_record()?)
    }

    /// Merge the fields `patch` serializes into the record with `id`.
    pub async fn update<P: Serialize + ?Sized>(&self, id: &str, patch: &P) -> HeritageResult<R> {
        let patch = Patch::from_serializable(patch)?;
        Ok(self.store.update(self.name, id, patch).await?.into_record()?)
    }

    /// Remove and return the record with `id`.
    pub async fn delete(&self, id: &str) -> HeritageResult<R> {
        Ok(self.store.delete(self.name, id).await?.into_record()?)
    }
}

//! Store and media composition.

use heritage_core::{
    BOOKS, Book, BookPatch, HeritageConfig, LOCATIONS, Location, LocationPatch, Validate,
};
use heritage_error::{HeritageResult, MediaError, MediaErrorKind};
use heritage_media::{MediaPipeline, VariantPaths, WebpVariantPipeline};
use heritage_store::{Collection, DocumentStore, JsonFileStore};
use std::collections::HashMap;
use std::sync::Arc;

/// Default upload cap, 10 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// The exhibit catalogue: locations, books and their images.
///
/// Typed payloads are validated here before they reach the store. The store
/// and the pipeline never call each other; image attachment writes the
/// variant files first and the location record second.
#[derive(Clone)]
pub struct Catalogue {
    store: Arc<dyn DocumentStore>,
    media: Arc<dyn MediaPipeline>,
    max_upload_bytes: usize,
}

impl std::fmt::Debug for Catalogue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalogue")
            .field("max_upload_bytes", &self.max_upload_bytes)
            .finish_non_exhaustive()
    }
}

impl Catalogue {
    /// Compose an arbitrary store and pipeline.
    pub fn new(store: Arc<dyn DocumentStore>, media: Arc<dyn MediaPipeline>) -> Self {
        Self {
            store,
            media,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    /// Filesystem store and WEBP pipeline from configuration.
    ///
    /// # Errors
    ///
    /// Fails when the data directory cannot be created.
    #[tracing::instrument(skip(config))]
    pub fn from_config(config: &HeritageConfig) -> HeritageResult<Self> {
        let store = JsonFileStore::from_config(config.store())?;
        let media = WebpVariantPipeline::from_config(config.media());
        Ok(Self::new(Arc::new(store), Arc::new(media))
            .with_max_upload_bytes(*config.media().max_upload_bytes()))
    }

    /// Override the upload cap.
    pub fn with_max_upload_bytes(mut self, limit: usize) -> Self {
        self.max_upload_bytes = limit;
        self
    }

    /// Upload cap in bytes.
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }

    /// Underlying document store.
    pub fn store(&self) -> &dyn DocumentStore {
        self.store.as_ref()
    }

    fn locations_collection(&self) -> Collection<'_, Location> {
        Collection::new(self.store.as_ref(), LOCATIONS)
    }

    fn books_collection(&self) -> Collection<'_, Book> {
        Collection::new(self.store.as_ref(), BOOKS)
    }

    /// Create both collection files if missing. Returns how many were created.
    #[tracing::instrument(skip(self))]
    pub async fn initialize(&self) -> HeritageResult<usize> {
        let mut created = 0;
        for collection in [LOCATIONS, BOOKS] {
            if self.store.ensure_collection(collection).await? {
                created += 1;
            }
        }
        tracing::info!(created, "Catalogue initialized");
        Ok(created)
    }

    /// All locations in stored order.
    pub async fn locations(&self) -> HeritageResult<Vec<Location>> {
        self.locations_collection().list().await
    }

    /// One location by id.
    pub async fn location(&self, id: &str) -> HeritageResult<Location> {
        self.locations_collection().get(id).await
    }

    /// Validate and insert a new location.
    pub async fn create_location(&self, location: Location) -> HeritageResult<Location> {
        location.validate()?;
        self.locations_collection().insert(&location).await
    }

    /// Validate and apply a partial update.
    pub async fn update_location(
        &self,
        id: &str,
        patch: &LocationPatch,
    ) -> HeritageResult<Location> {
        patch.validate()?;
        self.locations_collection().update(id, patch).await
    }

    /// Remove a location, returning it. Its image files stay on disk.
    pub async fn delete_location(&self, id: &str) -> HeritageResult<Location> {
        self.locations_collection().delete(id).await
    }

    /// All books in stored order.
    pub async fn books(&self) -> HeritageResult<Vec<Book>> {
        self.books_collection().list().await
    }

    /// One book by id.
    pub async fn book(&self, id: &str) -> HeritageResult<Book> {
        self.books_collection().get(id).await
    }

    /// Validate and insert a new book.
    pub async fn create_book(&self, book: Book) -> HeritageResult<Book> {
        book.validate()?;
        self.books_collection().insert(&book).await
    }

    /// Validate and apply a partial update.
    pub async fn update_book(&self, id: &str, patch: &BookPatch) -> HeritageResult<Book> {
        patch.validate()?;
        self.books_collection().update(id, patch).await
    }

    /// Remove a book, returning it.
    ///
    /// Locations still referencing it keep the reference; it is dropped
    /// when resolved.
    pub async fn delete_book(&self, id: &str) -> HeritageResult<Book> {
        self.books_collection().delete(id).await
    }

    /// Books referenced by a location, in reference order.
    ///
    /// References to books that no longer exist are skipped.
    #[tracing::instrument(skip(self))]
    pub async fn books_for_location(&self, id: &str) -> HeritageResult<Vec<Book>> {
        let location = self.location(id).await?;
        let by_id: HashMap<String, Book> = self
            .books()
            .await?
            .into_iter()
            .map(|book| (book.id.clone(), book))
            .collect();

        let resolved: Vec<Book> = location
            .books
            .iter()
            .filter_map(|reference| match by_id.get(reference) {
                Some(book) => Some(book.clone()),
                None => {
                    tracing::debug!(book = %reference, "Skipping dangling book reference");
                    None
                }
            })
            .collect();
        Ok(resolved)
    }

    /// Ingest an upload under the size cap, returning its variant paths.
    ///
    /// # Errors
    ///
    /// `TooLarge` before anything else is inspected, then whatever the
    /// pipeline reports.
    #[tracing::instrument(skip(self, data), fields(size = data.len()))]
    pub async fn ingest_image(&self, data: Vec<u8>) -> HeritageResult<VariantPaths> {
        self.check_upload_size(&data)?;
        self.media.ingest(data).await
    }

    /// Ingest an upload and make it the location's image set.
    ///
    /// The location must exist and the upload must fit under the cap before
    /// any file is written. If the record update fails after ingestion, the
    /// variant files are left behind.
    #[tracing::instrument(skip(self, data), fields(size = data.len()))]
    pub async fn attach_image(&self, location_id: &str, data: Vec<u8>) -> HeritageResult<Location> {
        self.check_upload_size(&data)?;
        self.location(location_id).await?;

        let paths = self.media.ingest(data).await?;
        let location = self
            .update_location(location_id, &LocationPatch::images(paths.into()))
            .await?;

        tracing::info!(location = %location_id, "Attached image");
        Ok(location)
    }

    #[track_caller]
    fn check_upload_size(&self, data: &[u8]) -> Result<(), MediaError> {
        if data.len() > self.max_upload_bytes {
            return Err(MediaError::new(MediaErrorKind::TooLarge {
                size: data.len(),
                limit: self.max_upload_bytes,
            }));
        }
        Ok(())
    }
}

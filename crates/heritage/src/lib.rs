//! Heritage - catalogue backend for a heritage-site exhibit.
//!
//! The catalogue is two flat JSON collections, `locations` and `books`,
//! plus a directory of WEBP image variants produced from uploads.
//!
//! # Architecture
//!
//! - `heritage_error` - Error types
//! - `heritage_core` - Record views, validation rules, configuration
//! - `heritage_store` - Crash-safe JSON document store
//! - `heritage_media` - Upload sniffing and WEBP variant generation
//!
//! This crate re-exports all of them and adds [`Catalogue`], which composes
//! the store and the media pipeline the way a request handler would.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use heritage::{Catalogue, HeritageConfig, Location};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = HeritageConfig::load()?;
//! let catalogue = Catalogue::from_config(&config)?;
//! catalogue.initialize().await?;
//!
//! let location = Location::new("mill", "The Old Mill", "old-mill", "Water mill, 1820.");
//! catalogue.create_location(location).await?;
//!
//! let photo = std::fs::read("mill.jpg")?;
//! let updated = catalogue.attach_image("mill", photo).await?;
//! println!("{:?}", updated.images.preferred());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod catalogue;
pub mod observability;

pub use catalogue::Catalogue;

pub use heritage_error::{
    CliError, CliErrorKind, ConfigError, HeritageError, HeritageErrorKind, HeritageResult,
    MediaError, MediaErrorKind, StoreError, StoreErrorKind, ValidationError,
};

pub use heritage_core::{
    BOOKS, Book, BookPatch, HeritageConfig, LOCATIONS, Location, LocationImages, LocationPatch,
    LogConfig, MediaConfig, Record, StoreConfig, Validate,
};

pub use heritage_store::{
    Collection, CollectionLocks, Document, DocumentStore, JsonFileStore, Patch, StagedWrite,
    write_atomic,
};

pub use heritage_media::{
    MediaKind, MediaPipeline, Variant, VariantPaths, WebpVariantPipeline, sniff,
};

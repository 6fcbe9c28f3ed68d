//! Image ingestion for the heritage catalogue.
//!
//! An upload is sniffed from its bytes, decoded with its EXIF orientation
//! applied, and re-encoded as three lossy WEBP variants of fixed width:
//!
//! | Variant | Width  | File                 |
//! |---------|--------|----------------------|
//! | full    | 2000px | `{id}-full.webp`     |
//! | card    | 1024px | `{id}-card.webp`     |
//! | thumb   | 320px  | `{id}-thumb.webp`    |
//!
//! Type and decodability are settled before the first file is created. Once
//! writing starts, a failure leaves any variants already written in place;
//! the caller treats the whole ingestion as failed.
//!
//! # Example
//!
//! ```rust,no_run
//! use heritage_media::{MediaPipeline, WebpVariantPipeline};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pipeline = WebpVariantPipeline::new("/srv/heritage/public/images", "public/images");
//! let upload = std::fs::read("photo.jpg")?;
//! let paths = pipeline.ingest(upload).await?;
//! println!("card at {}", paths.card);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod kind;
mod pipeline;
mod transcode;
mod variant;

pub use heritage_error::{MediaError, MediaErrorKind};
pub use kind::{MediaKind, sniff};
pub use pipeline::WebpVariantPipeline;
pub use transcode::{
    MAX_WEBP_DIMENSION, check_jpeg_complete, check_variant_dimensions, decode_oriented,
    encode_webp, resize_to_width,
};
pub use variant::{Variant, VariantPaths};

use heritage_error::HeritageResult;

/// Trait for image ingestion backends.
#[async_trait::async_trait]
pub trait MediaPipeline: Send + Sync {
    /// Validate, transcode and persist an upload, returning storage-relative
    /// paths to its variants.
    ///
    /// The upload size cap is the caller's responsibility.
    async fn ingest(&self, data: Vec<u8>) -> HeritageResult<VariantPaths>;
}

//! Filesystem-backed WEBP variant pipeline.

use crate::transcode::{check_variant_dimensions, decode_oriented, encode_webp, resize_to_width};
use crate::{MediaKind, MediaPipeline, Variant, VariantPaths, sniff};
use heritage_core::MediaConfig;
use heritage_error::{HeritageResult, MediaError, MediaErrorKind};
use image::DynamicImage;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinError;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use uuid::Uuid;

/// Default lossy quality.
pub const DEFAULT_QUALITY: f32 = 80.0;

/// Writes `{id}-{variant}.webp` files into one directory.
///
/// # Example Structure
///
/// ```text
/// public/images/
/// ├── 3f2a...-full.webp   (2000px wide)
/// ├── 3f2a...-card.webp   (1024px wide)
/// └── 3f2a...-thumb.webp  (320px wide)
/// ```
///
/// The directory is created on first ingestion. Returned paths use
/// `public_prefix` rather than the filesystem location, so the output
/// directory can move without rewriting stored documents.
#[derive(Debug, Clone)]
pub struct WebpVariantPipeline {
    output_dir: PathBuf,
    public_prefix: String,
    quality: f32,
}

impl WebpVariantPipeline {
    /// Pipeline writing into `output_dir`, reporting paths under `public_prefix`.
    pub fn new(output_dir: impl Into<PathBuf>, public_prefix: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            public_prefix: public_prefix.into(),
            quality: DEFAULT_QUALITY,
        }
    }

    /// Pipeline from the `[media]` configuration section.
    pub fn from_config(config: &MediaConfig) -> Self {
        Self::new(config.output_dir().clone(), config.public_prefix().clone())
            .with_quality(*config.quality())
    }

    /// Override the lossy quality, clamped to 0..=100.
    pub fn with_quality(mut self, quality: f32) -> Self {
        self.quality = quality.clamp(0.0, 100.0);
        self
    }

    /// Directory variants are written to.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Prefix of returned paths.
    pub fn public_prefix(&self) -> &str {
        &self.public_prefix
    }

    /// Lossy quality in use.
    pub fn quality(&self) -> f32 {
        self.quality
    }

    async fn transcode(
        image: Arc<DynamicImage>,
        variant: Variant,
        quality: f32,
    ) -> Result<Vec<u8>, MediaError> {
        tokio::task::spawn_blocking(move || {
            let resized = resize_to_width(&image, variant.width());
            encode_webp(&resized, quality)
        })
        .await
        .map_err(|e| join_error(MediaErrorKind::Encode, &variant.to_string(), e))?
    }

    async fn ensure_output_dir(&self) -> Result<(), MediaError> {
        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| {
                MediaError::new(MediaErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    self.output_dir.display(),
                    e
                )))
            })
    }

    /// Write one variant through a temporary sibling so readers never see
    /// a partial file.
    async fn write_variant(&self, file_name: &str, bytes: &[u8]) -> Result<(), MediaError> {
        let target = self.output_dir.join(file_name);
        let temp = self.output_dir.join(format!(".{}.tmp", file_name));

        let written = match tokio::fs::write(&temp, bytes).await {
            Ok(()) => tokio::fs::rename(&temp, &target).await,
            Err(e) => Err(e),
        };

        if let Err(e) = written {
            discard(&temp).await;
            return Err(MediaError::new(MediaErrorKind::FileWrite(format!(
                "{}: {}",
                target.display(),
                e
            ))));
        }

        tracing::debug!(path = %target.display(), size = bytes.len(), "Wrote variant");
        Ok(())
    }
}

async fn discard(temp: &Path) {
    match tokio::fs::remove_file(temp).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => {
            tracing::warn!(path = %temp.display(), error = %e, "Failed to remove temp file")
        }
    }
}

/// Random 22-character URL-safe id for one upload.
fn new_media_id() -> String {
    URL_SAFE_NO_PAD.encode(Uuid::new_v4().as_bytes())
}

fn join_error(kind: fn(String) -> MediaErrorKind, step: &str, e: JoinError) -> MediaError {
    MediaError::new(kind(format!("{} task failed: {}", step, e)))
}

#[async_trait::async_trait]
impl MediaPipeline for WebpVariantPipeline {
    #[tracing::instrument(
        skip(self, data),
        fields(size = data.len(), kind = tracing::field::Empty, media_id = tracing::field::Empty)
    )]
    async fn ingest(&self, data: Vec<u8>) -> HeritageResult<VariantPaths> {
        let kind: MediaKind = sniff(&data)?;
        tracing::Span::current().record("kind", tracing::field::display(kind));

        let image = tokio::task::spawn_blocking(move || {
            let image = decode_oriented(&data, kind)?;
            check_variant_dimensions(&image)?;
            Ok::<_, MediaError>(image)
        })
        .await
        .map_err(|e| join_error(MediaErrorKind::Decode, "decode", e))??;
        let image = Arc::new(image);

        let (full, card, thumb) = tokio::try_join!(
            Self::transcode(Arc::clone(&image), Variant::Full, self.quality),
            Self::transcode(Arc::clone(&image), Variant::Card, self.quality),
            Self::transcode(Arc::clone(&image), Variant::Thumb, self.quality),
        )?;

        let id = new_media_id();
        tracing::Span::current().record("media_id", id.as_str());

        self.ensure_output_dir().await?;
        for (variant, bytes) in [
            (Variant::Full, &full),
            (Variant::Card, &card),
            (Variant::Thumb, &thumb),
        ] {
            self.write_variant(&variant.file_name(&id), bytes).await?;
        }

        let paths = VariantPaths::new(&self.public_prefix, id);
        tracing::info!(
            media_id = %paths.id,
            source_width = image.width(),
            source_height = image.height(),
            "Ingested upload"
        );
        Ok(paths)
    }
}

//! Content sniffing.

use heritage_error::{MediaError, MediaErrorKind};
use image::ImageFormat;

/// Image formats accepted for upload.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::EnumIter,
    derive_more::Display,
)]
pub enum MediaKind {
    /// JPEG / JFIF
    #[display("image/jpeg")]
    Jpeg,
    /// PNG
    #[display("image/png")]
    Png,
    /// WEBP, lossy or lossless
    #[display("image/webp")]
    Webp,
}

impl MediaKind {
    /// MIME type string.
    pub fn mime_type(&self) -> &'static str {
        match self {
            MediaKind::Jpeg => "image/jpeg",
            MediaKind::Png => "image/png",
            MediaKind::Webp => "image/webp",
        }
    }

    /// Matching decoder format.
    pub fn image_format(&self) -> ImageFormat {
        match self {
            MediaKind::Jpeg => ImageFormat::Jpeg,
            MediaKind::Png => ImageFormat::Png,
            MediaKind::Webp => ImageFormat::WebP,
        }
    }
}

/// Determine the real type of `data` from its magic bytes.
///
/// Filenames and declared content types are never consulted.
///
/// # Errors
///
/// `UnsupportedType` for empty input, unrecognised content, or any format
/// outside JPEG, PNG and WEBP.
#[track_caller]
pub fn sniff(data: &[u8]) -> Result<MediaKind, MediaError> {
    if data.is_empty() {
        return Err(MediaError::new(MediaErrorKind::UnsupportedType(
            "empty upload".to_string(),
        )));
    }

    match image::guess_format(data) {
        Ok(ImageFormat::Jpeg) => Ok(MediaKind::Jpeg),
        Ok(ImageFormat::Png) => Ok(MediaKind::Png),
        Ok(ImageFormat::WebP) => Ok(MediaKind::Webp),
        Ok(other) => Err(MediaError::new(MediaErrorKind::UnsupportedType(
            other.to_mime_type().to_string(),
        ))),
        Err(_) => Err(MediaError::new(MediaErrorKind::UnsupportedType(
            "unrecognized content".to_string(),
        ))),
    }
}

//! Decode, resize and encode steps.
//!
//! These are blocking CPU work; the pipeline runs them on the blocking pool.

use crate::{MediaKind, Variant};
use heritage_error::{MediaError, MediaErrorKind};
use image::imageops::FilterType;
use image::{DynamicImage, ImageDecoder, ImageReader};
use std::io::Cursor;

/// Decode `data` as `kind` and rotate or flip it upright.
///
/// The EXIF orientation tag is consumed here; the returned pixels carry no
/// metadata.
///
/// # Errors
///
/// `Decode` when the bytes are corrupt or truncated.
#[track_caller]
pub fn decode_oriented(data: &[u8], kind: MediaKind) -> Result<DynamicImage, MediaError> {
    if kind == MediaKind::Jpeg {
        check_jpeg_complete(data)?;
    }

    let decode_error = |e: image::ImageError| {
        MediaError::new(MediaErrorKind::Decode(format!("{}: {}", kind, e)))
    };

    let mut decoder = ImageReader::with_format(Cursor::new(data), kind.image_format())
        .into_decoder()
        .map_err(decode_error)?;
    // Malformed orientation tags are ignored.
    let orientation = decoder
        .orientation()
        .unwrap_or(image::metadata::Orientation::NoTransforms);
    let mut image = DynamicImage::from_decoder(decoder).map_err(decode_error)?;
    image.apply_orientation(orientation);

    tracing::trace!(
        width = image.width(),
        height = image.height(),
        ?orientation,
        "Decoded upload"
    );
    Ok(image)
}

/// Largest width or height a WEBP image can have.
pub const MAX_WEBP_DIMENSION: u32 = 16383;

/// JPEG end-of-image marker.
const JPEG_EOI: [u8; 2] = [0xFF, 0xD9];

/// Reject JPEG data that stops before its end-of-image marker.
///
/// The JPEG decoder fills missing scanlines instead of failing, so a cut-off
/// upload would otherwise decode. Trailing `0x00` and `0xFF` fill bytes are
/// ignored.
#[track_caller]
pub fn check_jpeg_complete(data: &[u8]) -> Result<(), MediaError> {
    let end = data
        .iter()
        .rposition(|&b| b != 0x00 && b != 0xFF)
        .map_or(0, |i| i + 1);
    if !data[..end].ends_with(&JPEG_EOI) {
        return Err(MediaError::new(MediaErrorKind::Decode(format!(
            "{}: missing end-of-image marker, data truncated",
            MediaKind::Jpeg
        ))));
    }
    Ok(())
}

/// Fail when any variant of `image` would exceed the WEBP size limit.
///
/// Runs before resizing so an extreme aspect ratio never allocates an
/// oversized buffer.
#[track_caller]
pub fn check_variant_dimensions(image: &DynamicImage) -> Result<(), MediaError> {
    for variant in [Variant::Full, Variant::Card, Variant::Thumb] {
        let height = scaled_height(image, variant.width());
        if height > MAX_WEBP_DIMENSION {
            return Err(MediaError::new(MediaErrorKind::Decode(format!(
                "{}x{} image needs a {}x{} {} variant, over the {}px WEBP limit",
                image.width(),
                image.height(),
                variant.width(),
                height,
                variant,
                MAX_WEBP_DIMENSION
            ))));
        }
    }
    Ok(())
}

/// Height matching `width` at the aspect ratio of `image`, at least 1.
pub fn scaled_height(image: &DynamicImage, width: u32) -> u32 {
    let (w, h) = (image.width().max(1) as u64, image.height() as u64);
    let scaled = (h * width as u64 + w / 2) / w;
    scaled.clamp(1, u32::MAX as u64) as u32
}

/// Resize to exactly `width` pixels wide, preserving aspect ratio.
///
/// Smaller images are enlarged.
pub fn resize_to_width(image: &DynamicImage, width: u32) -> DynamicImage {
    let height = scaled_height(image, width);
    if image.width() == width && image.height() == height {
        return image.clone();
    }
    image.resize_exact(width, height, FilterType::Lanczos3)
}

/// Encode as lossy WEBP at `quality` (0 to 100).
///
/// Alpha is kept when the source has it.
///
/// # Errors
///
/// `Encode` when the encoder rejects the image.
#[track_caller]
pub fn encode_webp(image: &DynamicImage, quality: f32) -> Result<Vec<u8>, MediaError> {
    let (width, height) = (image.width(), image.height());
    let encoded = if image.color().has_alpha() {
        let rgba = image.to_rgba8();
        webp::Encoder::from_rgba(rgba.as_raw(), width, height).encode_simple(false, quality)
    } else {
        let rgb = image.to_rgb8();
        webp::Encoder::from_rgb(rgb.as_raw(), width, height).encode_simple(false, quality)
    };

    encoded.map(|memory| memory.to_vec()).map_err(|e| {
        MediaError::new(MediaErrorKind::Encode(format!(
            "{}x{}: {:?}",
            width, height, e
        )))
    })
}

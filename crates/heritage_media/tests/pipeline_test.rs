//! Tests for the WEBP variant pipeline.

use heritage_error::{HeritageError, MediaErrorKind};
use heritage_media::{MediaPipeline, Variant, VariantPaths, WebpVariantPipeline};
use image::{DynamicImage, GenericImageView, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use std::collections::HashSet;
use std::io::Cursor;
use std::path::Path;
use strum::IntoEnumIterator;
use tempfile::TempDir;

fn encode(image: &DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    image.write_to(&mut out, format).unwrap();
    out.into_inner()
}

fn gradient(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    }))
}

fn media_kind(err: &HeritageError) -> &MediaErrorKind {
    err.as_media().expect("expected a media error").kind()
}

fn file_count(dir: &Path) -> usize {
    match std::fs::read_dir(dir) {
        Ok(entries) => entries.count(),
        Err(_) => 0,
    }
}

fn pipeline(dir: &TempDir) -> WebpVariantPipeline {
    WebpVariantPipeline::new(dir.path().join("images"), "public/images")
}

fn open_variant(dir: &TempDir, paths: &VariantPaths, variant: Variant) -> DynamicImage {
    let name = Path::new(paths.get(variant)).file_name().unwrap();
    let bytes = std::fs::read(dir.path().join("images").join(name)).unwrap();
    assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::WebP);
    image::load_from_memory_with_format(&bytes, ImageFormat::WebP).unwrap()
}

/// Prepend an EXIF APP1 segment carrying `orientation` to a baseline JPEG.
fn with_exif_orientation(jpeg: &[u8], orientation: u8) -> Vec<u8> {
    assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);
    let mut tiff = vec![b'M', b'M', 0x00, 0x2A, 0x00, 0x00, 0x00, 0x08];
    tiff.extend_from_slice(&[0x00, 0x01]);
    tiff.extend_from_slice(&[0x01, 0x12, 0x00, 0x03, 0x00, 0x00, 0x00, 0x01]);
    tiff.extend_from_slice(&[0x00, orientation, 0x00, 0x00]);
    tiff.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);

    let mut payload = b"Exif\0\0".to_vec();
    payload.extend_from_slice(&tiff);
    let length = (payload.len() + 2) as u16;

    let mut out = vec![0xFF, 0xD8, 0xFF, 0xE1];
    out.extend_from_slice(&length.to_be_bytes());
    out.extend_from_slice(&payload);
    out.extend_from_slice(&jpeg[2..]);
    out
}

#[tokio::test]
async fn test_unrecognized_bytes_are_rejected_without_writing() {
    let dir = TempDir::new().unwrap();
    let pipeline = pipeline(&dir);
    let garbage: Vec<u8> = (0..4096u32).map(|i| (i * 7 + 3) as u8).collect();

    let err = pipeline.ingest(garbage).await.unwrap_err();

    assert!(matches!(media_kind(&err), MediaErrorKind::UnsupportedType(_)));
    assert_eq!(file_count(&dir.path().join("images")), 0);
}

#[tokio::test]
async fn test_empty_upload_is_rejected() {
    let dir = TempDir::new().unwrap();
    let err = pipeline(&dir).ingest(Vec::new()).await.unwrap_err();
    assert!(matches!(media_kind(&err), MediaErrorKind::UnsupportedType(_)));
}

#[tokio::test]
async fn test_gif_is_rejected_by_content() {
    let dir = TempDir::new().unwrap();
    let mut gif = b"GIF89a".to_vec();
    gif.extend_from_slice(&[0x01, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x3B]);

    let err = pipeline(&dir).ingest(gif).await.unwrap_err();

    match media_kind(&err) {
        MediaErrorKind::UnsupportedType(kind) => assert_eq!(kind, "image/gif"),
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(file_count(&dir.path().join("images")), 0);
}

#[tokio::test]
async fn test_truncated_png_fails_to_decode_without_writing() {
    let dir = TempDir::new().unwrap();
    let pipeline = pipeline(&dir);
    let mut png = encode(&gradient(300, 200), ImageFormat::Png);
    png.truncate(png.len() / 2);

    let err = pipeline.ingest(png).await.unwrap_err();

    assert!(matches!(media_kind(&err), MediaErrorKind::Decode(_)));
    assert_eq!(file_count(&dir.path().join("images")), 0);
}

#[tokio::test]
async fn test_truncated_jpeg_fails_to_decode_without_writing() {
    let dir = TempDir::new().unwrap();
    let pipeline = pipeline(&dir);
    let mut jpeg = encode(&gradient(800, 600), ImageFormat::Jpeg);
    jpeg.truncate(jpeg.len() / 2);

    let err = pipeline.ingest(jpeg).await.unwrap_err();

    assert!(matches!(media_kind(&err), MediaErrorKind::Decode(_)));
    assert_eq!(file_count(&dir.path().join("images")), 0);
}

#[tokio::test]
async fn test_extreme_aspect_ratio_is_rejected_before_resizing() {
    let dir = TempDir::new().unwrap();
    let pipeline = pipeline(&dir);
    let strip = encode(&gradient(1, 10_000), ImageFormat::Png);

    let err = pipeline.ingest(strip).await.unwrap_err();

    match media_kind(&err) {
        MediaErrorKind::Decode(reason) => assert!(reason.contains("16383"), "{}", reason),
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(file_count(&dir.path().join("images")), 0);
}

#[tokio::test]
async fn test_large_jpeg_produces_three_variants() {
    let dir = TempDir::new().unwrap();
    let pipeline = pipeline(&dir);
    let jpeg = encode(&gradient(4000, 3000), ImageFormat::Jpeg);

    let paths = pipeline.ingest(jpeg).await.unwrap();

    assert_eq!(paths.full, format!("public/images/{}-full.webp", paths.id));
    assert_eq!(paths.card, format!("public/images/{}-card.webp", paths.id));
    assert_eq!(paths.thumb, format!("public/images/{}-thumb.webp", paths.id));
    assert_eq!(file_count(&dir.path().join("images")), 3);

    let expected = [(2000, 1500), (1024, 768), (320, 240)];
    for (variant, (width, height)) in Variant::iter().zip(expected) {
        let decoded = open_variant(&dir, &paths, variant);
        assert_eq!(decoded.dimensions(), (width, height), "{} variant", variant);
    }
}

#[tokio::test]
async fn test_small_png_is_enlarged_to_each_width() {
    let dir = TempDir::new().unwrap();
    let pipeline = pipeline(&dir);
    let png = encode(&gradient(200, 100), ImageFormat::Png);

    let paths = pipeline.ingest(png).await.unwrap();

    for variant in Variant::iter() {
        let decoded = open_variant(&dir, &paths, variant);
        assert_eq!(decoded.width(), variant.width());
        assert_eq!(decoded.height(), variant.width() / 2);
    }
}

#[tokio::test]
async fn test_png_alpha_survives() {
    let dir = TempDir::new().unwrap();
    let pipeline = pipeline(&dir);
    let translucent = DynamicImage::ImageRgba8(RgbaImage::from_pixel(400, 400, Rgba([10, 200, 30, 90])));
    let png = encode(&translucent, ImageFormat::Png);

    let paths = pipeline.ingest(png).await.unwrap();

    let thumb = open_variant(&dir, &paths, Variant::Thumb);
    assert!(thumb.color().has_alpha());
    assert_eq!(thumb.dimensions(), (320, 320));
}

#[tokio::test]
async fn test_webp_input_is_accepted() {
    let dir = TempDir::new().unwrap();
    let pipeline = pipeline(&dir);
    let webp = encode(&gradient(640, 480), ImageFormat::WebP);

    let paths = pipeline.ingest(webp).await.unwrap();

    assert_eq!(open_variant(&dir, &paths, Variant::Card).dimensions(), (1024, 768));
}

#[tokio::test]
async fn test_exif_orientation_is_applied() {
    let dir = TempDir::new().unwrap();
    let pipeline = pipeline(&dir);
    let landscape = encode(&gradient(640, 320), ImageFormat::Jpeg);
    // Orientation 6: stored landscape, displayed rotated 90 degrees clockwise.
    let rotated = with_exif_orientation(&landscape, 6);

    let paths = pipeline.ingest(rotated).await.unwrap();

    let thumb = open_variant(&dir, &paths, Variant::Thumb);
    assert_eq!(thumb.dimensions(), (320, 640));
}

#[tokio::test]
async fn test_output_carries_no_exif() {
    let dir = TempDir::new().unwrap();
    let pipeline = pipeline(&dir);
    let jpeg = with_exif_orientation(&encode(&gradient(400, 300), ImageFormat::Jpeg), 1);

    let paths = pipeline.ingest(jpeg).await.unwrap();

    let name = Path::new(&paths.card).file_name().unwrap();
    let bytes = std::fs::read(dir.path().join("images").join(name)).unwrap();
    assert!(!bytes.windows(4).any(|w| w == b"EXIF"));
    assert!(!bytes.windows(6).any(|w| w == b"Exif\0\0"));
}

#[tokio::test]
async fn test_ingestions_get_distinct_ids() {
    let dir = TempDir::new().unwrap();
    let pipeline = pipeline(&dir);
    let png = encode(&gradient(64, 64), ImageFormat::Png);

    let first = pipeline.ingest(png.clone()).await.unwrap();
    let second = pipeline.ingest(png).await.unwrap();

    assert_ne!(first.id, second.id);
    let all: HashSet<_> = first.iter().chain(second.iter()).map(|(_, p)| p.to_string()).collect();
    assert_eq!(all.len(), 6);
    assert_eq!(file_count(&dir.path().join("images")), 6);
}

#[tokio::test]
async fn test_existing_output_directory_is_reused() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("images")).unwrap();
    std::fs::write(dir.path().join("images").join("keep.txt"), b"x").unwrap();
    let pipeline = pipeline(&dir);

    pipeline
        .ingest(encode(&gradient(50, 50), ImageFormat::Png))
        .await
        .unwrap();

    assert_eq!(file_count(&dir.path().join("images")), 4);
    assert!(dir.path().join("images").join("keep.txt").exists());
}

#[tokio::test]
async fn test_unwritable_output_reports_directory_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("images"), b"not a directory").unwrap();
    let pipeline = pipeline(&dir);

    let err = pipeline
        .ingest(encode(&gradient(50, 50), ImageFormat::Png))
        .await
        .unwrap_err();

    assert!(matches!(media_kind(&err), MediaErrorKind::DirectoryCreation(_)));
    assert!(err.as_media().unwrap().is_io());
}

#[tokio::test]
async fn test_quality_is_clamped() {
    let pipeline = WebpVariantPipeline::new("out", "p").with_quality(250.0);
    assert_eq!(pipeline.quality(), 100.0);
}

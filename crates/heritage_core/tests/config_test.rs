use heritage_core::HeritageConfig;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn bundled_defaults_parse() {
    let config = HeritageConfig::bundled().unwrap();
    assert_eq!(config.store().data_dir().to_str(), Some("data"));
    assert_eq!(config.media().public_prefix(), "public/images");
    assert_eq!(*config.media().quality(), 80.0);
    assert_eq!(*config.media().max_upload_bytes(), 10 * 1024 * 1024);
    assert!(config.public_base_url().is_none());
    assert!(config.validate().is_ok());
}

#[test]
fn explicit_file_overrides_defaults() {
    let mut file = NamedTempFile::with_suffix(".toml").unwrap();
    writeln!(
        file,
        r#"
public_base_url = "https://exhibit.example.org"

[media]
quality = 65.0
"#
    )
    .unwrap();

    let config = HeritageConfig::load_from(Some(file.path())).unwrap();
    assert_eq!(*config.media().quality(), 65.0);
    assert_eq!(config.media().public_prefix(), "public/images");
    assert_eq!(
        config.public_base_url().as_deref(),
        Some("https://exhibit.example.org")
    );
}

#[test]
fn missing_explicit_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = HeritageConfig::load_from(Some(&dir.path().join("absent.toml")));
    assert!(result.is_err());
}

#[test]
fn validate_rejects_out_of_range_quality() {
    let config = HeritageConfig::bundled().unwrap();
    let media = config.media().clone().with_quality(120.0_f32);
    let config = config.with_media(media);
    assert!(config.validate().is_err());
}


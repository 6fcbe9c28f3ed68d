//! Image command handlers.

use super::io::{print_json, read_input};
use heritage::{Catalogue, HeritageConfig, HeritageResult};
use std::path::Path;

/// Ingest a file and print its variant paths, plus public URLs when a base
/// URL is configured.
pub async fn handle_ingest(
    catalogue: &Catalogue,
    config: &HeritageConfig,
    file: &Path,
) -> HeritageResult<()> {
    let data = read_input(Some(file)).await?;
    let paths = catalogue.ingest_image(data).await?;

    match config.public_base_url() {
        Some(base) => print_json(&serde_json::json!({
            "paths": paths,
            "urls": paths.urls(base),
        })),
        None => print_json(&paths),
    }
}

/// Attach a file to a location and print the updated location.
pub async fn handle_attach_image(
    catalogue: &Catalogue,
    location: &str,
    file: &Path,
) -> HeritageResult<()> {
    let data = read_input(Some(file)).await?;
    print_json(&catalogue.attach_image(location, data).await?)
}

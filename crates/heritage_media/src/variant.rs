//! Variant sizes and the paths of a stored set.

use heritage_core::LocationImages;
use serde::{Deserialize, Serialize};

/// One fixed-width rendition of an upload.
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
pub enum Variant {
    /// Detail view
    #[display("full")]
    Full,
    /// Listing card
    #[display("card")]
    Card,
    /// Thumbnail
    #[display("thumb")]
    Thumb,
}

impl Variant {
    /// Target width in pixels.
    pub fn width(&self) -> u32 {
        match self {
            Variant::Full => 2000,
            Variant::Card => 1024,
            Variant::Thumb => 320,
        }
    }

    /// File name for this variant of upload `id`.
    ///
    /// ```
    /// use heritage_media::Variant;
    ///
    /// assert_eq!(Variant::Card.file_name("abc"), "abc-card.webp");
    /// ```
    pub fn file_name(&self, id: &str) -> String {
        format!("{}-{}.webp", id, self)
    }
}

/// Storage-relative paths of one ingested upload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VariantPaths {
    /// Identifier shared by all three files
    pub id: String,
    /// Path of the 2000px variant
    pub full: String,
    /// Path of the 1024px variant
    pub card: String,
    /// Path of the 320px variant
    pub thumb: String,
}

impl VariantPaths {
    /// Paths for upload `id` under `prefix`.
    pub fn new(prefix: &str, id: impl Into<String>) -> Self {
        let id = id.into();
        let prefix = prefix.trim_end_matches('/');
        let path = |variant: Variant| format!("{}/{}", prefix, variant.file_name(&id));
        Self {
            full: path(Variant::Full),
            card: path(Variant::Card),
            thumb: path(Variant::Thumb),
            id,
        }
    }

    /// Path of one variant.
    pub fn get(&self, variant: Variant) -> &str {
        match variant {
            Variant::Full => &self.full,
            Variant::Card => &self.card,
            Variant::Thumb => &self.thumb,
        }
    }

    /// `(variant, path)` pairs, largest first.
    pub fn iter(&self) -> impl Iterator<Item = (Variant, &str)> {
        [Variant::Full, Variant::Card, Variant::Thumb]
            .into_iter()
            .map(move |variant| (variant, self.get(variant)))
    }

    /// Public URLs built by prefixing `base`.
    pub fn urls(&self, base: &str) -> Self {
        let base = base.trim_end_matches('/');
        let url = |path: &str| format!("{}/{}", base, path.trim_start_matches('/'));
        Self {
            id: self.id.clone(),
            full: url(&self.full),
            card: url(&self.card),
            thumb: url(&self.thumb),
        }
    }
}

impl From<VariantPaths> for LocationImages {
    fn from(paths: VariantPaths) -> Self {
        LocationImages {
            full: Some(paths.full),
            card: Some(paths.card),
            thumb: Some(paths.thumb),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn widths_are_fixed() {
        let widths: Vec<_> = Variant::iter().map(|v| v.width()).collect();
        assert_eq!(widths, vec![2000, 1024, 320]);
    }

    #[test]
    fn paths_share_prefix_and_id() {
        let paths = VariantPaths::new("public/images/", "abc123");
        assert_eq!(paths.full, "public/images/abc123-full.webp");
        assert_eq!(paths.card, "public/images/abc123-card.webp");
        assert_eq!(paths.thumb, "public/images/abc123-thumb.webp");
    }

    #[test]
    fn urls_prefix_base() {
        let urls = VariantPaths::new("public/images", "x").urls("https://example.org/");
        assert_eq!(urls.thumb, "https://example.org/public/images/x-thumb.webp");
    }

    #[test]
    fn converts_into_location_images() {
        let images: LocationImages = VariantPaths::new("p", "x").into();
        assert_eq!(images.preferred(), Some("p/x-full.webp"));
    }
}

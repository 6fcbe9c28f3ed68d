//! Location records.

use crate::validate::{non_empty, within};
use crate::{Record, Validate};
use heritage_error::ValidationError;
use serde::{Deserialize, Serialize};

/// Paths to the stored variants of a location's image.
///
/// Paths are storage-relative; prefix a public base URL to serve them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocationImages {
    /// 2000px wide rendition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full: Option<String>,
    /// 1024px wide rendition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card: Option<String>,
    /// 320px wide rendition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumb: Option<String>,
}

impl LocationImages {
    /// The largest rendition available, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use heritage_core::LocationImages;
    ///
    /// let images = LocationImages {
    ///     card: Some("public/images/a-card.webp".to_string()),
    ///     ..Default::default()
    /// };
    /// assert_eq!(images.preferred(), Some("public/images/a-card.webp"));
    /// ```
    pub fn preferred(&self) -> Option<&str> {
        self.full
            .as_deref()
            .or(self.card.as_deref())
            .or(self.thumb.as_deref())
    }

    /// True when no rendition is set.
    pub fn is_empty(&self) -> bool {
        self.full.is_none() && self.card.is_none() && self.thumb.is_none()
    }
}

/// A point of interest in the exhibit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Caller-assigned primary key
    pub id: String,
    /// Display title
    pub title: String,
    /// URL slug
    pub slug: String,
    /// Long-form description
    pub description: String,
    /// Street address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Latitude in degrees
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    /// Longitude in degrees
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
    /// Stored image variants
    #[serde(default)]
    pub images: LocationImages,
    /// Storage-relative path to an audio guide
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,
    /// Ordered references to book ids; dangling references are tolerated
    #[serde(default)]
    pub books: Vec<String>,
}

impl Location {
    /// Create a location with the required fields and nothing else.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        slug: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            slug: slug.into(),
            description: description.into(),
            address: None,
            lat: None,
            lng: None,
            images: LocationImages::default(),
            audio: None,
            books: Vec::new(),
        }
    }
}

impl Record for Location {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Validate for Location {
    fn validate(&self) -> Result<(), ValidationError> {
        non_empty("id", &self.id)?;
        non_empty("title", &self.title)?;
        non_empty("slug", &self.slug)?;
        non_empty("description", &self.description)?;
        validate_coordinates(self.lat, self.lng)?;
        validate_book_refs(&self.books)
    }
}

/// Partial update for a [`Location`]. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationPatch {
    /// New title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New slug
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    /// New description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// New latitude
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    /// New longitude
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
    /// Replacement image set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<LocationImages>,
    /// New audio path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,
    /// Replacement book references
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub books: Option<Vec<String>>,
}

impl LocationPatch {
    /// A patch that only replaces the image set.
    pub fn images(images: LocationImages) -> Self {
        Self {
            images: Some(images),
            ..Default::default()
        }
    }
}

impl Validate for LocationPatch {
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(title) = &self.title {
            non_empty("title", title)?;
        }
        if let Some(slug) = &self.slug {
            non_empty("slug", slug)?;
        }
        if let Some(description) = &self.description {
            non_empty("description", description)?;
        }
        validate_coordinates(self.lat, self.lng)?;
        if let Some(books) = &self.books {
            validate_book_refs(books)?;
        }
        Ok(())
    }
}

fn validate_coordinates(lat: Option<f64>, lng: Option<f64>) -> Result<(), ValidationError> {
    if let Some(lat) = lat {
        within("lat", lat, 90.0)?;
    }
    if let Some(lng) = lng {
        within("lng", lng, 180.0)?;
    }
    Ok(())
}

fn validate_book_refs(books: &[String]) -> Result<(), ValidationError> {
    for (i, book) in books.iter().enumerate() {
        if book.trim().is_empty() {
            return Err(ValidationError::new(
                format!("books[{i}]"),
                "book reference must not be empty",
            ));
        }
    }
    Ok(())
}

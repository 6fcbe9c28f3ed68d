//! Book records.

use crate::validate::{http_url, non_empty};
use crate::{Record, Validate};
use heritage_error::ValidationError;
use serde::{Deserialize, Serialize};

/// A recommended book, referenced from locations by id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Book {
    /// Caller-assigned primary key
    pub id: String,
    /// Book title
    pub title: String,
    /// Author name(s)
    pub author: String,
    /// Short blurb
    pub description: String,
    /// Where to buy or borrow the book
    pub link: String,
    /// Cover image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
    /// ISBN, unchecked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
}

impl Record for Book {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Validate for Book {
    fn validate(&self) -> Result<(), ValidationError> {
        non_empty("id", &self.id)?;
        non_empty("title", &self.title)?;
        non_empty("author", &self.author)?;
        non_empty("description", &self.description)?;
        http_url("link", &self.link)?;
        if let Some(cover) = &self.cover {
            http_url("cover", cover)?;
        }
        Ok(())
    }
}

/// Partial update for a [`Book`]. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookPatch {
    /// New title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New author
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// New description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New link
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// New cover URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
    /// New ISBN
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
}

impl Validate for BookPatch {
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(title) = &self.title {
            non_empty("title", title)?;
        }
        if let Some(author) = &self.author {
            non_empty("author", author)?;
        }
        if let Some(description) = &self.description {
            non_empty("description", description)?;
        }
        if let Some(link) = &self.link {
            http_url("link", link)?;
        }
        if let Some(cover) = &self.cover {
            http_url("cover", cover)?;
        }
        Ok(())
    }
}

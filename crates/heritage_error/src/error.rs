//! Top-level error wrapper types.

use crate::{CliError, ConfigError, MediaError, StoreError, ValidationError};

/// Every error the heritage crates can produce.
///
/// # Examples
///
/// ```
/// use heritage_error::{HeritageError, HeritageErrorKind, ValidationError};
///
/// let err: HeritageError = ValidationError::new("title", "must not be empty").into();
/// assert!(matches!(err.kind(), HeritageErrorKind::Validation(_)));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum HeritageErrorKind {
    /// Document store error
    #[from(StoreError)]
    Store(StoreError),
    /// Media ingestion error
    #[from(MediaError)]
    Media(MediaError),
    /// Record failed boundary validation
    #[from(ValidationError)]
    Validation(ValidationError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Command-line input or output error
    #[from(CliError)]
    Cli(CliError),
}

/// Heritage error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Heritage Error: {}", _0)]
pub struct HeritageError(Box<HeritageErrorKind>);

impl HeritageError {
    /// Create a new error from a kind.
    pub fn new(kind: HeritageErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &HeritageErrorKind {
        &self.0
    }

    /// The store error, if this is one.
    pub fn as_store(&self) -> Option<&StoreError> {
        match self.kind() {
            HeritageErrorKind::Store(e) => Some(e),
            _ => None,
        }
    }

    /// The media error, if this is one.
    pub fn as_media(&self) -> Option<&MediaError> {
        match self.kind() {
            HeritageErrorKind::Media(e) => Some(e),
            _ => None,
        }
    }
}

// Generic From implementation for any type that converts to HeritageErrorKind
impl<T> From<T> for HeritageError
where
    T: Into<HeritageErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for heritage operations.
pub type HeritageResult<T> = std::result::Result<T, HeritageError>;

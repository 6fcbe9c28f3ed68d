//! Media ingestion error types.

/// Kinds of media ingestion errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum MediaErrorKind {
    /// Sniffed content type is not JPEG, PNG or WEBP
    #[display("Unsupported media type: {}", _0)]
    UnsupportedType(String),
    /// Bytes claim an allowed type but do not decode
    #[display("Failed to decode image: {}", _0)]
    Decode(String),
    /// Re-encoding a variant failed
    #[display("Failed to encode image: {}", _0)]
    Encode(String),
    /// Output directory could not be created
    #[display("Failed to create media directory: {}", _0)]
    DirectoryCreation(String),
    /// Variant file could not be written
    #[display("Failed to write media file: {}", _0)]
    FileWrite(String),
    /// Upload exceeds the configured size cap
    #[display("Upload too large: {} bytes (limit {})", size, limit)]
    TooLarge {
        /// Upload size in bytes
        size: usize,
        /// Configured limit in bytes
        limit: usize,
    },
}

/// Media error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Media Error: {} at line {} in {}", kind, line, file)]
pub struct MediaError {
    /// The kind of error that occurred
    pub kind: MediaErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl MediaError {
    /// Create a new media error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: MediaErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &MediaErrorKind {
        &self.kind
    }

    /// True for filesystem failures.
    pub fn is_io(&self) -> bool {
        matches!(
            self.kind,
            MediaErrorKind::DirectoryCreation(_) | MediaErrorKind::FileWrite(_)
        )
    }
}

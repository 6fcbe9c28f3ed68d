//! Document store error types.

/// Kinds of document store errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StoreErrorKind {
    /// Backing file is missing or unreadable
    #[display("Failed to read collection: {}", _0)]
    FileRead(String),
    /// Temp file write or rename failed
    #[display("Failed to write collection: {}", _0)]
    FileWrite(String),
    /// Data directory could not be created
    #[display("Failed to create data directory: {}", _0)]
    DirectoryCreation(String),
    /// Persisted content is not a valid record sequence
    #[display("Malformed collection: {}", _0)]
    Format(String),
    /// Insert with an id that is already present
    #[display("Record '{}' already exists in '{}'", id, collection)]
    Conflict {
        /// Collection name
        collection: String,
        /// Duplicate record id
        id: String,
    },
    /// Update or delete of an unknown id
    #[display("Record '{}' not found in '{}'", id, collection)]
    NotFound {
        /// Collection name
        collection: String,
        /// Missing record id
        id: String,
    },
    /// Collection name is not a plain file stem
    #[display("Invalid collection name: {}", _0)]
    InvalidCollection(String),
}

/// Document store error with location tracking.
///
/// # Examples
///
/// ```
/// use heritage_error::{StoreError, StoreErrorKind};
///
/// let err = StoreError::new(StoreErrorKind::FileRead("data/books.json".to_string()));
/// assert!(err.is_io());
/// assert!(format!("{}", err).contains("books.json"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Store Error: {} at line {} in {}", kind, line, file)]
pub struct StoreError {
    /// The kind of error that occurred
    pub kind: StoreErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StoreError {
    /// Create a new store error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StoreErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &StoreErrorKind {
        &self.kind
    }

    /// True for filesystem failures (read, write, rename, mkdir).
    pub fn is_io(&self) -> bool {
        matches!(
            self.kind,
            StoreErrorKind::FileRead(_)
                | StoreErrorKind::FileWrite(_)
                | StoreErrorKind::DirectoryCreation(_)
        )
    }
}

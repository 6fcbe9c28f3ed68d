//! Command-line input and output errors.

/// Kinds of command-line errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum CliErrorKind {
    /// Payload file or stdin could not be read
    #[display("Failed to read input: {}", _0)]
    Input(String),
    /// Result could not be rendered to stdout
    #[display("Failed to write output: {}", _0)]
    Output(String),
}

/// Command-line error with source location.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("CLI Error: {} at line {} in {}", kind, line, file)]
pub struct CliError {
    /// Error kind
    pub kind: CliErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl CliError {
    /// Create a new CliError with the given kind at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use heritage_error::{CliError, CliErrorKind};
    ///
    /// let err = CliError::new(CliErrorKind::Input("payload.json: not found".to_string()));
    /// assert!(err.to_string().contains("payload.json"));
    /// ```
    #[track_caller]
    pub fn new(kind: CliErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &CliErrorKind {
        &self.kind
    }
}

//! Error types for the heritage catalogue backend.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use heritage_error::{HeritageResult, StoreError, StoreErrorKind};
//!
//! fn find_book(id: &str) -> HeritageResult<String> {
//!     Err(StoreError::new(StoreErrorKind::NotFound {
//!         collection: "books".to_string(),
//!         id: id.to_string(),
//!     }))?
//! }
//!
//! match find_book("missing") {
//!     Ok(book) => println!("Got: {}", book),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod cli;
mod config;
mod error;
mod media;
mod store;
mod validation;

pub use cli::{CliError, CliErrorKind};
pub use config::ConfigError;
pub use error::{HeritageError, HeritageErrorKind, HeritageResult};
pub use media::{MediaError, MediaErrorKind};
pub use store::{StoreError, StoreErrorKind};
pub use validation::ValidationError;

//! Core data types for the heritage catalogue backend.
//!
//! Records are loosely shaped JSON objects that share one convention: a
//! string `id` that is unique within its collection. The [`Record`] trait
//! captures that convention; [`Location`] and [`Book`] are the typed views
//! layered over it, validated at the boundary with [`Validate`] before they
//! ever reach the store.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod book;
mod config;
mod location;
mod record;
mod validate;

pub use book::{Book, BookPatch};
pub use config::{HeritageConfig, LogConfig, MediaConfig, StoreConfig};
pub use location::{Location, LocationImages, LocationPatch};
pub use record::{BOOKS, LOCATIONS, Record};
pub use validate::Validate;

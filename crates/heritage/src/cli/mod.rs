//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the heritage binary.

mod commands;
mod io;
mod media;
mod records;

pub use commands::{BookCommands, Cli, Commands, LocationCommands};
pub use media::{handle_attach_image, handle_ingest};
pub use records::{handle_book_command, handle_init, handle_location_command};

//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Heritage - catalogue administration for a heritage-site exhibit
#[derive(Parser, Debug)]
#[command(name = "heritage")]
#[command(about = "Manage exhibit locations, books and images", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file layered over the defaults
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create empty collection files if missing
    Init,

    /// Location management
    #[command(subcommand)]
    Locations(LocationCommands),

    /// Book management
    #[command(subcommand)]
    Books(BookCommands),

    /// Transcode an image into variants without attaching it
    Ingest {
        /// Image file (JPEG, PNG or WEBP)
        file: PathBuf,
    },

    /// Transcode an image and make it a location's image set
    AttachImage {
        /// Location id
        location: String,

        /// Image file (JPEG, PNG or WEBP)
        file: PathBuf,
    },
}

/// Location subcommands
#[derive(Subcommand, Debug)]
pub enum LocationCommands {
    /// List all locations
    List,

    /// Show one location
    Show {
        /// Location id
        id: String,
    },

    /// Add a location from a JSON document
    Add {
        /// JSON file; stdin when omitted
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Merge a JSON patch into a location
    Update {
        /// Location id
        id: String,

        /// JSON file; stdin when omitted
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Delete a location
    Delete {
        /// Location id
        id: String,
    },

    /// Resolve the books a location references
    Books {
        /// Location id
        id: String,
    },
}

/// Book subcommands
#[derive(Subcommand, Debug)]
pub enum BookCommands {
    /// List all books
    List,

    /// Show one book
    Show {
        /// Book id
        id: String,
    },

    /// Add a book from a JSON document
    Add {
        /// JSON file; stdin when omitted
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Merge a JSON patch into a book
    Update {
        /// Book id
        id: String,

        /// JSON file; stdin when omitted
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Delete a book
    Delete {
        /// Book id
        id: String,
    },
}

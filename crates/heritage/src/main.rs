//! Heritage CLI binary.
//!
//! Administers the exhibit catalogue from the command line:
//! - Initialize and edit the location and book collections
//! - Transcode uploads into WEBP variants
//! - Attach images to locations

use clap::Parser;
use heritage::{Catalogue, HeritageConfig, observability};

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{
        Cli, Commands, handle_attach_image, handle_book_command, handle_ingest, handle_init,
        handle_location_command,
    };

    let cli = Cli::parse();

    let config = HeritageConfig::load_from(cli.config.as_deref())?;
    observability::init_tracing(config.log(), cli.verbose)?;

    let catalogue = Catalogue::from_config(&config)?;

    match cli.command {
        Commands::Init => handle_init(&catalogue).await?,
        Commands::Locations(cmd) => handle_location_command(&catalogue, cmd).await?,
        Commands::Books(cmd) => handle_book_command(&catalogue, cmd).await?,
        Commands::Ingest { file } => handle_ingest(&catalogue, &config, &file).await?,
        Commands::AttachImage { location, file } => {
            handle_attach_image(&catalogue, &location, &file).await?
        }
    }

    Ok(())
}

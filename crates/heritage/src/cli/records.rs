//! Location and book command handlers.

use super::commands::{BookCommands, LocationCommands};
use super::io::{print_json, read_json};
use heritage::{Book, BookPatch, Catalogue, HeritageResult, Location, LocationPatch};

/// Create missing collection files.
pub async fn handle_init(catalogue: &Catalogue) -> HeritageResult<()> {
    let created = catalogue.initialize().await?;
    println!("Created {} collection file(s)", created);
    Ok(())
}

/// Handle location subcommands.
pub async fn handle_location_command(
    catalogue: &Catalogue,
    cmd: LocationCommands,
) -> HeritageResult<()> {
    match cmd {
        LocationCommands::List => print_json(&catalogue.locations().await?),
        LocationCommands::Show { id } => print_json(&catalogue.location(&id).await?),
        LocationCommands::Add { file } => {
            let location: Location = read_json(file.as_deref()).await?;
            print_json(&catalogue.create_location(location).await?)
        }
        LocationCommands::Update { id, file } => {
            let patch: LocationPatch = read_json(file.as_deref()).await?;
            print_json(&catalogue.update_location(&id, &patch).await?)
        }
        LocationCommands::Delete { id } => print_json(&catalogue.delete_location(&id).await?),
        LocationCommands::Books { id } => print_json(&catalogue.books_for_location(&id).await?),
    }
}

/// Handle book subcommands.
pub async fn handle_book_command(catalogue: &Catalogue, cmd: BookCommands) -> HeritageResult<()> {
    match cmd {
        BookCommands::List => print_json(&catalogue.books().await?),
        BookCommands::Show { id } => print_json(&catalogue.book(&id).await?),
        BookCommands::Add { file } => {
            let book: Book = read_json(file.as_deref()).await?;
            print_json(&catalogue.create_book(book).await?)
        }
        BookCommands::Update { id, file } => {
            let patch: BookPatch = read_json(file.as_deref()).await?;
            print_json(&catalogue.update_book(&id, &patch).await?)
        }
        BookCommands::Delete { id } => print_json(&catalogue.delete_book(&id).await?),
    }
}

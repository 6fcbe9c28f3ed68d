//! Payload input and JSON output.

use heritage::{CliError, CliErrorKind, HeritageResult, ValidationError};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use tokio::io::AsyncReadExt;

/// Read a whole file, or stdin when `path` is `None`.
pub async fn read_input(path: Option<&Path>) -> HeritageResult<Vec<u8>> {
    match path {
        Some(path) => {
            let bytes = tokio::fs::read(path).await.map_err(|e| {
                CliError::new(CliErrorKind::Input(format!("{}: {}", path.display(), e)))
            })?;
            Ok(bytes)
        }
        None => {
            let mut buffer = Vec::new();
            tokio::io::stdin()
                .read_to_end(&mut buffer)
                .await
                .map_err(|e| CliError::new(CliErrorKind::Input(format!("stdin: {}", e))))?;
            Ok(buffer)
        }
    }
}

/// Read and parse a JSON payload.
pub async fn read_json<T: DeserializeOwned>(path: Option<&Path>) -> HeritageResult<T> {
    let bytes = read_input(path).await?;
    let payload = serde_json::from_slice(&bytes)
        .map_err(|e| ValidationError::new("payload", e.to_string()))?;
    Ok(payload)
}

/// Render a value as pretty JSON.
pub fn render_json<T: Serialize + ?Sized>(value: &T) -> HeritageResult<String> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::new(CliErrorKind::Output(e.to_string())))?;
    Ok(json)
}

/// Print a value as pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> HeritageResult<()> {
    println!("{}", render_json(value)?);
    Ok(())
}

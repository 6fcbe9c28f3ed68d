//! Write-to-temp-then-rename persistence.
//!
//! The rename is the only operation that touches the destination path, so a
//! reader sees either the old file or the new one, never a mix. A crash
//! between staging and commit leaves an orphaned temp file and an untouched
//! target.

use heritage_error::{StoreError, StoreErrorKind};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::io::AsyncWriteExt;

static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Sibling temp path: `<file>.<unix-millis>-<pid>-<seq>.tmp`.
fn temp_path_for(target: &Path) -> PathBuf {
    let file_name = target
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "collection".to_string());
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);

    target.with_file_name(format!(
        "{}.{}-{}-{}.tmp",
        file_name,
        millis,
        std::process::id(),
        seq
    ))
}

async fn write_and_sync(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut file = tokio::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await?;
    file.write_all(contents).await?;
    file.sync_all().await
}

async fn discard(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        tracing::warn!(path = %path.display(), error = %e, "Failed to remove temp file");
    }
}

/// New content written next to its target, not yet visible there.
///
/// Dropping a `StagedWrite` without calling [`commit`](Self::commit) leaves
/// the temp file behind and the target unchanged, exactly what a crash at
/// that point would do.
#[derive(Debug)]
#[must_use = "staged content is invisible until committed"]
pub struct StagedWrite {
    temp_path: PathBuf,
    target: PathBuf,
}

impl StagedWrite {
    /// Write `contents` to a fresh temp file beside `target` and fsync it.
    #[tracing::instrument(skip(target, contents), fields(path = %target.as_ref().display(), size = contents.len()))]
    pub async fn stage(target: impl AsRef<Path>, contents: &[u8]) -> Result<Self, StoreError> {
        let target = target.as_ref().to_path_buf();
        let temp_path = temp_path_for(&target);

        if let Err(e) = write_and_sync(&temp_path, contents).await {
            discard(&temp_path).await;
            return Err(StoreError::new(StoreErrorKind::FileWrite(format!(
                "{}: {}",
                temp_path.display(),
                e
            ))));
        }

        tracing::debug!(temp = %temp_path.display(), "Staged write");
        Ok(Self { temp_path, target })
    }

    /// Where the staged content currently lives.
    pub fn temp_path(&self) -> &Path {
        &self.temp_path
    }

    /// Where the content will appear on commit.
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Atomically rename the temp file over the target.
    #[tracing::instrument(skip(self), fields(path = %self.target.display()))]
    pub async fn commit(self) -> Result<(), StoreError> {
        if let Err(e) = tokio::fs::rename(&self.temp_path, &self.target).await {
            discard(&self.temp_path).await;
            return Err(StoreError::new(StoreErrorKind::FileWrite(format!(
                "rename {} to {}: {}",
                self.temp_path.display(),
                self.target.display(),
                e
            ))));
        }
        Ok(())
    }
}

/// Replace `target` with `contents` in one atomic step.
pub async fn write_atomic(target: impl AsRef<Path>, contents: &[u8]) -> Result<(), StoreError> {
    StagedWrite::stage(target, contents).await?.commit().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_paths_are_unique_siblings() {
        let target = Path::new("/data/books.json");
        let a = temp_path_for(target);
        let b = temp_path_for(target);

        assert_ne!(a, b);
        assert_eq!(a.parent(), target.parent());
        let name = a.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("books.json."));
        assert!(name.ends_with(".tmp"));
        assert!(name.contains(&std::process::id().to_string()));
    }
}

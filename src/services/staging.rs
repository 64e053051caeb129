use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

/// Extension given to every staged upload.
pub const STAGED_EXTENSION: &str = "pdf";

/// An upload written to the scratch directory for the parser to read.
///
/// The file is named `<uuid>.pdf`, so concurrent requests sharing a scratch
/// directory never touch each other's entries. Call [`StagedFile::remove`]
/// once the parser is done; if the guard is dropped first (panic, cancelled
/// request future) the file is removed synchronously in `Drop`.
#[derive(Debug)]
pub struct StagedFile {
    path: PathBuf,
    armed: bool,
}

impl StagedFile {
    /// Writes `bytes` to a fresh `<uuid>.pdf` under `dir`.
    ///
    /// The write is flushed and synced before returning, so the parser always
    /// sees the complete upload.
    pub async fn create(dir: &Path, bytes: &[u8]) -> std::io::Result<Self> {
        tokio::fs::create_dir_all(dir).await?;

        let path = dir.join(format!("{}.{}", Uuid::new_v4(), STAGED_EXTENSION));
        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await?;

        // From here on the entry exists and must be cleaned up, even if the
        // write below fails.
        let staged = Self { path, armed: true };

        file.write_all(bytes).await?;
        file.flush().await?;
        file.sync_all().await?;

        tracing::debug!("Staged {} bytes at {}", bytes.len(), staged.path.display());
        Ok(staged)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Deletes the staged file.
    pub async fn remove(mut self) -> std::io::Result<()> {
        self.armed = false;
        tokio::fs::remove_file(&self.path).await
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!("Removed abandoned staged file {}", self.path.display());
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(
                    "Failed to remove abandoned staged file {}: {}",
                    self.path.display(),
                    e
                );
            }
        }
    }
}

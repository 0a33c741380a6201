use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to create {}:\n{source}", .path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("failed to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// A partial artifact or temporary file could not be removed.
///
/// Never reported on its own when another error caused the cleanup; it is
/// appended to that error instead.
#[derive(Debug, thiserror::Error)]
#[error("Failed to remove {}:\n{source}", .path.display())]
pub struct CleanupError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

pub type Result<T> = std::result::Result<T, Error>;

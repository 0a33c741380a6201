use crate::error::CleanupError;
use std::io;
use std::path::Path;

/// Remove a file, treating "already absent" as success.
pub fn remove_if_present(path: impl AsRef<Path>) -> Result<(), CleanupError> {
    let path = path.as_ref();
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(CleanupError {
            path: path.to_path_buf(),
            source,
        }),
    }
}

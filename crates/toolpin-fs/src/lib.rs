//! Filesystem primitives shared by the extractor and the install pipeline.
//!
//! - [`remove_if_present`] - idempotent, best-effort artifact removal
//! - [`create_executable`] - destination files opened with executable bits
//! - [`ensure_dir`] - directory creation with the failing path attached

mod error;
mod permissions;
mod remove;

pub use error::{CleanupError, Error, Result};
pub use permissions::{EXECUTABLE_MODE, create_executable, executable_options, is_executable};
pub use remove::remove_if_present;

use std::path::Path;

/// Create `path` and all of its parents.
pub fn ensure_dir(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    std::fs::create_dir_all(path).map_err(|source| Error::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}

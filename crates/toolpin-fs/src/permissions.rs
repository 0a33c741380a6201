use crate::error::{Error, Result};
use std::fs::{File, OpenOptions};
use std::path::Path;

/// `rwxr-xr-x`
pub const EXECUTABLE_MODE: u32 = 0o755;

/// Options that create (or truncate) a file for writing with executable
/// permission bits. Async callers convert them into their runtime's options.
pub fn executable_options() -> OpenOptions {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(EXECUTABLE_MODE);
    }
    options
}

/// Create (or truncate) `path` for writing with executable permission bits.
pub fn create_executable(path: impl AsRef<Path>) -> Result<File> {
    let path = path.as_ref();
    executable_options().open(path).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Whether `path` is a regular file the current platform would execute.
pub fn is_executable(path: impl AsRef<Path>) -> bool {
    let Ok(metadata) = std::fs::metadata(path) else {
        return false;
    };
    if !metadata.is_file() {
        return false;
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        metadata.permissions().mode() & 0o111 != 0
    }
    #[cfg(not(unix))]
    {
        true
    }
}

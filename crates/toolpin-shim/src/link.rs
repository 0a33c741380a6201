use crate::Linker;
use crate::error::{Error, Result};
use std::io;
use std::path::{Path, PathBuf};
use toolpin_platform::Platform;
use toolpin_resource::Tool;

/// Links tools into `bin_dir` the way `platform` runs them.
#[derive(Debug, Clone)]
pub struct ShimLinker {
    bin_dir: PathBuf,
    platform: Platform,
}

impl ShimLinker {
    pub fn new(bin_dir: impl Into<PathBuf>, platform: Platform) -> Self {
        Self {
            bin_dir: bin_dir.into(),
            platform,
        }
    }

    /// `<bin_dir>/<name>`, or `<bin_dir>/<name>.cmd` on Windows.
    pub fn link_path(&self, name: &str) -> PathBuf {
        if self.platform.is_windows() {
            self.bin_dir.join(format!("{name}.cmd"))
        } else {
            self.bin_dir.join(name)
        }
    }

    fn points_to(&self, link: &Path, target: &Path) -> io::Result<bool> {
        let found = if self.platform.is_windows() {
            std::fs::read_to_string(link).map(|content| content == cmd_wrapper(target))
        } else {
            std::fs::read_link(link).map(|current| current == target)
        };
        match found {
            Ok(matches) => Ok(matches),
            Err(e) if matches!(e.kind(), io::ErrorKind::NotFound | io::ErrorKind::InvalidInput) => {
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    fn create(&self, link: &Path, target: &Path) -> io::Result<()> {
        match std::fs::remove_file(link) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }
        if self.platform.is_windows() {
            std::fs::write(link, cmd_wrapper(target))
        } else {
            symlink(target, link)
        }
    }
}

impl Linker for ShimLinker {
    fn link(&self, tool: &Tool) -> Result<Option<String>> {
        let link = self.link_path(&tool.name);
        let to_error = |source: io::Error| Error::Link {
            link: link.clone(),
            source,
        };
        if self.points_to(&link, &tool.location).map_err(to_error)? {
            return Ok(None);
        }
        self.create(&link, &tool.location).map_err(to_error)?;
        tracing::debug!(link = %link.display(), target = %tool.location.display(), "linked");
        Ok(Some(format!(
            "{} {} link created: {} -> {}",
            tool.name,
            tool.version,
            link.display(),
            tool.location.display()
        )))
    }

    fn unlink(&self, tool: &Tool) -> Result<Option<String>> {
        let link = self.link_path(&tool.name);
        let to_error = |source: io::Error| Error::Unlink {
            link: link.clone(),
            source,
        };
        if !self.points_to(&link, &tool.location).map_err(to_error)? {
            return Ok(None);
        }
        match std::fs::remove_file(&link) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(to_error(e)),
        }
        Ok(Some(format!(
            "{} {} link removed: {}",
            tool.name,
            tool.version,
            link.display()
        )))
    }
}

/// Batch file forwarding every argument to `target`.
fn cmd_wrapper(target: &Path) -> String {
    format!("@\"{}\" %*\r\n", target.display())
}

#[cfg(unix)]
fn symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(not(unix))]
fn symlink(_target: &Path, _link: &Path) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "symlinks are only created on Unix",
    ))
}

//! Exposing installed tools to a project.
//!
//! Linking is a mechanism, not policy: the [`Linker`] trait is the only
//! contract the install session relies on. [`ShimLinker`] puts a symlink
//! (Unix) or a `.cmd` wrapper (Windows) into a bin directory.

pub use error::{Error, Result};
pub use link::ShimLinker;

mod error;
mod link;

use toolpin_resource::Tool;

pub trait Linker {
    /// Make `tool` runnable by name. Returns a message when something changed.
    fn link(&self, tool: &Tool) -> Result<Option<String>>;

    /// Remove the link for `tool` if it points at that tool. Returns a
    /// message when something was removed.
    fn unlink(&self, tool: &Tool) -> Result<Option<String>>;
}

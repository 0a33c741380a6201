//! Streaming, format-aware extraction of downloaded tool assets.
//!
//! An [`Extractor`] receives the compressed bytes as they arrive and leaves
//! exactly one executable at its destination:
//!
//! - `raw` - gzip-compressed binary, decompressed in process
//! - `tar` - gzip-compressed tarball piped into `tar zxf -`
//! - `zip` - buffered to a temporary file, then handed to `tar`
//!
//! `tar` on Windows is the bundled BSD tar, which reads zip files.

mod error;
mod extractor;
mod tar_process;

pub use error::{Error, Result};
pub use extractor::Extractor;

//! Subprocess and network I/O.

mod download;
mod http;
mod process;

pub use download::{Download, Downloader};

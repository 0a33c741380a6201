//! Streaming downloads through an ordered chain of fetch strategies.
//!
//! # Architecture
//!
//! This crate follows the three-layer pattern:
//! - [`data`] - Immutable configuration
//! - [`core`] - Pure transformations (progress recovery, redirect resolution)
//! - [`effects`] - Subprocesses and HTTP
//!
//! A [`Downloader`] tries `curl`, then `wget`, then an in-process HTTP client.
//! Only a program that cannot be found moves the chain along; any other
//! failure is reported as is.
//!
//! ```no_run
//! # async fn run() -> Result<(), toolpin_fetch::FetchError> {
//! use toolpin_fetch::{Downloader, FetchOptions};
//! use toolpin_platform::Env;
//!
//! let downloader = Downloader::new(Env::from_process(), FetchOptions::default())?;
//! let mut download = downloader.open("https://example.com/tool.tar.gz").await?;
//! while let Some(chunk) = download.next_chunk(&mut |p| println!("{:.0}%", p * 100.0)).await? {
//!     println!("{} bytes", chunk.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod data;
mod effects;
mod error;

pub use data::{FetchOptions, Strategy};
pub use effects::{Download, Downloader};
pub use error::{FetchError, Result};

//! Installing pinned tools.
//!
//! # Architecture
//!
//! - [`pipeline`] - one tool: download, verify and extract in a single pass
//! - [`session`] - every tool of a project, concurrently, with live status lines
//! - [`status`] - the per-tool status board
//! - [`output`] - where status lines and reports are written
//!
//! A destination file only ever exists after its digest matched; every
//! failure path tears down the transfer and removes partial output.

pub mod output;
pub mod pipeline;
pub mod session;
pub mod status;

mod error;
mod executable;

pub use error::{Failure, GetError, InstallError, SessionError, ToolError};
pub use executable::get_executable;
pub use output::{MemoryOutput, Output, TermOutput};
pub use pipeline::{Stage, download_and_extract};
pub use session::{InstallSession, SessionReport};
pub use status::{Status, StatusBoard};

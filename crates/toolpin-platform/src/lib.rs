//! Platform, environment and subprocess helpers.
//!
//! Everything that touches the process environment goes through an explicit
//! [`Env`] snapshot so callers (and tests) decide what subprocesses see.

pub use command::{Command, exit_reason};
pub use env::{Env, SearchPath};
pub use error::{Error, Result};
pub use os::Platform;

pub mod command;
pub mod dir;
pub mod env;
mod error;
pub mod os;

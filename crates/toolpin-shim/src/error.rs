use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to create link {}:\n{source}", .link.display())]
    Link { link: PathBuf, source: io::Error },

    #[error("Failed to remove link {}:\n{source}", .link.display())]
    Unlink { link: PathBuf, source: io::Error },
}

pub type Result<T> = std::result::Result<T, Error>;

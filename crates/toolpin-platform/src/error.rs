use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unsupported operating system: {0}")]
    UnsupportedPlatform(String),

    #[error("could not determine the home directory; set TOOLPIN_HOME")]
    NoHome,

    #[error("search path entry contains a path separator: {0}")]
    JoinPaths(#[source] std::env::JoinPathsError),

    #[error("command not found: {cmd}")]
    CommandNotFound {
        cmd: String,
        #[source]
        source: std::io::Error,
    },

    #[error("command failed: {cmd}, source: {source}")]
    CommandFailed { cmd: String, source: std::io::Error },
}

impl Error {
    /// Whether this error means the program does not exist on the search path.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::CommandNotFound { .. })
    }
}

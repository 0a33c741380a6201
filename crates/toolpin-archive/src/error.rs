use std::io;
use std::path::PathBuf;
use toolpin_fs::CleanupError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("tar must be installed on your system and be in {search_path_var}:\n{source}")]
    ArchiverNotFound {
        search_path_var: &'static str,
        #[source]
        source: toolpin_platform::Error,
    },

    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: toolpin_platform::Error,
    },

    #[error("{program} exited with {reason}:\n{diagnostics}")]
    Exited {
        program: String,
        reason: String,
        diagnostics: String,
    },

    #[error(transparent)]
    Destination(#[from] toolpin_fs::Error),

    #[error("invalid destination: {}", .0.display())]
    InvalidDestination(PathBuf),

    #[error("failed to decompress into {}: {source}", .path.display())]
    Decompress { path: PathBuf, source: io::Error },

    #[error("failed to communicate with {program}: {source}")]
    Feed { program: String, source: io::Error },

    #[error("extractor is already finished")]
    Closed,

    #[error(transparent)]
    Cleanup(#[from] CleanupError),

    #[error("{error}\n\n{cleanup}")]
    WithCleanup {
        error: Box<Error>,
        cleanup: CleanupError,
    },
}

impl Error {
    /// Attach a failed cleanup without hiding the original error.
    pub fn with_cleanup(self, cleanup: Option<CleanupError>) -> Self {
        match cleanup {
            Some(cleanup) => Self::WithCleanup {
                error: Box::new(self),
                cleanup,
            },
            None => self,
        }
    }
}

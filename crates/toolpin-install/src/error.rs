use std::path::PathBuf;
use thiserror::Error;
use toolpin_fetch::FetchError;
use toolpin_fs::CleanupError;
use toolpin_resource::Tool;
use toolpin_verify::VerificationError;

/// Why a single tool could not be installed.
#[derive(Debug, Error)]
pub enum InstallError {
    #[error(transparent)]
    Download(#[from] FetchError),

    #[error(transparent)]
    Verification(#[from] VerificationError),

    #[error(transparent)]
    Extraction(#[from] toolpin_archive::Error),

    /// Removing partial output failed as well.
    #[error("{error}\n\n{cleanup}")]
    WithCleanup {
        error: Box<InstallError>,
        cleanup: CleanupError,
    },
}

impl InstallError {
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

#[derive(Debug, Error)]
#[error("{name} {version}: {source}")]
pub struct ToolError {
    pub name: String,
    pub version: String,
    pub url: String,
    pub destination: PathBuf,
    #[source]
    pub source: InstallError,
}

impl ToolError {
    pub fn new(tool: &Tool, source: InstallError) -> Self {
        Self {
            name: tool.name.clone(),
            version: tool.version.clone(),
            url: tool.asset.url.clone(),
            destination: tool.location.clone(),
            source,
        }
    }
}

/// One failed outcome of a session.
#[derive(Debug, Error)]
pub enum Failure {
    #[error(transparent)]
    Install(#[from] ToolError),

    #[error(transparent)]
    Link(#[from] toolpin_shim::Error),
}

#[derive(Debug, Error)]
pub enum SessionError {
    /// Nothing was downloaded.
    #[error(transparent)]
    CreateDir(#[from] toolpin_fs::Error),
}

#[derive(Debug, Error)]
pub enum GetError {
    #[error("Failed to download:\n< {url}\n> {}\n{source}", .destination.display())]
    Download {
        url: String,
        destination: PathBuf,
        #[source]
        source: InstallError,
    },

    #[error(transparent)]
    CreateDir(#[from] toolpin_fs::Error),

    #[error(transparent)]
    Inspect(#[from] toolpin_resource::Error),
}

use std::io;
use std::path::PathBuf;
use toolpin_platform::Platform;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read catalog {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("invalid catalog {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("unknown tool: {name} {version} (no asset for {platform})")]
    UnknownTool {
        name: String,
        version: String,
        platform: Platform,
    },

    #[error("expected a file but found something else: {}", .0.display())]
    NotAFile(PathBuf),

    #[error("failed to inspect {}: {source}", .path.display())]
    Inspect { path: PathBuf, source: io::Error },
}

use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, FetchError>;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("no download program could be started:\n{}", .tried.join("\n"))]
    Exhausted { tried: Vec<String> },

    #[error("{program} exited with {reason}:\n{diagnostics}")]
    Exited {
        program: String,
        reason: String,
        diagnostics: String,
    },

    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: toolpin_platform::Error,
    },

    #[error("failed to read output of {program}: {source}")]
    Stream {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("Got {status} without location header.")]
    MissingLocation { status: u16, url: String },

    #[error("Too many redirects (more than {max}).")]
    TooManyRedirects { max: usize },

    #[error("Unexpected status code: {status}")]
    UnexpectedStatus { status: u16 },

    #[error("invalid URL {url}: {message}")]
    InvalidUrl { url: String, message: String },

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

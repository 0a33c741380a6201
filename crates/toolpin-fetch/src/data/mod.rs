//! Immutable configuration for downloads.

mod options;

pub use options::{
    DEFAULT_MAX_REDIRECTS, FetchOptions, PROGRESS_UPDATES_PER_SECOND, Strategy,
};

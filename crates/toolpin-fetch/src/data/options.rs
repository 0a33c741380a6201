use std::fmt;
use std::time::Duration;

/// Upper bound on progress notifications from the in-process client.
pub const PROGRESS_UPDATES_PER_SECOND: u32 = 50;

/// Same as curl's default.
pub const DEFAULT_MAX_REDIRECTS: usize = 50;

/// One way of fetching a URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// `curl -#fL <url>`; progress is read from its progress bar.
    Curl,
    /// `wget -O - <url>`; no progress.
    Wget,
    /// In-process HTTP client with manual redirect handling.
    Native,
}

impl Strategy {
    pub fn name(self) -> &'static str {
        match self {
            Self::Curl => "curl",
            Self::Wget => "wget",
            Self::Native => "native",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Configuration for a [`Downloader`](crate::Downloader).
///
/// # Examples
///
/// ```
/// use toolpin_fetch::{FetchOptions, Strategy};
///
/// let options = FetchOptions::default()
///     .strategies([Strategy::Native])
///     .max_redirects(5);
/// assert_eq!(options.strategies, [Strategy::Native]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    /// Tried in order; a strategy whose program is missing hands over to the next.
    ///
    /// Default: curl, wget, native
    pub strategies: Vec<Strategy>,

    /// Redirect hops the in-process client follows before giving up.
    ///
    /// Default: 50
    pub max_redirects: usize,

    /// Minimum time between two progress notifications of the in-process client.
    ///
    /// Default: 20ms
    pub progress_interval: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            strategies: vec![Strategy::Curl, Strategy::Wget, Strategy::Native],
            max_redirects: DEFAULT_MAX_REDIRECTS,
            progress_interval: Duration::from_millis(1000 / u64::from(PROGRESS_UPDATES_PER_SECOND)),
        }
    }
}

impl FetchOptions {
    pub fn strategies(mut self, strategies: impl IntoIterator<Item = Strategy>) -> Self {
        self.strategies = strategies.into_iter().collect();
        self
    }

    pub fn max_redirects(mut self, max: usize) -> Self {
        self.max_redirects = max;
        self
    }

    pub fn progress_interval(mut self, interval: Duration) -> Self {
        self.progress_interval = interval;
        self
    }
}

use super::http::{HttpTransfer, build_client};
use super::process::{Attempt, ProcessTransfer};
use crate::core::ProgressFilter;
use crate::data::{FetchOptions, Strategy};
use crate::error::{FetchError, Result};
use bytes::Bytes;
use reqwest::Client;
use toolpin_platform::Env;

/// Opens downloads by walking the configured strategies in order.
#[derive(Debug, Clone)]
pub struct Downloader {
    env: Env,
    options: FetchOptions,
    client: Client,
}

impl Downloader {
    pub fn new(env: Env, options: FetchOptions) -> Result<Self> {
        Ok(Self {
            env,
            options,
            client: build_client()?,
        })
    }

    pub fn env(&self) -> &Env {
        &self.env
    }

    /// Start fetching `url` with the first strategy that can run.
    ///
    /// Falls through to the next strategy only when a program is missing.
    pub async fn open(&self, url: &str) -> Result<Download> {
        let mut tried = Vec::new();
        for &strategy in &self.options.strategies {
            match self.attempt(strategy, url).await {
                Attempt::Ready(transfer) => {
                    tracing::debug!(%strategy, url, "download started");
                    return Ok(Download::new(transfer));
                }
                Attempt::Unavailable(reason) => {
                    tracing::debug!(%strategy, %reason, "strategy unavailable, trying next");
                    tried.push(format!("{strategy}: {reason}"));
                }
                Attempt::Failed(error) => return Err(error),
            }
        }
        Err(FetchError::Exhausted { tried })
    }

    async fn attempt(&self, strategy: Strategy, url: &str) -> Attempt<Transfer> {
        match strategy {
            Strategy::Curl => ProcessTransfer::curl(url, &self.env).map(Transfer::Process),
            Strategy::Wget => ProcessTransfer::wget(url, &self.env).map(Transfer::Process),
            Strategy::Native => match HttpTransfer::open(
                &self.client,
                url,
                self.options.max_redirects,
                self.options.progress_interval,
            )
            .await
            {
                Ok(transfer) => Attempt::Ready(Transfer::Http(Box::new(transfer))),
                Err(error) => Attempt::Failed(error),
            },
        }
    }
}

impl<T> Attempt<T> {
    fn map<U>(self, f: impl FnOnce(T) -> U) -> Attempt<U> {
        match self {
            Self::Ready(t) => Attempt::Ready(f(t)),
            Self::Unavailable(reason) => Attempt::Unavailable(reason),
            Self::Failed(error) => Attempt::Failed(error),
        }
    }
}

#[derive(Debug)]
enum Transfer {
    Process(ProcessTransfer),
    Http(Box<HttpTransfer>),
    Closed,
}

/// A running download, pulled chunk by chunk.
///
/// `next_chunk` yields body chunks until exactly one terminal result:
/// `Ok(None)` on success or `Err` on failure. Later calls return `Ok(None)`.
#[derive(Debug)]
pub struct Download {
    transfer: Transfer,
    progress: ProgressFilter,
}

impl Download {
    fn new(transfer: Transfer) -> Self {
        Self {
            transfer,
            progress: ProgressFilter::new(),
        }
    }

    /// Next body chunk. `on_progress` receives strictly increasing fractions
    /// strictly between 0 and 1.
    pub async fn next_chunk(&mut self, on_progress: &mut dyn FnMut(f64)) -> Result<Option<Bytes>> {
        let progress = &mut self.progress;
        let mut report = |fraction: f64| progress.forward(fraction, on_progress);
        let result = match &mut self.transfer {
            Transfer::Process(transfer) => transfer.next(&mut report).await,
            Transfer::Http(transfer) => transfer.next(&mut report).await,
            Transfer::Closed => return Ok(None),
        };
        match result {
            Ok(Some(chunk)) => Ok(Some(chunk)),
            Ok(None) => {
                self.transfer = Transfer::Closed;
                Ok(None)
            }
            Err(error) => {
                self.cancel().await;
                Err(error)
            }
        }
    }

    /// Stop the active strategy. Idempotent.
    pub async fn cancel(&mut self) {
        match std::mem::replace(&mut self.transfer, Transfer::Closed) {
            Transfer::Process(mut transfer) => transfer.cancel().await,
            Transfer::Http(transfer) => drop(transfer),
            Transfer::Closed => {}
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.transfer, Transfer::Closed)
    }
}

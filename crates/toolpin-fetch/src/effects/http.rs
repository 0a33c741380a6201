use crate::core::{Throttle, is_redirect, next_hop};
use crate::error::{FetchError, Result};
use bytes::Bytes;
use reqwest::header::LOCATION;
use reqwest::{Client, Response, StatusCode, Url};
use std::time::{Duration, Instant};

/// Build the shared client; redirects are followed by hand so the hop cap
/// and the error for a missing `Location` stay under our control.
pub(crate) fn build_client() -> Result<Client> {
    Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .map_err(FetchError::Http)
}

/// An in-process HTTP GET past its redirects, streaming a 200 body.
#[derive(Debug)]
pub(crate) struct HttpTransfer {
    response: Response,
    received: u64,
    total: Option<u64>,
    throttle: Throttle,
}

impl HttpTransfer {
    pub(crate) async fn open(
        client: &Client,
        url: &str,
        max_redirects: usize,
        progress_interval: Duration,
    ) -> Result<Self> {
        let mut current = Url::parse(url).map_err(|e| FetchError::InvalidUrl {
            url: url.to_string(),
            message: e.to_string(),
        })?;
        let mut hops = 0;

        loop {
            let response = client.get(current.clone()).send().await?;
            let status = response.status();

            if is_redirect(status.as_u16()) {
                let location = response
                    .headers()
                    .get(LOCATION)
                    .and_then(|value| value.to_str().ok())
                    .ok_or_else(|| FetchError::MissingLocation {
                        status: status.as_u16(),
                        url: current.to_string(),
                    })?;
                let next = next_hop(&current, location, hops, max_redirects)?;
                tracing::debug!(from = %current, to = %next, hop = hops + 1, "following redirect");
                current = next;
                hops += 1;
                continue;
            }

            if status != StatusCode::OK {
                return Err(FetchError::UnexpectedStatus {
                    status: status.as_u16(),
                });
            }

            let total = response.content_length().filter(|&length| length > 0);
            return Ok(Self {
                response,
                received: 0,
                total,
                throttle: Throttle::new(progress_interval, Instant::now()),
            });
        }
    }

    pub(crate) async fn next(&mut self, report: &mut dyn FnMut(f64)) -> Result<Option<Bytes>> {
        let Some(chunk) = self.response.chunk().await? else {
            return Ok(None);
        };
        self.received += chunk.len() as u64;
        if let Some(total) = self.total
            && self.throttle.ready(Instant::now())
        {
            report(self.received as f64 / total as f64);
        }
        Ok(Some(chunk))
    }
}

//! Download, verify and extract one tool in a single pass.

use crate::error::InstallError;
use toolpin_archive::Extractor;
use toolpin_fetch::Downloader;
use toolpin_resource::Tool;
use toolpin_verify::{VerificationError, Verifier};

/// Where a pipeline is at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Stage {
    /// Fraction strictly between 0 and 1.
    Downloading(f64),
    Verifying,
    Extracting,
}

/// Hands every chunk to the verifier and the extractor.
struct Tee<'a> {
    verifier: Verifier,
    extractor: &'a mut Extractor,
}

impl<'a> Tee<'a> {
    /// The extractor write is awaited, so at most one chunk is in flight.
    async fn feed(&mut self, chunk: &[u8]) -> Result<(), toolpin_archive::Error> {
        self.verifier.update(chunk);
        self.extractor.write(chunk).await
    }

    /// The extractor is only handed back when the digest matched.
    fn verify(self) -> Result<&'a mut Extractor, VerificationError> {
        self.verifier.finish()?;
        Ok(self.extractor)
    }
}

/// Install `tool` at its location.
///
/// On failure the transfer is stopped, the extractor destroyed and partial
/// output removed; a failing removal is appended to the original error.
pub async fn download_and_extract(
    downloader: &Downloader,
    tool: &Tool,
    on_stage: &mut dyn FnMut(Stage),
) -> Result<(), InstallError> {
    let mut extractor =
        Extractor::start(tool.asset.format, &tool.location, downloader.env()).await?;
    match stream(downloader, tool, &mut extractor, on_stage).await {
        Ok(()) => Ok(()),
        Err(error) => Err(abort(&mut extractor, error).await),
    }
}

async fn stream(
    downloader: &Downloader,
    tool: &Tool,
    extractor: &mut Extractor,
    on_stage: &mut dyn FnMut(Stage),
) -> Result<(), InstallError> {
    let mut download = downloader.open(&tool.asset.url).await?;
    let mut tee = Tee {
        verifier: Verifier::new(&tool.asset.sha256),
        extractor,
    };

    while let Some(chunk) = download
        .next_chunk(&mut |fraction| on_stage(Stage::Downloading(fraction)))
        .await?
    {
        if let Err(error) = tee.feed(&chunk).await {
            download.cancel().await;
            return Err(error.into());
        }
    }

    on_stage(Stage::Verifying);
    let extractor = tee.verify()?;
    on_stage(Stage::Extracting);
    extractor.finish().await?;
    tracing::debug!(tool = %tool.name, version = %tool.version, "installed");
    Ok(())
}

async fn abort(extractor: &mut Extractor, error: InstallError) -> InstallError {
    tracing::debug!(destination = %extractor.destination().display(), %error, "aborting");
    let cleanup = extractor.destroy().await.err();
    error.with_cleanup(cleanup)
}

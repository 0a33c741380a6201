use crate::error::GetError;
use crate::pipeline::{Stage, download_and_extract};
use std::path::PathBuf;
use toolpin_fetch::Downloader;
use toolpin_fs::ensure_dir;
use toolpin_resource::Tool;

/// Path to the executable of `tool`, installing it first if needed.
///
/// `on_progress` sees 0 before and 1 after a download, and only increasing
/// fractions in between. Nothing is reported for a tool already installed.
pub async fn get_executable(
    downloader: &Downloader,
    tool: &Tool,
    on_progress: &mut dyn FnMut(f64),
) -> Result<PathBuf, GetError> {
    if tool.is_installed()? {
        return Ok(tool.location.clone());
    }
    ensure_dir(tool.parent_dir())?;

    on_progress(0.0);
    let mut last = 0.0;
    let result = download_and_extract(downloader, tool, &mut |stage| {
        if let Stage::Downloading(fraction) = stage
            && fraction > last
        {
            last = fraction;
            on_progress(fraction);
        }
    })
    .await;

    match result {
        Ok(()) => {
            on_progress(1.0);
            Ok(tool.location.clone())
        }
        Err(source) => Err(GetError::Download {
            url: tool.asset.url.clone(),
            destination: tool.location.clone(),
            source,
        }),
    }
}

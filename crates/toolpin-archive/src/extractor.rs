use crate::error::{Error, Result};
use crate::tar_process::TarProcess;
use flate2::write::GzDecoder;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use toolpin_fs::{CleanupError, executable_options, remove_if_present};
use toolpin_platform::Env;
use toolpin_resource::AssetFormat;

/// Writes one downloaded asset to its destination executable.
///
/// Feed it with [`write`](Self::write), then call [`finish`](Self::finish).
/// On any failure call [`destroy`](Self::destroy), which releases processes
/// and files and removes whatever was partially written.
///
/// Files are written through `tokio::fs`; decompression happens in memory
/// one chunk at a time.
pub struct Extractor {
    destination: PathBuf,
    env: Env,
    kind: Kind,
    finished: bool,
}

enum Kind {
    Raw {
        decoder: GzDecoder<Vec<u8>>,
        file: Option<File>,
    },
    Tar(TarProcess),
    Zip {
        temp: PathBuf,
        file: Option<File>,
        tar: Option<TarProcess>,
    },
}

impl fmt::Debug for Extractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            Kind::Raw { .. } => "raw",
            Kind::Tar(_) => "tar",
            Kind::Zip { .. } => "zip",
        };
        f.debug_struct("Extractor")
            .field("destination", &self.destination)
            .field("kind", &kind)
            .field("finished", &self.finished)
            .finish()
    }
}

impl Extractor {
    /// Prepare extraction into `destination`.
    ///
    /// For `tar` this already spawns the archiver, so a missing `tar` is
    /// reported before any byte is downloaded.
    pub async fn start(
        format: AssetFormat,
        destination: impl Into<PathBuf>,
        env: &Env,
    ) -> Result<Self> {
        let destination = destination.into();
        let kind = match format {
            AssetFormat::Raw => {
                let file = OpenOptions::from(executable_options())
                    .open(&destination)
                    .await
                    .map_err(|source| write_error(&destination, source))?;
                Kind::Raw {
                    decoder: GzDecoder::new(Vec::new()),
                    file: Some(file),
                }
            }
            AssetFormat::Tar => Kind::Tar(TarProcess::spawn(OsStr::new("-"), &destination, env)?),
            AssetFormat::Zip => {
                let temp = temp_path(&destination);
                let file = File::create(&temp)
                    .await
                    .map_err(|source| write_error(&temp, source))?;
                Kind::Zip {
                    temp,
                    file: Some(file),
                    tar: None,
                }
            }
        };
        tracing::debug!(%format, destination = %destination.display(), "extractor started");
        Ok(Self {
            destination,
            env: env.clone(),
            kind,
            finished: false,
        })
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    pub async fn write(&mut self, chunk: &[u8]) -> Result<()> {
        match &mut self.kind {
            Kind::Raw { decoder, file } => {
                let file = file.as_mut().ok_or(Error::Closed)?;
                let decompressed = decoder
                    .write_all(chunk)
                    .map(|()| std::mem::take(decoder.get_mut()))
                    .map_err(|source| decompress_error(&self.destination, source))?;
                file.write_all(&decompressed)
                    .await
                    .map_err(|source| decompress_error(&self.destination, source))
            }
            Kind::Tar(tar) => tar.feed(chunk).await,
            Kind::Zip { temp, file, .. } => {
                let file = file.as_mut().ok_or(Error::Closed)?;
                file.write_all(chunk)
                    .await
                    .map_err(|source| write_error(temp, source))
            }
        }
    }

    /// Complete extraction. The destination is in place when this returns `Ok`.
    pub async fn finish(&mut self) -> Result<()> {
        match &mut self.kind {
            Kind::Raw { decoder, file } => {
                let mut file = file.take().ok_or(Error::Closed)?;
                let rest = decoder
                    .try_finish()
                    .map(|()| std::mem::take(decoder.get_mut()))
                    .map_err(|source| decompress_error(&self.destination, source))?;
                flush(&mut file, &rest)
                    .await
                    .map_err(|source| decompress_error(&self.destination, source))?;
            }
            Kind::Tar(tar) => tar.wait().await?,
            Kind::Zip { temp, file, tar } => {
                let mut buffered = file.take().ok_or(Error::Closed)?;
                let extracted = match flush(&mut buffered, &[]).await {
                    Ok(()) => {
                        drop(buffered);
                        extract_zip(temp, &self.destination, &self.env, tar).await
                    }
                    Err(source) => Err(write_error(temp, source)),
                };
                let cleanup = remove_if_present(&*temp).err();
                match extracted {
                    Ok(()) => {
                        if let Some(cleanup) = cleanup {
                            return Err(cleanup.into());
                        }
                    }
                    Err(error) => return Err(error.with_cleanup(cleanup)),
                }
            }
        }
        self.finished = true;
        Ok(())
    }

    /// Stop extraction and remove partial output. Idempotent; does nothing
    /// after a successful [`finish`](Self::finish).
    ///
    /// Every removal is attempted; the first failure is returned.
    pub async fn destroy(&mut self) -> std::result::Result<(), CleanupError> {
        if self.finished {
            return Ok(());
        }
        let mut first = None;
        match &mut self.kind {
            Kind::Raw { file, .. } => drop(file.take()),
            Kind::Tar(tar) => tar.kill().await,
            Kind::Zip { temp, file, tar } => {
                drop(file.take());
                if let Some(mut running) = tar.take() {
                    running.kill().await;
                }
                first = remove_if_present(&*temp).err();
            }
        }
        if let Err(e) = remove_if_present(&self.destination) {
            first.get_or_insert(e);
        }
        match first {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// Write the last bytes and make sure everything reached the disk.
async fn flush(file: &mut File, rest: &[u8]) -> io::Result<()> {
    file.write_all(rest).await?;
    file.flush().await?;
    file.sync_all().await
}

fn write_error(path: &Path, source: io::Error) -> Error {
    toolpin_fs::Error::Write {
        path: path.to_path_buf(),
        source,
    }
    .into()
}

fn decompress_error(path: &Path, source: io::Error) -> Error {
    Error::Decompress {
        path: path.to_path_buf(),
        source,
    }
}

async fn extract_zip(
    temp: &Path,
    destination: &Path,
    env: &Env,
    slot: &mut Option<TarProcess>,
) -> Result<()> {
    let tar = slot.insert(TarProcess::spawn(temp.as_os_str(), destination, env)?);
    let result = tar.wait().await;
    *slot = None;
    result
}

fn temp_path(destination: &Path) -> PathBuf {
    let mut name = OsString::from(destination.as_os_str());
    name.push(".zip");
    PathBuf::from(name)
}

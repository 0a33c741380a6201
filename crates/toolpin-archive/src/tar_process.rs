use crate::error::{Error, Result};
use std::ffi::OsStr;
use std::path::Path;
use std::process::Stdio;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::process::{Child, ChildStdin};
use tokio::task::JoinHandle;
use toolpin_platform::{Command, Env, Platform, exit_reason};

const PROGRAM: &str = "tar";
const EMPTY_STDERR: &str = "(empty stderr)";

/// A running `tar zxf <input> -C <dir> <name>`.
#[derive(Debug)]
pub(crate) struct TarProcess {
    child: Child,
    stdin: Option<ChildStdin>,
    stderr: Option<JoinHandle<Vec<u8>>>,
}

impl TarProcess {
    /// Extract the member named like `destination` into its directory.
    ///
    /// `input` is `-` to read the archive from stdin.
    pub(crate) fn spawn(input: &OsStr, destination: &Path, env: &Env) -> Result<Self> {
        let (Some(dir), Some(name)) = (destination.parent(), destination.file_name()) else {
            return Err(Error::InvalidDestination(destination.to_path_buf()));
        };
        let from_stdin = input == "-";
        let command = Command::new(PROGRAM, env)
            .map_err(|source| Error::Spawn {
                program: PROGRAM.to_string(),
                source,
            })?
            .arg("zxf")
            .arg(input)
            .arg("-C")
            .arg(dir)
            .arg(name)
            .stdin(if from_stdin { Stdio::piped() } else { Stdio::null() })
            .stdout(Stdio::null());

        let mut child = command.spawn().map_err(|source| {
            if source.is_not_found() {
                Error::ArchiverNotFound {
                    search_path_var: search_path_var(),
                    source,
                }
            } else {
                Error::Spawn {
                    program: PROGRAM.to_string(),
                    source,
                }
            }
        })?;

        let stdin = child.stdin.take();
        let stderr = child.stderr.take().map(|mut stderr| {
            tokio::spawn(async move {
                let mut buf = Vec::new();
                if let Err(e) = stderr.read_to_end(&mut buf).await {
                    tracing::debug!(error = %e, "reading tar stderr failed");
                }
                buf
            })
        });
        Ok(Self {
            child,
            stdin,
            stderr,
        })
    }

    /// Pipe compressed bytes into tar.
    ///
    /// A write failing because tar quit is reported as tar's own failure.
    pub(crate) async fn feed(&mut self, chunk: &[u8]) -> Result<()> {
        let Some(stdin) = self.stdin.as_mut() else {
            return Err(Error::Closed);
        };
        if let Err(source) = stdin.write_all(chunk).await {
            return Err(match self.wait().await {
                Ok(()) => Error::Feed {
                    program: PROGRAM.to_string(),
                    source,
                },
                Err(exited) => exited,
            });
        }
        Ok(())
    }

    /// Close stdin and wait for tar to exit.
    pub(crate) async fn wait(&mut self) -> Result<()> {
        drop(self.stdin.take());
        let status = self.child.wait().await.map_err(|source| Error::Feed {
            program: PROGRAM.to_string(),
            source,
        })?;
        let stderr = match self.stderr.take() {
            Some(task) => task.await.unwrap_or_default(),
            None => Vec::new(),
        };
        if status.success() {
            return Ok(());
        }
        let stderr = String::from_utf8_lossy(&stderr);
        let trimmed = stderr.trim();
        Err(Error::Exited {
            program: PROGRAM.to_string(),
            reason: exit_reason(&status),
            diagnostics: if trimmed.is_empty() {
                EMPTY_STDERR.to_string()
            } else {
                trimmed.to_string()
            },
        })
    }

    pub(crate) async fn kill(&mut self) {
        drop(self.stdin.take());
        if let Err(e) = self.child.start_kill() {
            tracing::debug!(error = %e, "killing tar failed");
        }
        let _ = self.child.wait().await;
        if let Some(task) = self.stderr.take() {
            task.abort();
        }
    }
}

fn search_path_var() -> &'static str {
    Platform::current()
        .map(Platform::search_path_var)
        .unwrap_or("$PATH")
}

use crate::core::{last_percentage, rescan_start, trim_progress_noise};
use crate::data::Strategy;
use crate::error::{FetchError, Result};
use bytes::{Bytes, BytesMut};
use std::io;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, ChildStderr, ChildStdout};
use toolpin_platform::{Command, Env, exit_reason};

const CHUNK_SIZE: usize = 64 * 1024;

/// Outcome of trying to start one strategy.
pub(crate) enum Attempt<T> {
    Ready(T),
    /// The program is not installed; the next strategy may run.
    Unavailable(String),
    Failed(FetchError),
}

/// A download program whose stdout is the response body.
#[derive(Debug)]
pub(crate) struct ProcessTransfer {
    program: &'static str,
    child: Child,
    stdout: ChildStdout,
    stderr: Option<ChildStderr>,
    body: BytesMut,
    diagnostics: BytesMut,
    scanned: usize,
    reports_progress: bool,
}

impl ProcessTransfer {
    /// `curl -#fL <url>`, reading progress from its progress bar.
    pub(crate) fn curl(url: &str, env: &Env) -> Attempt<Self> {
        Self::spawn(Strategy::Curl.name(), &["-#fL", url], true, env)
    }

    /// `wget -O - <url>`.
    pub(crate) fn wget(url: &str, env: &Env) -> Attempt<Self> {
        Self::spawn(Strategy::Wget.name(), &["-O", "-", url], false, env)
    }

    fn spawn(
        program: &'static str,
        args: &[&str],
        reports_progress: bool,
        env: &Env,
    ) -> Attempt<Self> {
        let command = match Command::new(program, env) {
            Ok(command) => command.args(args),
            Err(source) => {
                return Attempt::Failed(FetchError::Spawn {
                    program: program.into(),
                    source,
                });
            }
        };
        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(e) if e.is_not_found() => return Attempt::Unavailable(e.to_string()),
            Err(source) => {
                return Attempt::Failed(FetchError::Spawn {
                    program: program.into(),
                    source,
                });
            }
        };
        let Some(stdout) = child.stdout.take() else {
            return Attempt::Failed(FetchError::Stream {
                program: program.into(),
                source: io::Error::other("stdout is not captured"),
            });
        };
        let stderr = child.stderr.take();

        Attempt::Ready(Self {
            program,
            child,
            stdout,
            stderr,
            body: BytesMut::new(),
            diagnostics: BytesMut::new(),
            scanned: 0,
            reports_progress,
        })
    }

    pub(crate) async fn next(&mut self, report: &mut dyn FnMut(f64)) -> Result<Option<Bytes>> {
        loop {
            self.body.reserve(CHUNK_SIZE);
            self.diagnostics.reserve(1024);
            tokio::select! {
                read = self.stdout.read_buf(&mut self.body) => match read {
                    Ok(0) => return self.finish(report).await.map(|()| None),
                    Ok(_) => return Ok(Some(self.body.split().freeze())),
                    Err(source) => return Err(self.stream_error(source)),
                },
                read = read_optional(&mut self.stderr, &mut self.diagnostics) => match read {
                    Ok(0) => self.stderr = None,
                    Ok(_) => self.scan_progress(report),
                    Err(e) => {
                        tracing::debug!(program = self.program, error = %e, "stderr closed");
                        self.stderr = None;
                    }
                },
            }
        }
    }

    /// Kill and reap the child.
    pub(crate) async fn cancel(&mut self) {
        if let Err(e) = self.child.start_kill() {
            tracing::debug!(program = self.program, error = %e, "kill failed");
        }
        let _ = self.child.wait().await;
    }

    async fn finish(&mut self, report: &mut dyn FnMut(f64)) -> Result<()> {
        if let Some(mut stderr) = self.stderr.take() {
            let mut rest = Vec::new();
            stderr
                .read_to_end(&mut rest)
                .await
                .map_err(|source| self.stream_error(source))?;
            self.diagnostics.extend_from_slice(&rest);
            self.scan_progress(report);
        }
        let status = self
            .child
            .wait()
            .await
            .map_err(|source| self.stream_error(source))?;
        if status.success() {
            return Ok(());
        }
        Err(FetchError::Exited {
            program: self.program.to_string(),
            reason: exit_reason(&status),
            diagnostics: trim_progress_noise(&String::from_utf8_lossy(&self.diagnostics)),
        })
    }

    fn scan_progress(&mut self, report: &mut dyn FnMut(f64)) {
        if self.reports_progress {
            let start = rescan_start(&self.diagnostics, self.scanned);
            let tail = String::from_utf8_lossy(&self.diagnostics[start..]);
            if let Some(fraction) = last_percentage(&tail) {
                report(fraction);
            }
        }
        self.scanned = self.diagnostics.len();
    }

    fn stream_error(&self, source: io::Error) -> FetchError {
        FetchError::Stream {
            program: self.program.to_string(),
            source,
        }
    }
}

async fn read_optional<R: AsyncRead + Unpin>(
    stream: &mut Option<R>,
    buf: &mut BytesMut,
) -> io::Result<usize> {
    match stream {
        Some(stream) => stream.read_buf(buf).await,
        None => std::future::pending().await,
    }
}

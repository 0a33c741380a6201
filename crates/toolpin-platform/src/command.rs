use crate::env::{Env, PATH_VAR, subprocess_search_path};
use crate::error::{Error, Result};
use std::ffi::OsStr;
use std::io;
use std::process::{ExitStatus, Stdio};
use tokio::process::{Child, Command as TokioCommand};

/// Subprocess builder bound to an [`Env`] snapshot.
///
/// Children are killed when their handle is dropped; callers still tear
/// them down explicitly, this only covers panics and early returns.
#[derive(Debug)]
pub struct Command {
    inner: TokioCommand,
    program: String,
}

impl Command {
    pub fn new(program: impl Into<String>, env: &Env) -> Result<Self> {
        let program = program.into();
        let mut inner = TokioCommand::new(&program);
        if let Some(search_path) = subprocess_search_path(env)? {
            inner.env(PATH_VAR, search_path);
        }
        inner
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        Ok(Self { inner, program })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.inner.arg(arg);
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.inner.args(args);
        self
    }

    pub fn stdin(mut self, cfg: Stdio) -> Self {
        self.inner.stdin(cfg);
        self
    }

    pub fn stdout(mut self, cfg: Stdio) -> Self {
        self.inner.stdout(cfg);
        self
    }

    /// Spawn the child, separating "program not found" from other failures.
    pub fn spawn(mut self) -> Result<Child> {
        let args: Vec<_> = self.inner.as_std().get_args().collect();
        tracing::debug!(program = %self.program, ?args, "spawning");
        self.inner.spawn().map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                Error::CommandNotFound {
                    cmd: self.program.clone(),
                    source,
                }
            } else {
                Error::CommandFailed {
                    cmd: self.program.clone(),
                    source,
                }
            }
        })
    }
}

/// Human-readable reason a process stopped, e.g. `exit code 2` or `signal 9`.
pub fn exit_reason(status: &ExitStatus) -> String {
    if let Some(code) = status.code() {
        return format!("exit code {code}");
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return format!("signal {signal}");
        }
    }
    "unknown reason".to_string()
}

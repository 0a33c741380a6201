//! Installing every tool of a project at once.

use crate::error::{Failure, SessionError, ToolError};
use crate::output::Output;
use crate::pipeline::download_and_extract;
use crate::status::{Status, StatusBoard};
use console::style;
use futures_util::future::join_all;
use std::path::PathBuf;
use tokio::sync::mpsc;
use toolpin_fetch::Downloader;
use toolpin_fs::ensure_dir;
use toolpin_resource::{Tool, ToolSet};
use toolpin_shim::Linker;

type Outcome = Result<Option<String>, Failure>;

/// One install or removal run for one project.
pub struct InstallSession<L, O> {
    downloader: Downloader,
    linker: L,
    output: O,
    bin_dir: PathBuf,
}

impl<L: Linker, O: Output> InstallSession<L, O> {
    pub fn new(downloader: Downloader, linker: L, output: O, bin_dir: impl Into<PathBuf>) -> Self {
        Self {
            downloader,
            linker,
            output,
            bin_dir: bin_dir.into(),
        }
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn into_output(self) -> O {
        self.output
    }

    /// Download every missing tool concurrently, link every requested tool
    /// and unlink every `known` tool whose name was not requested.
    ///
    /// Only directory creation aborts the run; everything else ends up in
    /// the report.
    pub async fn install(
        &mut self,
        header: &str,
        tools: &ToolSet,
        known: &[Tool],
    ) -> Result<SessionReport, SessionError> {
        ensure_dir(&self.bin_dir)?;
        for tool in &tools.missing {
            ensure_dir(tool.parent_dir())?;
        }

        let Self {
            downloader,
            linker,
            output,
            ..
        } = self;
        let downloader = &*downloader;
        let linker = &*linker;

        output.line(&style(header).bold().to_string());
        let mut board = StatusBoard::new(tools.missing.len());
        for (index, tool) in tools.missing.iter().enumerate() {
            board.render(index, Status::Pending.line(tool), output);
        }

        let (events, mut updates) = mpsc::unbounded_channel::<(usize, Status)>();
        let pipelines = join_all(tools.missing.iter().enumerate().map(|(index, tool)| {
            let events = events.clone();
            async move {
                let report = |status: Status| {
                    let _ = events.send((index, status));
                };
                let result =
                    download_and_extract(downloader, tool, &mut |stage| report(Status::from(stage)))
                        .await;
                match result.map(|()| linker.link(tool)) {
                    Ok(Ok(message)) => {
                        report(Status::Linked);
                        Ok(message)
                    }
                    Ok(Err(error)) => {
                        report(Status::Failed);
                        Err(Failure::from(error))
                    }
                    Err(source) => {
                        report(Status::Failed);
                        Err(ToolError::new(tool, source).into())
                    }
                }
            }
        }));
        drop(events);

        let render = async {
            while let Some((index, status)) = updates.recv().await {
                board.render(index, status.line(&tools.missing[index]), output);
            }
        };
        let (mut outcomes, ()) = tokio::join!(pipelines, render);

        outcomes.extend(
            tools
                .existing
                .iter()
                .map(|tool| linker.link(tool).map_err(Failure::from)),
        );
        let requested: Vec<&str> = tools.names().collect();
        outcomes.extend(
            known
                .iter()
                .filter(|tool| !requested.contains(&tool.name.as_str()))
                .map(|tool| linker.unlink(tool).map_err(Failure::from)),
        );

        let report = SessionReport::from_outcomes(outcomes);
        report.print(output);
        Ok(report)
    }

    /// Unlink every known tool, used when a project declares none.
    ///
    /// `reason` completes `The "tools" field is ...`, e.g. `missing` or `empty`.
    pub fn remove_all(&mut self, header: &str, known: &[Tool], reason: &str) -> SessionReport {
        self.output.line(&style(header).bold().to_string());
        let outcomes: Vec<Outcome> = known
            .iter()
            .map(|tool| self.linker.unlink(tool).map_err(Failure::from))
            .collect();
        let report = SessionReport::from_outcomes(outcomes);
        if report.is_empty() {
            self.output.line(&format!(
                "The \"tools\" field is {reason}. To add tools: edit toolpin.toml"
            ));
        } else {
            report.print(&mut self.output);
        }
        report
    }
}

/// Informational messages and failures of a session, in outcome order.
#[derive(Debug, Default)]
pub struct SessionReport {
    pub messages: Vec<String>,
    pub failures: Vec<Failure>,
}

impl SessionReport {
    fn from_outcomes(outcomes: impl IntoIterator<Item = Outcome>) -> Self {
        let mut report = Self::default();
        for outcome in outcomes {
            match outcome {
                Ok(Some(message)) => report.messages.push(message),
                Ok(None) => {}
                Err(failure) => report.failures.push(failure),
            }
        }
        report
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty() && self.failures.is_empty()
    }

    /// 1 if anything failed.
    pub fn exit_code(&self) -> u8 {
        if self.failures.is_empty() { 0 } else { 1 }
    }

    fn print(&self, output: &mut dyn Output) {
        if !self.messages.is_empty() {
            output.line(&self.messages.join("\n"));
        }
        if self.failures.is_empty() {
            return;
        }
        let count = self.failures.len();
        let mut blocks = vec![
            style(format!("{count} error{}", if count == 1 { "" } else { "s" }))
                .for_stderr()
                .bold()
                .to_string(),
        ];
        blocks.extend(self.failures.iter().map(format_failure));
        output.error_line("");
        output.error_line(&blocks.join("\n\n"));
    }
}

fn format_failure(failure: &Failure) -> String {
    match failure {
        Failure::Install(error) => {
            let body = format!(
                "{}\n{}\n{}",
                style(format!("< {}", error.url)).for_stderr().dim(),
                style(format!("> {}", error.destination.display())).for_stderr().dim(),
                error.source
            );
            format!(
                "{}\n{}",
                style(format!("{} {}", error.name, error.version)).for_stderr().bold(),
                indent(&body)
            )
        }
        Failure::Link(error) => error.to_string(),
    }
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|line| format!("    {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

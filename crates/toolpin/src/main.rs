mod cli;
mod config;
mod logging;
mod manifest;
mod progress;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{App, Commands, GetArg, InstallArg};
use config::Config;
use console::style;
use manifest::{Declared, Manifest};
use progress::PercentBar;
use std::process::ExitCode;
use toolpin_fetch::{Downloader, FetchOptions};
use toolpin_install::{InstallSession, TermOutput, get_executable};
use toolpin_platform::Env;
use toolpin_resource::{AssetCatalog, StaticCatalog};
use toolpin_shim::ShimLinker;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let app = App::parse();
    logging::init(app.verbose);

    match run(app.cmd).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {e:#}", style("error:").for_stderr().red().bold());
            ExitCode::FAILURE
        }
    }
}

async fn run(cmd: Commands) -> Result<ExitCode> {
    let config = Config::from_env(Env::from_process())?;
    match cmd {
        Commands::Install(arg) => install(&config, arg).await,
        Commands::Get(arg) => get(&config, arg).await,
    }
}

async fn install(config: &Config, arg: InstallArg) -> Result<ExitCode> {
    if config.skip_install {
        tracing::debug!("{} is set, skipping install", config::SKIP_INSTALL_VAR);
        return Ok(ExitCode::SUCCESS);
    }

    let manifest_path = match arg.manifest {
        Some(path) => path,
        None => {
            let cwd = std::env::current_dir().context("Failed to get current directory")?;
            Manifest::find(&cwd).with_context(|| {
                format!(
                    "No {} found in {} or any of its parents",
                    manifest::MANIFEST_FILE,
                    cwd.display()
                )
            })?
        }
    };
    let manifest = Manifest::load(manifest_path)?;
    let catalog = StaticCatalog::load(config.catalog_path(arg.catalog.path.as_deref()))?;
    let known = catalog.known_tools(&config.root, config.platform);

    let bin_dir = manifest.bin_dir();
    let downloader = Downloader::new(config.env.clone(), FetchOptions::default())?;
    let linker = ShimLinker::new(&bin_dir, config.platform);
    let mut session = InstallSession::new(downloader, linker, TermOutput::new(), &bin_dir);
    let header = manifest.path.display().to_string();

    let report = match manifest.declared() {
        Declared::Tools(tools) => {
            let set = Manifest::resolve(tools, &catalog, &config.root, config.platform)?;
            session.install(&header, &set, &known).await?
        }
        Declared::Missing => session.remove_all(&header, &known, "missing"),
        Declared::Empty => session.remove_all(&header, &known, "empty"),
    };
    Ok(ExitCode::from(report.exit_code()))
}

async fn get(config: &Config, arg: GetArg) -> Result<ExitCode> {
    let catalog = StaticCatalog::load(config.catalog_path(arg.catalog.path.as_deref()))?;
    let tool = catalog.resolve(&config.root, &arg.name, &arg.version, config.platform)?;
    let downloader = Downloader::new(config.env.clone(), FetchOptions::default())?;

    let bar = PercentBar::new(format!("{} {}", tool.name, tool.version));
    let result = get_executable(&downloader, &tool, &mut |fraction| bar.set(fraction)).await;
    bar.finish();

    println!("{}", result?.display());
    Ok(ExitCode::SUCCESS)
}

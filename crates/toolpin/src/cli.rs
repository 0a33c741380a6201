use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Clone, Debug, Parser)]
#[command(name = "toolpin", version = env!("CARGO_PKG_VERSION"), about, long_about = None, propagate_version = true)]
pub struct App {
    /// Show debug logs on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Install and link every tool listed in toolpin.toml
    #[command(alias = "i", name = "install")]
    Install(InstallArg),

    /// Print the path of one tool version, downloading it if needed
    #[command(name = "get")]
    Get(GetArg),
}

#[derive(Clone, Debug, Args)]
pub struct InstallArg {
    /// Manifest to use instead of searching upwards for toolpin.toml
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    #[command(flatten)]
    pub catalog: CatalogArg,
}

#[derive(Clone, Debug, Args)]
pub struct GetArg {
    pub name: String,
    #[arg(value_name = "VERSION", id = "tool_version")]
    pub version: String,

    #[command(flatten)]
    pub catalog: CatalogArg,
}

#[derive(Clone, Debug, Args)]
pub struct CatalogArg {
    /// Asset catalog [default: $TOOLPIN_CATALOG or <root>/catalog.toml]
    #[arg(long = "catalog")]
    pub path: Option<PathBuf>,
}

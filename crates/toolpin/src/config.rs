//! Settings read once from the environment snapshot.

use std::path::{Path, PathBuf};
use toolpin_platform::{Env, Platform, dir};

pub const CATALOG_VAR: &str = "TOOLPIN_CATALOG";
pub const SKIP_INSTALL_VAR: &str = "NO_TOOLPIN_INSTALL";

const CATALOG_FILE: &str = "catalog.toml";

#[derive(Debug, Clone)]
pub struct Config {
    pub env: Env,
    pub platform: Platform,
    /// Where every tool version is stored.
    pub root: PathBuf,
    pub catalog: PathBuf,
    pub skip_install: bool,
}

impl Config {
    pub fn from_env(env: Env) -> toolpin_platform::Result<Self> {
        let platform = Platform::current()?;
        let root = dir::tooling_root(&env)?;
        let catalog = env
            .get_non_empty(CATALOG_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| root.join(CATALOG_FILE));
        let skip_install = env.contains(SKIP_INSTALL_VAR);
        Ok(Self {
            env,
            platform,
            root,
            catalog,
            skip_install,
        })
    }

    /// A `--catalog` argument takes precedence.
    pub fn catalog_path<'a>(&'a self, arg: Option<&'a Path>) -> &'a Path {
        arg.unwrap_or(&self.catalog)
    }
}

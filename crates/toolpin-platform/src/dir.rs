use crate::env::Env;
use crate::error::{Error, Result};
use std::path::PathBuf;

/// Overrides where tools are stored.
pub const HOME_VAR: &str = "TOOLPIN_HOME";

const APP_DIR: &str = "toolpin";

pub fn user_home() -> Option<PathBuf> {
    home::home_dir()
}

/// User's data directory.
///
/// - Windows: `LOCALAPPDATA`
/// - macOS: `~/Library/Application Support`
/// - Linux: `$XDG_DATA_HOME` or `~/.local/share`
pub fn user_data(env: &Env) -> Option<PathBuf> {
    if cfg!(target_os = "windows") {
        env.get_non_empty("LOCALAPPDATA").map(PathBuf::from)
    } else if cfg!(target_os = "macos") {
        user_home().map(|p| p.join("Library/Application Support"))
    } else {
        env.get_non_empty("XDG_DATA_HOME")
            .map(PathBuf::from)
            .or_else(|| user_home().map(|p| p.join(".local/share")))
    }
}

/// Root under which every tool version is stored.
pub fn tooling_root(env: &Env) -> Result<PathBuf> {
    if let Some(root) = env.get_non_empty(HOME_VAR) {
        return Ok(PathBuf::from(root));
    }
    user_data(env)
        .map(|dir| dir.join(APP_DIR))
        .ok_or(Error::NoHome)
}

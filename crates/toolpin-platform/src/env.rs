use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

/// Environment variable holding the subprocess search path.
pub const PATH_VAR: &str = "PATH";

/// Marker identifying operating-system bundled utilities on Windows.
///
/// Git Bash and similar environments put their own GNU `tar` and `curl` first
/// in the search path; the bundled BSD `tar` is the one that handles zip files.
pub const SYSTEM_MARKER: &str = "system32";

/// Snapshot of environment variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Env {
    vars: BTreeMap<OsString, OsString>,
}

impl Env {
    /// Empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the current process environment.
    pub fn from_process() -> Self {
        Self {
            vars: std::env::vars_os().collect(),
        }
    }

    pub fn with(mut self, key: impl Into<OsString>, value: impl Into<OsString>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<OsString>, value: impl Into<OsString>) {
        let key = key.into();
        if let Some(existing) = self.find_key(&key) {
            self.vars.insert(existing, value.into());
        } else {
            self.vars.insert(key, value.into());
        }
    }

    pub fn get(&self, key: &str) -> Option<&OsStr> {
        let key = self.find_key(OsStr::new(key))?;
        self.vars.get(&key).map(OsString::as_os_str)
    }

    /// Value of `key` if set and non-empty.
    pub fn get_non_empty(&self, key: &str) -> Option<&OsStr> {
        self.get(key).filter(|value| !value.is_empty())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.find_key(OsStr::new(key)).is_some()
    }

    pub fn search_path(&self) -> Option<&OsStr> {
        self.get(PATH_VAR)
    }

    /// Variable names are case-insensitive on Windows (`Path` vs `PATH`).
    fn find_key(&self, key: &OsStr) -> Option<OsString> {
        if cfg!(windows) {
            let wanted = key.to_string_lossy().to_ascii_uppercase();
            self.vars
                .keys()
                .find(|k| k.to_string_lossy().to_ascii_uppercase() == wanted)
                .cloned()
        } else {
            self.vars.contains_key(key).then(|| key.to_os_string())
        }
    }
}

/// An ordered list of search path entries.
#[derive(Debug, Clone, Default)]
pub struct SearchPath {
    paths: Vec<PathBuf>,
}

impl SearchPath {
    pub fn from_env(env: &Env) -> Self {
        Self {
            paths: env
                .search_path()
                .map(|value| std::env::split_paths(value).collect())
                .unwrap_or_default(),
        }
    }

    pub fn from_paths(paths: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            paths: paths.into_iter().collect(),
        }
    }

    /// Move every entry containing `marker` (case-insensitive) to the front,
    /// keeping the relative order within both groups.
    pub fn prioritize(self, marker: &str) -> Self {
        let marker = marker.to_lowercase();
        let (marked, rest): (Vec<_>, Vec<_>) = self
            .paths
            .into_iter()
            .partition(|p| p.to_string_lossy().to_lowercase().contains(&marker));
        Self {
            paths: marked.into_iter().chain(rest).collect(),
        }
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn build(self) -> Result<OsString> {
        std::env::join_paths(self.paths).map_err(Error::JoinPaths)
    }
}

/// The search path handed to every spawned subprocess, if the environment has one.
///
/// On Windows the bundled utilities are moved first; this applies to every
/// spawn so `curl` and `tar` always come from the same place.
pub fn subprocess_search_path(env: &Env) -> Result<Option<OsString>> {
    let Some(value) = env.search_path() else {
        return Ok(None);
    };
    if cfg!(windows) {
        SearchPath::from_env(env)
            .prioritize(SYSTEM_MARKER)
            .build()
            .map(Some)
    } else {
        Ok(Some(value.to_os_string()))
    }
}

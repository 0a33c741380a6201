//! The project manifest, `toolpin.toml`.
//!
//! ```toml
//! [tools]
//! elm = "0.19.1"
//! elm-format = "0.8.7"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use toolpin_platform::Platform;
use toolpin_resource::{AssetCatalog, Tool, ToolSet};

pub const MANIFEST_FILE: &str = "toolpin.toml";

/// Links live next to the manifest.
const BIN_DIR: &str = ".toolpin/bin";

#[derive(Debug, Clone, Default, Deserialize)]
struct Document {
    tools: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone)]
pub struct Manifest {
    pub path: PathBuf,
    tools: Option<BTreeMap<String, String>>,
}

/// What the `tools` table asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declared<'a> {
    Missing,
    Empty,
    Tools(&'a BTreeMap<String, String>),
}

impl Manifest {
    /// First `toolpin.toml` in `start` or one of its ancestors.
    pub fn find(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(MANIFEST_FILE))
            .find(|candidate| candidate.is_file())
    }

    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(path, &text)
    }

    fn parse(path: PathBuf, text: &str) -> Result<Self> {
        let document: Document =
            toml::from_str(text).with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(Self {
            path,
            tools: document.tools,
        })
    }

    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or(Path::new("."))
    }

    pub fn bin_dir(&self) -> PathBuf {
        self.dir().join(BIN_DIR)
    }

    pub fn declared(&self) -> Declared<'_> {
        match &self.tools {
            None => Declared::Missing,
            Some(tools) if tools.is_empty() => Declared::Empty,
            Some(tools) => Declared::Tools(tools),
        }
    }

    /// Resolve the requested tools and split them by whether they are installed.
    pub fn resolve(
        tools: &BTreeMap<String, String>,
        catalog: &impl AssetCatalog,
        root: &Path,
        platform: Platform,
    ) -> Result<ToolSet> {
        let resolved = tools
            .iter()
            .map(|(name, version)| catalog.resolve(root, name, version, platform))
            .collect::<toolpin_resource::Result<Vec<Tool>>>()?;
        Ok(ToolSet::classify(resolved)?)
    }
}

use crate::asset::AssetDescriptor;
use crate::error::{Error, Result};
use std::io;
use std::path::{Path, PathBuf};
use toolpin_platform::Platform;

/// A tool resolved to an asset and a local destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tool {
    pub name: String,
    pub version: String,
    pub asset: AssetDescriptor,
    /// Absolute path of the executable: `<root>/<name>/<version>/<name>[.exe]`.
    pub location: PathBuf,
}

impl Tool {
    pub fn new(
        root: &Path,
        name: impl Into<String>,
        version: impl Into<String>,
        asset: AssetDescriptor,
        platform: Platform,
    ) -> Self {
        let name = name.into();
        let version = version.into();
        let location = root
            .join(&name)
            .join(&version)
            .join(format!("{name}{}", platform.exe_suffix()));
        Self {
            name,
            version,
            asset,
            location,
        }
    }

    pub fn parent_dir(&self) -> &Path {
        self.location.parent().unwrap_or(&self.location)
    }

    /// Whether the executable is already in place.
    pub fn is_installed(&self) -> Result<bool> {
        match std::fs::metadata(&self.location) {
            Ok(meta) if meta.is_file() => Ok(true),
            Ok(_) => Err(Error::NotAFile(self.location.clone())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(Error::Inspect {
                path: self.location.clone(),
                source,
            }),
        }
    }
}

/// Requested tools split by whether they still need downloading.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolSet {
    pub missing: Vec<Tool>,
    pub existing: Vec<Tool>,
}

impl ToolSet {
    pub fn classify(tools: impl IntoIterator<Item = Tool>) -> Result<Self> {
        let mut set = Self::default();
        for tool in tools {
            if tool.is_installed()? {
                set.existing.push(tool);
            } else {
                set.missing.push(tool);
            }
        }
        Ok(set)
    }

    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.existing.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.missing
            .iter()
            .chain(&self.existing)
            .map(|tool| tool.name.as_str())
    }
}

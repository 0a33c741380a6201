use crate::asset::AssetDescriptor;
use crate::error::{Error, Result};
use crate::tool::Tool;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use toolpin_platform::Platform;

/// Lookup of downloadable assets by tool name, version and platform.
pub trait AssetCatalog {
    fn lookup(&self, name: &str, version: &str, platform: Platform) -> Option<&AssetDescriptor>;

    /// Every `(name, version, asset)` published for `platform`.
    fn entries(&self, platform: Platform) -> Vec<(&str, &str, &AssetDescriptor)>;

    fn resolve(&self, root: &Path, name: &str, version: &str, platform: Platform) -> Result<Tool> {
        let asset = self
            .lookup(name, version, platform)
            .ok_or_else(|| Error::UnknownTool {
                name: name.to_string(),
                version: version.to_string(),
                platform,
            })?;
        Ok(Tool::new(root, name, version, asset.clone(), platform))
    }

    /// Every tool the catalog knows for `platform`, resolved under `root`.
    fn known_tools(&self, root: &Path, platform: Platform) -> Vec<Tool> {
        self.entries(platform)
            .into_iter()
            .map(|(name, version, asset)| Tool::new(root, name, version, asset.clone(), platform))
            .collect()
    }
}

/// Catalog read from a TOML document shaped as
///
/// ```toml
/// [elm."0.19.1".linux]
/// url = "https://example.com/elm-linux.gz"
/// sha256 = "e44af52bb27f725a973478e589d990a6428e115fe1bb14f03833134d6c0f155c"
/// format = "raw"
/// ```
///
/// Platform keys are the [`Platform`] display names; unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct StaticCatalog {
    tools: BTreeMap<String, BTreeMap<String, BTreeMap<String, AssetDescriptor>>>,
}

impl StaticCatalog {
    pub fn from_toml_str(text: &str, origin: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|source| Error::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text, path)
    }

    pub fn insert(
        &mut self,
        name: impl Into<String>,
        version: impl Into<String>,
        platform: Platform,
        asset: AssetDescriptor,
    ) {
        self.tools
            .entry(name.into())
            .or_default()
            .entry(version.into())
            .or_default()
            .insert(platform.as_str().to_string(), asset);
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl AssetCatalog for StaticCatalog {
    fn lookup(&self, name: &str, version: &str, platform: Platform) -> Option<&AssetDescriptor> {
        self.tools.get(name)?.get(version)?.get(platform.as_str())
    }

    fn entries(&self, platform: Platform) -> Vec<(&str, &str, &AssetDescriptor)> {
        self.tools
            .iter()
            .flat_map(|(name, versions)| {
                versions.iter().filter_map(move |(version, assets)| {
                    assets
                        .get(platform.as_str())
                        .map(|asset| (name.as_str(), version.as_str(), asset))
                })
            })
            .collect()
    }
}

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// How a published asset is packaged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetFormat {
    /// A single gzip-compressed binary.
    #[serde(alias = "gz")]
    Raw,
    /// A gzip-compressed tarball containing the binary.
    #[serde(alias = "tgz")]
    Tar,
    Zip,
}

impl fmt::Display for AssetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Raw => "raw",
            Self::Tar => "tar",
            Self::Zip => "zip",
        })
    }
}

/// Where to download a tool and what it must hash to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetDescriptor {
    pub url: String,
    /// Lowercase hex SHA-256 digest.
    #[serde(deserialize_with = "lowercase")]
    pub sha256: String,
    pub format: AssetFormat,
}

impl AssetDescriptor {
    pub fn new(url: impl Into<String>, sha256: impl AsRef<str>, format: AssetFormat) -> Self {
        Self {
            url: url.into(),
            sha256: sha256.as_ref().to_ascii_lowercase(),
            format,
        }
    }
}

fn lowercase<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    String::deserialize(deserializer).map(|s| s.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalizes_digest() {
        let asset = AssetDescriptor::new("https://example.com/a.gz", "ABCDEF", AssetFormat::Raw);
        assert_eq!(asset.sha256, "abcdef");
    }

    #[test]
    fn test_format_aliases() {
        #[derive(Deserialize)]
        struct Wrapper {
            format: AssetFormat,
        }
        for (text, expected) in [
            ("gz", AssetFormat::Raw),
            ("raw", AssetFormat::Raw),
            ("tgz", AssetFormat::Tar),
            ("tar", AssetFormat::Tar),
            ("zip", AssetFormat::Zip),
        ] {
            let parsed: Wrapper = toml::from_str(&format!("format = \"{text}\"")).unwrap();
            assert_eq!(parsed.format, expected);
        }
    }
}

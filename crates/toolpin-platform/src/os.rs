//! Operating system detection.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Platforms assets are published for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Platform {
    Linux,
    Mac,
    Windows,
}

impl Platform {
    /// Platform of the running binary.
    pub fn current() -> Result<Self> {
        Self::from_os(std::env::consts::OS)
    }

    /// Map a `std::env::consts::OS` value.
    pub fn from_os(os: &str) -> Result<Self> {
        match os {
            "linux" => Ok(Self::Linux),
            "macos" => Ok(Self::Mac),
            "windows" => Ok(Self::Windows),
            other => Err(Error::UnsupportedPlatform(other.to_string())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Linux => "linux",
            Self::Mac => "mac",
            Self::Windows => "windows",
        }
    }

    pub fn is_windows(self) -> bool {
        self == Self::Windows
    }

    pub fn exe_suffix(self) -> &'static str {
        if self.is_windows() { ".exe" } else { "" }
    }

    /// How the search path variable is spelled in this platform's shell.
    pub fn search_path_var(self) -> &'static str {
        if self.is_windows() { "%PATH%" } else { "$PATH" }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "linux" => Ok(Self::Linux),
            "mac" => Ok(Self::Mac),
            "windows" => Ok(Self::Windows),
            other => Err(Error::UnsupportedPlatform(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_os() {
        assert_eq!(Platform::from_os("linux").unwrap(), Platform::Linux);
        assert_eq!(Platform::from_os("macos").unwrap(), Platform::Mac);
        assert_eq!(Platform::from_os("windows").unwrap(), Platform::Windows);
        assert!(matches!(
            Platform::from_os("freebsd"),
            Err(Error::UnsupportedPlatform(os)) if os == "freebsd"
        ));
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for platform in [Platform::Linux, Platform::Mac, Platform::Windows] {
            assert_eq!(platform.to_string().parse::<Platform>().unwrap(), platform);
        }
    }

    #[test]
    fn test_exe_suffix() {
        assert_eq!(Platform::Windows.exe_suffix(), ".exe");
        assert_eq!(Platform::Linux.exe_suffix(), "");
        assert_eq!(Platform::Windows.search_path_var(), "%PATH%");
    }

    #[cfg(any(target_os = "linux", target_os = "macos", target_os = "windows"))]
    #[test]
    fn test_current_is_supported() {
        assert!(Platform::current().is_ok());
    }
}

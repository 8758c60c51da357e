//! SDK references on `Project Sdk="..."`, `<Sdk>` and `<Import Sdk="...">`.

use std::fmt;
use std::path::{Path, PathBuf};

use smol_str::SmolStr;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SdkReference {
    pub name: SmolStr,
    pub version: Option<SmolStr>,
    pub minimum_version: Option<SmolStr>,
}

impl SdkReference {
    /// Parse `Name`, `Name/Version` or `Name/min=Version`.
    ///
    /// Returns `None` for anything ambiguous, such as an empty name or more
    /// than one `/`.
    pub fn try_parse(text: &str) -> Option<Self> {
        let mut parts = text.trim().split('/');
        let name = parts.next()?.trim();
        let version = parts.next().map(str::trim);
        if name.is_empty() || parts.next().is_some() {
            return None;
        }
        let mut sdk = SdkReference {
            name: SmolStr::new(name),
            version: None,
            minimum_version: None,
        };
        match version {
            None => {}
            Some("") => return None,
            Some(v) => match v.split_once('=') {
                Some((key, min)) if key.trim().eq_ignore_ascii_case("min") && !min.trim().is_empty() => {
                    sdk.minimum_version = Some(SmolStr::new(min.trim()));
                }
                Some(_) => return None,
                None => sdk.version = Some(SmolStr::new(v)),
            },
        }
        Some(sdk)
    }
}

impl fmt::Display for SdkReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if let Some(version) = &self.version {
            write!(f, "/{version}")?;
        } else if let Some(min) = &self.minimum_version {
            write!(f, "/min={min}")?;
        }
        Ok(())
    }
}

/// Host runtime facts the language service needs.
pub trait RuntimeInformation: Send + Sync {
    /// Directory containing the SDK's `Sdk.props`/`Sdk.targets`.
    fn sdk_path(&self, sdk: &SdkReference, project_path: &Path) -> Option<PathBuf>;
}

/// Resolves SDKs under one SDKs root, as `<root>/<Name>/Sdk`.
#[derive(Clone, Debug, Default)]
pub struct SdksDirectory {
    root: Option<PathBuf>,
}

impl SdksDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    /// The root named by the `MSBuildSDKsPath` environment variable, if set.
    pub fn from_env() -> Self {
        Self {
            root: std::env::var_os("MSBuildSDKsPath").map(PathBuf::from),
        }
    }
}

impl RuntimeInformation for SdksDirectory {
    fn sdk_path(&self, sdk: &SdkReference, _project_path: &Path) -> Option<PathBuf> {
        let path = self.root.as_ref()?.join(sdk.name.as_str()).join("Sdk");
        if path.is_dir() {
            Some(path)
        } else {
            tracing::trace!("SDK {} not found under {}", sdk, path.display());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_forms() {
        let plain = SdkReference::try_parse("Microsoft.NET.Sdk").unwrap();
        assert_eq!(plain.name, "Microsoft.NET.Sdk");
        assert!(plain.version.is_none());

        let versioned = SdkReference::try_parse("My.Sdk/1.2.3").unwrap();
        assert_eq!(versioned.version.as_deref(), Some("1.2.3"));
        assert_eq!(versioned.to_string(), "My.Sdk/1.2.3");

        let min = SdkReference::try_parse("My.Sdk/min=2.0").unwrap();
        assert_eq!(min.minimum_version.as_deref(), Some("2.0"));
        assert!(min.version.is_none());
    }

    #[test]
    fn test_ambiguous_references() {
        assert!(SdkReference::try_parse("").is_none());
        assert!(SdkReference::try_parse("/1.0").is_none());
        assert!(SdkReference::try_parse("A/1.0/extra").is_none());
        assert!(SdkReference::try_parse("A/").is_none());
        assert!(SdkReference::try_parse("A/max=1.0").is_none());
    }

    #[test]
    fn test_sdks_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("My.Sdk").join("Sdk")).unwrap();
        let runtime = SdksDirectory::new(dir.path());
        let sdk = SdkReference::try_parse("My.Sdk").unwrap();
        let found = runtime.sdk_path(&sdk, Path::new("proj.csproj")).unwrap();
        assert!(found.ends_with("Sdk"));

        let missing = SdkReference::try_parse("Other.Sdk").unwrap();
        assert!(runtime.sdk_path(&missing, Path::new("proj.csproj")).is_none());
        assert!(SdksDirectory::default().sdk_path(&sdk, Path::new("p")).is_none());
    }
}

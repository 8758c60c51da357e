//! Semantic value domains for property, metadata and attribute values.

use std::fmt;
use std::str::FromStr;

use smol_str::SmolStr;

use super::error::SchemaError;
use super::info::{BaseInfo, ConstantInfo};

/// Scalar value domain. Combined with a list flag in [`ValueKind`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum BaseKind {
    #[default]
    Unknown,
    Bool,
    Int,
    String,
    Guid,
    Url,
    Version,
    File,
    Folder,
    FolderWithSlash,
    FileOrFolder,
    ProjectFile,
    Filename,
    Extension,
    ItemName,
    PropertyName,
    MetadataName,
    TargetName,
    TaskName,
    TaskOutputParameterName,
    TargetFramework,
    TargetFrameworks,
    TargetFrameworkIdentifier,
    TargetFrameworkVersion,
    TargetFrameworkProfile,
    Configuration,
    Platform,
    /// Value of an item whose type is not described by any schema.
    UnknownItem,
    Condition,
    Importance,
    ContinueOnError,
    ToolsVersion,
    Sdk,
    NuGetId,
    /// The construct has no value (container elements).
    Nothing,
}

const BASE_KINDS: &[(BaseKind, &str)] = &[
    (BaseKind::Unknown, "unknown"),
    (BaseKind::Bool, "bool"),
    (BaseKind::Int, "int"),
    (BaseKind::String, "string"),
    (BaseKind::Guid, "guid"),
    (BaseKind::Url, "url"),
    (BaseKind::Version, "version"),
    (BaseKind::File, "file"),
    (BaseKind::Folder, "folder"),
    (BaseKind::FolderWithSlash, "folder-with-slash"),
    (BaseKind::FileOrFolder, "file-or-folder"),
    (BaseKind::ProjectFile, "project-file"),
    (BaseKind::Filename, "filename"),
    (BaseKind::Extension, "extension"),
    (BaseKind::ItemName, "item-name"),
    (BaseKind::PropertyName, "property-name"),
    (BaseKind::MetadataName, "metadata-name"),
    (BaseKind::TargetName, "target-name"),
    (BaseKind::TaskName, "task-name"),
    (BaseKind::TaskOutputParameterName, "task-output-parameter-name"),
    (BaseKind::TargetFramework, "target-framework"),
    (BaseKind::TargetFrameworks, "target-frameworks"),
    (BaseKind::TargetFrameworkIdentifier, "target-framework-identifier"),
    (BaseKind::TargetFrameworkVersion, "target-framework-version"),
    (BaseKind::TargetFrameworkProfile, "target-framework-profile"),
    (BaseKind::Configuration, "configuration"),
    (BaseKind::Platform, "platform"),
    (BaseKind::UnknownItem, "unknown-item"),
    (BaseKind::Condition, "condition"),
    (BaseKind::Importance, "importance"),
    (BaseKind::ContinueOnError, "continue-on-error"),
    (BaseKind::ToolsVersion, "tools-version"),
    (BaseKind::Sdk, "sdk"),
    (BaseKind::NuGetId, "nuget-id"),
    (BaseKind::Nothing, "nothing"),
];

impl BaseKind {
    pub const fn kind(self) -> ValueKind {
        ValueKind::new(self)
    }

    pub const fn list(self) -> ValueKind {
        ValueKind::new(self).list()
    }

    pub fn as_str(self) -> &'static str {
        BASE_KINDS
            .iter()
            .find(|(kind, _)| *kind == self)
            .map_or("unknown", |(_, tag)| *tag)
    }
}

/// A value domain, optionally a `;`-separated list of that domain.
///
/// `File` and `File-list` are distinct kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct ValueKind {
    base: BaseKind,
    list: bool,
}

impl ValueKind {
    pub const UNKNOWN: ValueKind = ValueKind::new(BaseKind::Unknown);

    pub const fn new(base: BaseKind) -> Self {
        Self { base, list: false }
    }

    /// The list-of-this variant.
    pub const fn list(self) -> Self {
        Self {
            base: self.base,
            list: true,
        }
    }

    /// The scalar variant.
    pub const fn scalar(self) -> Self {
        Self::new(self.base)
    }

    pub const fn base(self) -> BaseKind {
        self.base
    }

    pub const fn is_list(self) -> bool {
        self.list
    }

    /// True only for scalar `Unknown`.
    pub fn is_unknown(self) -> bool {
        self == Self::UNKNOWN
    }
}

impl From<BaseKind> for ValueKind {
    fn from(base: BaseKind) -> Self {
        Self::new(base)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.base.as_str())?;
        if self.list {
            f.write_str("-list")?;
        }
        Ok(())
    }
}

impl FromStr for ValueKind {
    type Err = SchemaError;

    /// Parses tags such as `file`, `target-name-list` or `Guid`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let (tag, list) = match lower.strip_suffix("-list") {
            Some(tag) => (tag, true),
            None => (lower.as_str(), false),
        };
        let base = BASE_KINDS
            .iter()
            .find(|(_, name)| *name == tag || name.replace('-', "") == tag)
            .map(|(kind, _)| *kind)
            .ok_or_else(|| SchemaError::UnknownValueKind(s.to_string()))?;
        Ok(ValueKind { base, list })
    }
}

const BOOL_VALUES: &[(&str, &str)] = &[("true", "True"), ("false", "False")];

const IMPORTANCE_VALUES: &[(&str, &str)] = &[
    ("high", "High importance, always logged"),
    ("normal", "Normal importance"),
    ("low", "Low importance, only logged at detailed verbosity"),
];

const CONTINUE_ON_ERROR_VALUES: &[(&str, &str)] = &[
    ("WarnAndContinue", "Log errors as warnings and continue executing"),
    ("true", "Same as WarnAndContinue"),
    ("ErrorAndContinue", "Log errors as errors and continue executing"),
    ("ErrorAndStop", "Log errors and stop executing the target"),
    ("false", "Same as ErrorAndStop"),
];

const TOOLS_VERSION_VALUES: &[(&str, &str)] = &[
    ("2.0", "MSBuild 2.0"),
    ("3.5", "MSBuild 3.5"),
    ("4.0", "MSBuild 4.0"),
    ("12.0", "MSBuild 12.0"),
    ("14.0", "MSBuild 14.0"),
    ("15.0", "MSBuild 15.0"),
    ("Current", "The current MSBuild version"),
];

fn constants(table: &[(&str, &str)]) -> Vec<BaseInfo> {
    table
        .iter()
        .map(|(name, desc)| BaseInfo::Constant(ConstantInfo::new(*name, *desc)))
        .collect()
}

/// Fixed value sets for enumerable kinds.
///
/// `Guid` yields a freshly generated GUID in braced upper-case form.
/// Returns `None` for kinds that are not simple enumerations.
pub fn simple_values(kind: ValueKind) -> Option<Vec<BaseInfo>> {
    if kind.is_list() {
        return None;
    }
    let values = match kind.base() {
        BaseKind::Bool => constants(BOOL_VALUES),
        BaseKind::Importance => constants(IMPORTANCE_VALUES),
        BaseKind::ContinueOnError => constants(CONTINUE_ON_ERROR_VALUES),
        BaseKind::ToolsVersion => constants(TOOLS_VERSION_VALUES),
        BaseKind::Guid => {
            let guid = uuid::Uuid::new_v4().braced().to_string().to_uppercase();
            vec![BaseInfo::Constant(ConstantInfo::new(
                SmolStr::new(guid),
                "New random GUID",
            ))]
        }
        _ => return None,
    };
    Some(values)
}

/// The simple value matching `value`, if `kind` is a simple enumeration.
pub fn known_value(kind: ValueKind, value: &str) -> Option<ConstantInfo> {
    let table = match kind.scalar().base() {
        BaseKind::Bool => BOOL_VALUES,
        BaseKind::Importance => IMPORTANCE_VALUES,
        BaseKind::ContinueOnError => CONTINUE_ON_ERROR_VALUES,
        BaseKind::ToolsVersion => TOOLS_VERSION_VALUES,
        _ => return None,
    };
    table
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(value))
        .map(|(name, desc)| ConstantInfo::new(*name, *desc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_is_distinct() {
        assert_ne!(BaseKind::File.kind(), BaseKind::File.list());
        assert_eq!(BaseKind::File.list().scalar(), BaseKind::File.kind());
    }

    #[test]
    fn test_parse_tags() {
        assert_eq!("file-list".parse::<ValueKind>().unwrap(), BaseKind::File.list());
        assert_eq!("TargetName".parse::<ValueKind>().unwrap(), BaseKind::TargetName.kind());
        assert_eq!(BaseKind::FileOrFolder.list().to_string(), "file-or-folder-list");
    }

    #[test]
    fn test_unknown_tag_is_error() {
        let err = "no-such-kind".parse::<ValueKind>().unwrap_err();
        assert!(matches!(err, SchemaError::UnknownValueKind(tag) if tag == "no-such-kind"));
    }

    #[test]
    fn test_simple_values() {
        let bools = simple_values(BaseKind::Bool.kind()).unwrap();
        let names: Vec<_> = bools.iter().map(|v| v.name().to_string()).collect();
        assert_eq!(names, ["true", "false"]);
        assert!(simple_values(BaseKind::File.kind()).is_none());
    }

    #[test]
    fn test_fresh_guid_is_braced_upper_case() {
        let guid = simple_values(BaseKind::Guid.kind()).unwrap();
        let name = guid[0].name();
        assert!(name.starts_with('{') && name.ends_with('}'));
        assert_eq!(name, name.to_uppercase());
        assert_eq!(name.len(), 38);
    }
}

//! Property, item and static function descriptors.
//!
//! Functions are never evaluated; these tables only back hover-style
//! lookups of a function or class name under the cursor.

use smol_str::SmolStr;

use super::info::{BaseInfo, ClassInfo, FunctionInfo};
use super::value_kind::{BaseKind, ValueKind};

/// Looks up function and class descriptors by name.
pub trait FunctionTypeProvider: Send + Sync {
    fn item_function_info(&self, name: &str) -> Option<BaseInfo>;

    fn static_property_function_info(&self, class: &str, name: &str) -> Option<BaseInfo>;

    /// A function called on a property whose value has kind `kind`.
    fn property_function_info(&self, kind: ValueKind, name: &str) -> Option<BaseInfo>;

    fn class_info(&self, name: &str) -> Option<BaseInfo>;

    fn enum_info(&self, name: &str) -> Option<BaseInfo>;
}

type FunctionRow = (&'static str, &'static str, ValueKind);

const ITEM_FUNCTIONS: &[FunctionRow] = &[
    ("Count", "Number of items", BaseKind::Int.kind()),
    ("Distinct", "Items with duplicate identities removed", BaseKind::UnknownItem.list()),
    ("DistinctWithCase", "Items with case-sensitive duplicate identities removed", BaseKind::UnknownItem.list()),
    ("Reverse", "Items in reverse order", BaseKind::UnknownItem.list()),
    ("AnyHaveMetadataValue", "Whether any item has the given metadata value", BaseKind::Bool.kind()),
    ("ClearMetadata", "Items with all custom metadata removed", BaseKind::UnknownItem.list()),
    ("HasMetadata", "Items that have the given metadata", BaseKind::UnknownItem.list()),
    ("Metadata", "Values of the given metadata", BaseKind::String.list()),
    ("WithMetadataValue", "Items whose metadata has the given value", BaseKind::UnknownItem.list()),
    ("DirectoryName", "Directory of each item", BaseKind::Folder.list()),
    ("Exists", "Items that exist on disk", BaseKind::UnknownItem.list()),
    ("FullPath", "Full path of each item", BaseKind::File.list()),
];

const STRING_FUNCTIONS: &[FunctionRow] = &[
    ("Contains", "Whether the value contains a string", BaseKind::Bool.kind()),
    ("EndsWith", "Whether the value ends with a string", BaseKind::Bool.kind()),
    ("IndexOf", "Index of the first occurrence of a string", BaseKind::Int.kind()),
    ("LastIndexOf", "Index of the last occurrence of a string", BaseKind::Int.kind()),
    ("Length", "Length of the value", BaseKind::Int.kind()),
    ("Replace", "Value with occurrences of a string replaced", BaseKind::String.kind()),
    ("Split", "Value split on a separator", BaseKind::String.list()),
    ("StartsWith", "Whether the value starts with a string", BaseKind::Bool.kind()),
    ("Substring", "Part of the value", BaseKind::String.kind()),
    ("ToLower", "Value in lower case", BaseKind::String.kind()),
    ("ToUpper", "Value in upper case", BaseKind::String.kind()),
    ("Trim", "Value with surrounding whitespace removed", BaseKind::String.kind()),
    ("TrimEnd", "Value with trailing characters removed", BaseKind::String.kind()),
    ("TrimStart", "Value with leading characters removed", BaseKind::String.kind()),
];

const CLASSES: &[(&str, &str, &[FunctionRow])] = &[
    (
        "MSBuild",
        "MSBuild intrinsic functions",
        &[
            ("Add", "Adds two numbers", BaseKind::Int.kind()),
            ("Subtract", "Subtracts two numbers", BaseKind::Int.kind()),
            ("EnsureTrailingSlash", "Appends a path separator if missing", BaseKind::FolderWithSlash.kind()),
            ("GetDirectoryNameOfFileAbove", "Nearest ancestor directory containing a file", BaseKind::Folder.kind()),
            ("GetPathOfFileAbove", "Path of a file in the nearest ancestor directory", BaseKind::File.kind()),
            ("MakeRelative", "Path relative to a base path", BaseKind::FileOrFolder.kind()),
            ("NormalizeDirectory", "Normalized directory path with trailing slash", BaseKind::FolderWithSlash.kind()),
            ("NormalizePath", "Normalized full path", BaseKind::FileOrFolder.kind()),
            ("ValueOrDefault", "A value, or a default if it is empty", BaseKind::String.kind()),
            ("VersionGreaterThan", "Compares two versions", BaseKind::Bool.kind()),
        ],
    ),
    (
        "System.IO.Path",
        "Path manipulation",
        &[
            ("Combine", "Combines path segments", BaseKind::FileOrFolder.kind()),
            ("GetDirectoryName", "Directory part of a path", BaseKind::Folder.kind()),
            ("GetExtension", "Extension of a path", BaseKind::Extension.kind()),
            ("GetFileName", "Filename of a path", BaseKind::Filename.kind()),
            ("GetFileNameWithoutExtension", "Filename of a path without the extension", BaseKind::Filename.kind()),
            ("GetFullPath", "Absolute form of a path", BaseKind::FileOrFolder.kind()),
        ],
    ),
    (
        "System.IO.File",
        "File queries",
        &[
            ("Exists", "Whether a file exists", BaseKind::Bool.kind()),
            ("ReadAllText", "Contents of a file", BaseKind::String.kind()),
        ],
    ),
    (
        "System.IO.Directory",
        "Directory queries",
        &[("Exists", "Whether a directory exists", BaseKind::Bool.kind())],
    ),
    (
        "System.String",
        "String functions",
        &[
            ("IsNullOrEmpty", "Whether a string is empty", BaseKind::Bool.kind()),
            ("IsNullOrWhiteSpace", "Whether a string is empty or whitespace", BaseKind::Bool.kind()),
            ("Concat", "Concatenates strings", BaseKind::String.kind()),
            ("Copy", "Copies a string", BaseKind::String.kind()),
        ],
    ),
    (
        "System.Environment",
        "Environment queries",
        &[
            ("GetFolderPath", "Path of a special folder", BaseKind::Folder.kind()),
            ("GetEnvironmentVariable", "Value of an environment variable", BaseKind::String.kind()),
            ("ProcessorCount", "Number of processors", BaseKind::Int.kind()),
        ],
    ),
    (
        "System.DateTime",
        "Date and time",
        &[("Now", "The current time", BaseKind::String.kind())],
    ),
    (
        "System.Guid",
        "GUID functions",
        &[("NewGuid", "A new random GUID", BaseKind::Guid.kind())],
    ),
];

const ENUMS: &[(&str, &str)] = &[
    ("System.Environment+SpecialFolder", "Special system folders"),
    ("System.StringComparison", "String comparison rules"),
];

fn function(row: &FunctionRow) -> BaseInfo {
    BaseInfo::Function(FunctionInfo {
        name: SmolStr::new_static(row.0),
        description: SmolStr::new_static(row.1),
        return_kind: row.2,
    })
}

fn find(rows: &[FunctionRow], name: &str) -> Option<BaseInfo> {
    rows.iter()
        .find(|row| row.0.eq_ignore_ascii_case(name))
        .map(function)
}

/// Function tables for MSBuild intrinsics, string functions and the
/// commonly used .NET classes.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuiltinFunctions;

impl FunctionTypeProvider for BuiltinFunctions {
    fn item_function_info(&self, name: &str) -> Option<BaseInfo> {
        find(ITEM_FUNCTIONS, name)
    }

    fn static_property_function_info(&self, class: &str, name: &str) -> Option<BaseInfo> {
        CLASSES
            .iter()
            .find(|(c, _, _)| c.eq_ignore_ascii_case(class))
            .and_then(|(_, _, rows)| find(rows, name))
    }

    fn property_function_info(&self, kind: ValueKind, name: &str) -> Option<BaseInfo> {
        // every scalar property value is a string at evaluation time
        if kind.is_list() {
            return None;
        }
        find(STRING_FUNCTIONS, name)
    }

    fn class_info(&self, name: &str) -> Option<BaseInfo> {
        CLASSES
            .iter()
            .find(|(c, _, _)| c.eq_ignore_ascii_case(name))
            .map(|(c, desc, _)| {
                BaseInfo::Class(ClassInfo {
                    name: SmolStr::new_static(*c),
                    description: SmolStr::new_static(*desc),
                })
            })
    }

    fn enum_info(&self, name: &str) -> Option<BaseInfo> {
        ENUMS
            .iter()
            .find(|(e, _)| e.eq_ignore_ascii_case(name))
            .map(|(e, desc)| {
                BaseInfo::Class(ClassInfo {
                    name: SmolStr::new_static(*e),
                    description: SmolStr::new_static(*desc),
                })
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_function_lookup() {
        let info = BuiltinFunctions
            .static_property_function_info("system.io.path", "combine")
            .unwrap();
        assert_eq!(info.name(), "Combine");
        assert_eq!(info.value_kind(), BaseKind::FileOrFolder.kind());
    }

    #[test]
    fn test_property_functions_need_scalar_value() {
        let scalar = BuiltinFunctions.property_function_info(ValueKind::UNKNOWN, "Replace");
        assert!(scalar.is_some());
        let list = BuiltinFunctions.property_function_info(BaseKind::File.list(), "Replace");
        assert!(list.is_none());
    }

    #[test]
    fn test_unknown_class() {
        assert!(BuiltinFunctions.class_info("System.Nope").is_none());
        assert!(BuiltinFunctions.class_info("MSBuild").is_some());
    }
}

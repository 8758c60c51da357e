//! Heuristic value kinds for schema entries that do not declare one.

use super::info::BaseInfo;
use super::value_kind::{BaseKind, ValueKind};

const BOOL_PREFIXES: &[&str] = &["Enable", "Disable", "Require", "Use", "Allow"];

/// Name suffixes, in precedence order.
const SUFFIXES: &[(&[&str], ValueKind)] = &[
    (&["Enabled", "Disabled", "Required"], BaseKind::Bool.kind()),
    (&["DependsOn"], BaseKind::TargetName.list()),
    (&["Paths"], BaseKind::FileOrFolder.list()),
    (&["Path"], BaseKind::FileOrFolder.kind()),
    (&["Directory", "Dir"], BaseKind::Folder.kind()),
    (&["Directories", "Dirs"], BaseKind::Folder.list()),
    (&["Files"], BaseKind::File.list()),
    (&["File"], BaseKind::File.kind()),
    (&["FileName"], BaseKind::Filename.kind()),
    (&["Url"], BaseKind::Url.kind()),
    (&["Ext"], BaseKind::Extension.kind()),
    (&["Guid"], BaseKind::Guid.kind()),
];

const ITEM_SELECTORS: &[&str] = &["Include", "Exclude", "Remove", "Update"];

/// `prefix` followed by an upper-case letter, e.g. `EnableFoo` but not `Enabled`.
fn has_word_prefix(name: &str, prefix: &str) -> bool {
    name.len() > prefix.len()
        && name.is_char_boundary(prefix.len())
        && name[..prefix.len()].eq_ignore_ascii_case(prefix)
        && name[prefix.len()..]
            .chars()
            .next()
            .is_some_and(char::is_uppercase)
}

fn has_suffix(name: &str, suffix: &str) -> bool {
    name.len() >= suffix.len()
        && name.is_char_boundary(name.len() - suffix.len())
        && name[name.len() - suffix.len()..].eq_ignore_ascii_case(suffix)
}

fn infer_from_name(name: &str) -> Option<ValueKind> {
    if BOOL_PREFIXES.iter().any(|p| has_word_prefix(name, p)) {
        return Some(BaseKind::Bool.kind());
    }
    SUFFIXES
        .iter()
        .find(|(suffixes, _)| suffixes.iter().any(|s| has_suffix(name, s)))
        .map(|(_, kind)| *kind)
}

/// The value kind of `info`, guessed from its name when it declares none.
///
/// A declared kind other than `Unknown` and `UnknownItem` is returned
/// unchanged. Values of unknown item types are assumed to be files.
pub fn infer_value_kind_if_unknown(info: &BaseInfo) -> ValueKind {
    let declared = info.value_kind();
    let unknown_item = declared.base() == BaseKind::UnknownItem;
    if !declared.is_unknown() && !unknown_item {
        return declared;
    }

    if let BaseInfo::Attribute(att) = info {
        if ITEM_SELECTORS.contains(&att.syntax.name) {
            return BaseKind::File.list();
        }
    }

    if unknown_item {
        return if declared.is_list() {
            BaseKind::File.list()
        } else {
            BaseKind::File.kind()
        };
    }

    let is_property = matches!(info, BaseInfo::Property(_));
    if is_property || matches!(info, BaseInfo::Metadata(_)) {
        if let Some(kind) = infer_from_name(info.name()) {
            return kind;
        }
    }

    // these must work without the common targets schema loaded
    if is_property {
        let name = info.name();
        if name.eq_ignore_ascii_case("configuration") {
            return BaseKind::Configuration.kind();
        }
        if name.eq_ignore_ascii_case("platform") {
            return BaseKind::Platform.kind();
        }
    }

    ValueKind::UNKNOWN
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{MetadataInfo, PropertyInfo};

    fn property(name: &str) -> BaseInfo {
        BaseInfo::Property(PropertyInfo::new(name, ""))
    }

    #[test]
    fn test_prefix_needs_following_upper_case() {
        assert_eq!(infer_value_kind_if_unknown(&property("EnableFoo")), BaseKind::Bool.kind());
        assert_eq!(infer_value_kind_if_unknown(&property("Username")), ValueKind::UNKNOWN);
        assert_eq!(infer_value_kind_if_unknown(&property("Disabled")), BaseKind::Bool.kind());
    }

    #[test]
    fn test_suffixes_are_case_insensitive() {
        assert_eq!(infer_value_kind_if_unknown(&property("OUTPUTPATH")), BaseKind::FileOrFolder.kind());
    }

    #[test]
    fn test_metadata_is_inferred() {
        let meta = BaseInfo::Metadata(MetadataInfo::new("HintFile", ""));
        assert_eq!(infer_value_kind_if_unknown(&meta), BaseKind::File.kind());
    }

    #[test]
    fn test_configuration_only_for_properties() {
        let meta = BaseInfo::Metadata(MetadataInfo::new("Configuration", ""));
        assert_eq!(infer_value_kind_if_unknown(&meta), ValueKind::UNKNOWN);
    }

    #[test]
    fn test_unknown_item_is_file() {
        let prop = BaseInfo::Property(
            PropertyInfo::new("Stuff", "").with_kind(BaseKind::UnknownItem.list()),
        );
        assert_eq!(infer_value_kind_if_unknown(&prop), BaseKind::File.list());
    }
}

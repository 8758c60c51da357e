//! Value kind inference through the registry.

use msbuild::schema::{
    BaseInfo, BaseKind, MetadataInfo, PropertyInfo, SchemaRegistry, ValueKind,
    infer_value_kind_if_unknown,
};
use rstest::rstest;

#[rstest]
#[case("EnableDefaultItems", BaseKind::Bool.kind())]
#[case("SignAssemblyRequired", BaseKind::Bool.kind())]
#[case("BuildDependsOn", BaseKind::TargetName.list())]
#[case("ReferencePaths", BaseKind::FileOrFolder.list())]
#[case("IntermediateDir", BaseKind::Folder.kind())]
#[case("ManifestFile", BaseKind::File.kind())]
#[case("ProjectUrl", BaseKind::Url.kind())]
#[case("ProjectGuid", BaseKind::Guid.kind())]
#[case("Configuration", BaseKind::Configuration.kind())]
#[case("Platform", BaseKind::Platform.kind())]
#[case("Title", ValueKind::UNKNOWN)]
fn test_property_name_heuristics(#[case] name: &str, #[case] expected: ValueKind) {
    let info = BaseInfo::Property(PropertyInfo::new(name, ""));
    assert_eq!(infer_value_kind_if_unknown(&info), expected);
}

#[test]
fn test_declared_kind_is_kept() {
    let registry = SchemaRegistry::builtin();
    for item in registry.items() {
        let kind = item.value_kind;
        if kind.is_unknown() || kind.base() == BaseKind::UnknownItem {
            continue;
        }
        assert_eq!(infer_value_kind_if_unknown(&BaseInfo::Item(item)), kind);
    }
    let declared = BaseInfo::Property(PropertyInfo::new("OutputPath", "").with_kind(BaseKind::Folder.kind()));
    assert_eq!(infer_value_kind_if_unknown(&declared), BaseKind::Folder.kind());
}

#[test]
fn test_metadata_heuristics_skip_platform_names() {
    let info = BaseInfo::Metadata(MetadataInfo::new("Platform", ""));
    assert_eq!(infer_value_kind_if_unknown(&info), ValueKind::UNKNOWN);
    let info = BaseInfo::Metadata(MetadataInfo::new("LinkPaths", ""));
    assert_eq!(infer_value_kind_if_unknown(&info), BaseKind::FileOrFolder.list());
}

//! Completion tests for the IDE layer.

use msbuild::ide::{AnalysisHost, CompletionConfig, CompletionKind, completions};
use rstest::rstest;
use tokio_util::sync::CancellationToken;

use crate::helpers::fixtures::PLATFORM_VALUE;
use crate::helpers::{doc_at, labels};

fn completions_at(text: &str) -> Vec<msbuild::ide::CompletionItem> {
    let (doc, offset) = doc_at("/proj/app.csproj", text);
    completions(&doc, offset, &CompletionConfig::default(), &CancellationToken::new()).unwrap()
}

// =============================================================================
// ELEMENTS
// =============================================================================

#[test]
fn test_empty_document_offers_project() {
    let items = completions_at("|");
    assert_eq!(labels(&items), vec!["Project"]);
    assert_eq!(items[0].kind, CompletionKind::Element);
}

#[test]
fn test_children_of_project() {
    let items = completions_at("<Project><P| /></Project>");
    let labels = labels(&items);
    assert!(labels.contains(&"PropertyGroup"), "got {:?}", labels);
    assert!(labels.contains(&"ItemGroup"), "got {:?}", labels);
    assert!(labels.contains(&"Target"), "got {:?}", labels);
}

#[test]
fn test_abstract_children_enumerate_items() {
    let items = completions_at("<Project><ItemGroup><C| /></ItemGroup></Project>");
    let labels = labels(&items);
    assert!(labels.contains(&"Compile"), "got {:?}", labels);
    assert!(items.iter().all(|i| i.kind == CompletionKind::Item));
}

// =============================================================================
// ATTRIBUTES
// =============================================================================

#[test]
fn test_item_outside_target_can_update() {
    let items = completions_at("<Project><ItemGroup><Compile | /></ItemGroup></Project>");
    let labels = labels(&items);
    assert!(labels.contains(&"Include"));
    assert!(labels.contains(&"Update"));
    assert!(!labels.contains(&"KeepMetadata"));
}

#[test]
fn test_item_inside_target_cannot_update() {
    let items = completions_at(
        "<Project><Target Name=\"T\"><ItemGroup><Compile | /></ItemGroup></Target></Project>",
    );
    let labels = labels(&items);
    assert!(labels.contains(&"Include"));
    assert!(labels.contains(&"KeepMetadata"));
    assert!(!labels.contains(&"Update"));
}

#[rstest]
#[case("<Project ToolsVersion=\"4.0\"><ItemGroup><Compile | /></ItemGroup></Project>", false)]
#[case("<Project Sdk=\"Microsoft.NET.Sdk\"><ItemGroup><Compile | /></ItemGroup></Project>", true)]
fn test_metadata_attributes_need_tools_version_15(#[case] text: &str, #[case] offered: bool) {
    let items = completions_at(text);
    let labels = labels(&items);
    assert!(labels.contains(&"Include"));
    assert_eq!(labels.contains(&"Link"), offered, "got {:?}", labels);
}

// =============================================================================
// VALUES
// =============================================================================

#[test]
fn test_platform_values_in_declaration_order() {
    let items = completions_at(PLATFORM_VALUE);
    assert_eq!(labels(&items), vec!["AnyCPU", "x64"]);
    assert!(items.iter().all(|i| i.kind == CompletionKind::Value));
}

#[test]
fn test_declared_property_keeps_schema_kind() {
    let items = completions_at("<Project><PropertyGroup><Optimize>|</Optimize></PropertyGroup></Project>");
    let mut labels = labels(&items);
    labels.sort();
    assert_eq!(labels, vec!["false", "true"]);
}

#[test]
fn test_target_framework_offers_short_names() {
    let items = completions_at(
        "<Project><PropertyGroup><TargetFramework>|</TargetFramework></PropertyGroup></Project>",
    );
    let labels = labels(&items);
    for expected in ["net472", "netstandard2.0", "net8.0"] {
        assert!(labels.contains(&expected), "{} missing from {:?}", expected, labels);
    }
    assert!(items.iter().all(|i| i.kind == CompletionKind::Framework));
}

#[rstest]
#[case("<Project><PropertyGroup><A>$(|</A></PropertyGroup></Project>", "Configuration", CompletionKind::Property)]
#[case("<Project><ItemGroup><A Include=\"@(|\" /></ItemGroup></Project>", "Compile", CompletionKind::Item)]
fn test_incomplete_reference(#[case] text: &str, #[case] expected: &str, #[case] kind: CompletionKind) {
    let items = completions_at(text);
    let item = items
        .iter()
        .find(|i| i.label.as_ref() == expected)
        .unwrap_or_else(|| panic!("{} missing from {:?}", expected, labels(&items)));
    assert_eq!(item.kind, kind);
}

#[test]
fn test_target_names_in_depends_on() {
    let items = completions_at(
        "<Project><Target Name=\"Build\" /><Target Name=\"Pack\" DependsOnTargets=\"|\" /></Project>",
    );
    let labels = labels(&items);
    assert!(labels.contains(&"Build"));
    assert!(labels.contains(&"Pack"));
}

#[test]
fn test_closing_tag_has_no_completions() {
    let items = completions_at("<Project><PropertyGroup></Prop|ertyGroup></Project>");
    assert!(items.is_empty());
}

#[test]
fn test_document_entries_sort_first() {
    let items = completions_at(
        "<Project><PropertyGroup><Zeta>1</Zeta><A>$(|</A></PropertyGroup></Project>",
    );
    let zeta = items.iter().position(|i| i.label.as_ref() == "Zeta").unwrap();
    let configuration = items.iter().position(|i| i.label.as_ref() == "Configuration").unwrap();
    assert!(zeta < configuration);
}

// =============================================================================
// THROUGH THE HOST
// =============================================================================

#[test]
fn test_host_completions_by_line_and_column() {
    let mut host = AnalysisHost::new();
    host.set_file_content("/proj/app.csproj", "<Project>\n  <ItemGroup>\n    <\n  </ItemGroup>\n</Project>");
    let analysis = host.analysis();
    let offset = analysis.offset("/proj/app.csproj", 2, 5).unwrap();
    let items = analysis.completions("/proj/app.csproj", offset).unwrap();
    assert!(labels(&items).contains(&"Compile"));
}

#[test]
fn test_cancelled_before_merge() {
    let mut host = AnalysisHost::new();
    host.set_file_content("/proj/app.csproj", "<Project><PropertyGroup><A>$(</A></PropertyGroup></Project>");
    let analysis = host.analysis();
    let cancel = CancellationToken::new();
    cancel.cancel();
    let offset = msbuild::TextSize::new(29);
    let items = analysis
        .completions_with_cancel("/proj/app.csproj", offset, &cancel)
        .unwrap();
    assert!(items.is_empty());
}

//! Resolved reference tests.

use msbuild::ide::AnalysisHost;
use msbuild::schema::{BaseInfo, Provenance};
use msbuild::TextSize;

fn resolved(text: &str) -> Option<BaseInfo> {
    let offset = text.find('|').unwrap();
    let source = text.replacen('|', "", 1);
    let mut host = AnalysisHost::new();
    host.set_file_content("/proj/app.csproj", &source);
    host.analysis()
        .resolved_reference("/proj/app.csproj", TextSize::new(offset as u32))
}

#[test]
fn test_target_from_document() {
    let info = resolved(
        "<Project><Target Name=\"Build\" /><Target Name=\"Pack\" DependsOnTargets=\"Bui|ld\" /></Project>",
    )
    .unwrap();
    assert!(matches!(info, BaseInfo::Target(_)));
    assert_eq!(info.name(), "Build");
    assert_eq!(info.provenance(), Provenance::Document);
}

#[test]
fn test_builtin_property() {
    let info = resolved("<Project><PropertyGroup><A>$(Configu|ration)</A></PropertyGroup></Project>")
        .unwrap();
    assert!(matches!(info, BaseInfo::Property(_)));
    assert_eq!(info.name(), "Configuration");
}

#[test]
fn test_nothing_outside_elements() {
    assert!(resolved("|<Project />").is_none());
}

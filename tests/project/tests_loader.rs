//! Loading projects and schemas from disk.

use msbuild::ide::AnalysisHost;
use msbuild::project::ProjectLoader;
use tempfile::TempDir;

use crate::helpers::fixtures::SDK_PROJECT;

fn workspace() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("src").join("lib")).unwrap();
    std::fs::write(dir.path().join("app.csproj"), SDK_PROJECT).unwrap();
    std::fs::write(dir.path().join("Directory.Build.props"), "<Project />").unwrap();
    std::fs::write(dir.path().join("src").join("lib").join("lib.vbproj"), "<Project />").unwrap();
    std::fs::write(dir.path().join("src").join("Program.cs"), "class P {}").unwrap();
    dir
}

#[test]
fn test_load_workspace_recursively() {
    let dir = workspace();
    let mut host = AnalysisHost::new();
    ProjectLoader::new()
        .load_directory_into_host(dir.path(), &mut host)
        .unwrap();

    assert_eq!(host.file_count(), 3);
    assert!(host.has_file(dir.path().join("src").join("lib").join("lib.vbproj")));
    assert!(!host.has_file(dir.path().join("src").join("Program.cs")));
}

#[test]
fn test_loaded_document_is_harvested() {
    let dir = workspace();
    let mut host = AnalysisHost::new();
    ProjectLoader::new()
        .load_directory_into_host(dir.path(), &mut host)
        .unwrap();

    let analysis = host.analysis();
    let doc = analysis.document(dir.path().join("app.csproj")).unwrap();
    assert_eq!(doc.registry().platforms(), vec!["AnyCPU", "x64"]);
    assert!(doc.registry().target("Build").is_some());
}

#[cfg(feature = "json-schema")]
#[test]
fn test_schemas_apply_to_loaded_documents() {
    let dir = workspace();
    let schemas = tempfile::tempdir().unwrap();
    std::fs::write(
        schemas.path().join("widgets.buildschema.json"),
        r#"{ "items": { "Widget": { "description": "A widget", "kind": "file" } } }"#,
    )
    .unwrap();
    std::fs::write(schemas.path().join("notes.json"), "not a schema").unwrap();

    let mut host = AnalysisHost::new();
    let loader = ProjectLoader::new();
    loader.load_directory_into_host(dir.path(), &mut host).unwrap();
    loader.load_schemas_from_directory(schemas.path(), &mut host).unwrap();

    assert_eq!(host.schemas().len(), 1);
    let analysis = host.analysis();
    let doc = analysis.document(dir.path().join("app.csproj")).unwrap();
    assert!(doc.registry().item("Widget").is_some());
}

#[cfg(feature = "json-schema")]
#[test]
fn test_bad_schema_is_reported() {
    let schemas = tempfile::tempdir().unwrap();
    std::fs::write(schemas.path().join("bad.buildschema.json"), "{ nope").unwrap();

    let mut host = AnalysisHost::new();
    let err = ProjectLoader::new()
        .load_schemas_from_directory(schemas.path(), &mut host)
        .unwrap_err();
    assert!(err.contains("bad.buildschema.json"));
    assert!(host.schemas().is_empty());
}

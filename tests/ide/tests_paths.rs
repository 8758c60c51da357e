//! File and folder completion tests.

use std::path::MAIN_SEPARATOR;
use std::sync::Arc;

use msbuild::MsBuildDocument;
use msbuild::expression::parse_expression;
use msbuild::ide::{
    CompletionConfig, CompletionKind, completions, evaluate_expression_as_paths, path_completions,
};
use msbuild::language::SdksDirectory;
use msbuild::project::StdFileSystem;
use msbuild::TextSize;
use tokio_util::sync::CancellationToken;

use crate::helpers::labels;

const CONFIGURATIONS: &str =
    "<Project><PropertyGroup><Configurations>Debug;Release</Configurations></PropertyGroup></Project>";

#[test]
fn test_template_expands_per_configuration() {
    let doc = MsBuildDocument::parse("/proj/app.csproj", CONFIGURATIONS);
    let expr = parse_expression(r"bin\$(Configuration)", TextSize::new(0));
    let paths: Vec<String> = evaluate_expression_as_paths(Some(&expr), &doc, 0, None)
        .iter()
        .collect();
    let sep = MAIN_SEPARATOR;
    assert_eq!(
        paths,
        vec![
            format!("{sep}proj{sep}bin{sep}Debug"),
            format!("{sep}proj{sep}bin{sep}Release"),
        ]
    );
}

#[test]
fn test_no_expression_is_the_base_directory() {
    let doc = MsBuildDocument::parse("/proj/app.csproj", "<Project />");
    let paths: Vec<String> = evaluate_expression_as_paths(None, &doc, 0, None).iter().collect();
    assert_eq!(paths, vec![doc.directory()]);

    let expr = parse_expression("", TextSize::new(0));
    let paths: Vec<String> = evaluate_expression_as_paths(Some(&expr), &doc, 1, Some("/base".into()))
        .iter()
        .collect();
    assert_eq!(paths, vec!["/base".to_string()]);
}

#[test]
fn test_path_completions_list_folders_then_files() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("src")).unwrap();
    std::fs::write(dir.path().join("a.cs"), "").unwrap();

    let base = dir.path().to_string_lossy().into_owned();
    let cancel = CancellationToken::new();
    let infos = path_completions(&[base.clone()], true, &StdFileSystem, true, &cancel);
    let names: Vec<&str> = infos.iter().map(|i| i.name()).collect();
    assert_eq!(names, vec!["src", "a.cs", ".."]);

    let folders = path_completions(&[base], false, &StdFileSystem, false, &cancel);
    let names: Vec<&str> = folders.iter().map(|i| i.name()).collect();
    assert_eq!(names, vec!["src"]);
}

#[test]
fn test_missing_base_is_skipped() {
    let cancel = CancellationToken::new();
    let infos = path_completions(
        &["/does/not/exist".to_string()],
        true,
        &StdFileSystem,
        false,
        &cancel,
    );
    assert!(infos.is_empty());
}

#[test]
fn test_include_value_completes_files() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("src")).unwrap();
    std::fs::write(dir.path().join("a.cs"), "").unwrap();

    let text = "<Project><ItemGroup><Compile Include=\"\" /></ItemGroup></Project>";
    let offset = TextSize::new(text.find("\"\"").unwrap() as u32 + 1);
    let doc = MsBuildDocument::parse(dir.path().join("app.csproj"), text)
        .with_file_system(Arc::new(StdFileSystem));
    let items = completions(&doc, offset, &CompletionConfig::default(), &CancellationToken::new())
        .unwrap();

    assert_eq!(labels(&items), vec!["src", "a.cs", ".."]);
    assert_eq!(items[0].kind, CompletionKind::Folder);
    assert_eq!(items[1].kind, CompletionKind::File);
}

#[test]
fn test_parent_directory_can_be_disabled() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.cs"), "").unwrap();

    let text = "<Project><ItemGroup><Compile Include=\"\" /></ItemGroup></Project>";
    let offset = TextSize::new(text.find("\"\"").unwrap() as u32 + 1);
    let doc = MsBuildDocument::parse(dir.path().join("app.csproj"), text);
    let config = CompletionConfig {
        include_parent_directory: false,
        ..CompletionConfig::default()
    };
    let items = completions(&doc, offset, &config, &CancellationToken::new()).unwrap();
    assert_eq!(labels(&items), vec!["a.cs"]);
}

#[test]
fn test_import_with_sdk_lists_the_sdk_directory() {
    let sdks = tempfile::tempdir().unwrap();
    let sdk_dir = sdks.path().join("My.Sdk").join("Sdk");
    std::fs::create_dir_all(&sdk_dir).unwrap();
    std::fs::write(sdk_dir.join("Sdk.props"), "<Project />").unwrap();
    let project = tempfile::tempdir().unwrap();
    std::fs::write(project.path().join("local.props"), "<Project />").unwrap();

    let text = "<Project><Import Project=\"\" Sdk=\"My.Sdk\" /></Project>";
    let offset = TextSize::new(text.find("\"\"").unwrap() as u32 + 1);
    let doc = MsBuildDocument::parse(project.path().join("app.csproj"), text)
        .with_runtime(Arc::new(SdksDirectory::new(sdks.path())));
    let items = completions(&doc, offset, &CompletionConfig::default(), &CancellationToken::new())
        .unwrap();

    assert_eq!(labels(&items), vec!["Sdk.props", ".."]);
}

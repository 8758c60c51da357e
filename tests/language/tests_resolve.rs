//! Resolution tests over whole documents.

use msbuild::language::{ReferenceKind, ResolvePosition, SyntaxKind, is_in_target, resolve};
use msbuild::TextSize;
use rstest::rstest;

use crate::helpers::doc_at;
use crate::helpers::fixtures::SDK_PROJECT;

#[rstest]
#[case("<Project><Target Name=\"T\"><ItemGroup><Comp|ile /></ItemGroup></Target></Project>", true)]
#[case("<Project><ItemGroup><Comp|ile /></ItemGroup></Project>", false)]
#[case("<Project><Target Name=\"T\"><PropertyGroup><Fo|o /></PropertyGroup></Target></Project>", true)]
fn test_is_in_target(#[case] text: &str, #[case] expected: bool) {
    let (doc, offset) = doc_at("/proj/app.csproj", text);
    let rr = resolve(&doc, offset).unwrap();
    let kind = rr.syntax_kind().unwrap();
    assert_eq!(is_in_target(doc.tree(), kind, rr.element), expected);
}

#[test]
fn test_metadata_in_target() {
    let (doc, offset) = doc_at(
        "/proj/app.csproj",
        "<Project><Target Name=\"T\"><ItemGroup><Compile><Li|nk /></Compile></ItemGroup></Target></Project>",
    );
    let rr = resolve(&doc, offset).unwrap();
    assert_eq!(rr.syntax_kind(), Some(SyntaxKind::Metadata));
    assert!(is_in_target(doc.tree(), SyntaxKind::Metadata, rr.element));
}

#[rstest]
#[case("<Project><ItemGroup><Compile Include=\"a.cs\" Link=\"x|\" /></ItemGroup></Project>")]
#[case("<Project><PropertyGroup><Out>bin\\$(Conf|iguration)</Out></PropertyGroup></Project>")]
#[case("<Project><Target Name=\"A\" DependsOnTargets=\"B;C|\" /></Project>")]
fn test_resolve_is_idempotent(#[case] text: &str) {
    let (doc, offset) = doc_at("/proj/app.csproj", text);
    assert_eq!(resolve(&doc, offset), resolve(&doc, offset));
}

#[test]
fn test_every_offset_resolves_without_panic() {
    let doc = msbuild::MsBuildDocument::parse("/proj/app.csproj", SDK_PROJECT);
    for offset in 0..=SDK_PROJECT.len() {
        if SDK_PROJECT.is_char_boundary(offset) {
            let _ = resolve(&doc, TextSize::new(offset as u32));
        }
    }
}

#[test]
fn test_item_reference_in_attribute() {
    let (doc, offset) = doc_at(
        "/proj/app.csproj",
        "<Project><Target Name=\"A\" Inputs=\"@(Comp|ile)\" /></Project>",
    );
    let rr = resolve(&doc, offset).unwrap();
    assert_eq!(rr.position, ResolvePosition::AttributeValue);
    assert_eq!(rr.reference_kind(), Some(ReferenceKind::Item));
}

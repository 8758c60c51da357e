//! Looking up the declaration behind a resolved reference.

use crate::frameworks::{
    BestGuessPolicy, best_guess_framework_identifier, best_guess_framework_profile,
    best_guess_framework_version, resolve_framework,
};
use crate::language::{Keyword, MsBuildDocument, Reference, ResolveResult, specialize_attribute};
use crate::schema::{BaseInfo, FunctionTypeProvider, builtin_property, well_known_metadata_info};

/// The info a reference names, if anything declares it.
///
/// Well-known metadata and reserved properties are answered before any
/// schema so a document cannot shadow them.
pub fn resolved_reference(
    rr: &ResolveResult,
    doc: &MsBuildDocument,
    functions: &dyn FunctionTypeProvider,
    policy: BestGuessPolicy,
) -> Option<BaseInfo> {
    let registry = doc.registry();
    let frameworks = doc.frameworks();
    match rr.reference.as_ref()? {
        Reference::Item(name) => registry.item(name).map(BaseInfo::Item),
        Reference::Metadata { item, metadata } => well_known_metadata_info(metadata)
            .cloned()
            .or_else(|| registry.metadata_info(item, metadata))
            .map(BaseInfo::Metadata),
        Reference::Property(name) => builtin_property(name)
            .cloned()
            .or_else(|| registry.property(name))
            .map(BaseInfo::Property),
        Reference::Task(name) => registry.task(name).map(BaseInfo::Task),
        Reference::Target(name) => registry.target(name).map(BaseInfo::Target),
        Reference::Keyword(Keyword::Element(el)) => Some(BaseInfo::Element(el)),
        Reference::Keyword(Keyword::Attribute(att)) => Some(BaseInfo::Attribute(
            specialize_attribute(att, &rr.element_name, registry),
        )),
        Reference::KnownValue(value) => Some(BaseInfo::Constant(value.clone())),
        Reference::TargetFramework(name) => resolve_framework(name).map(BaseInfo::Framework),
        Reference::TargetFrameworkIdentifier(id) => {
            best_guess_framework_identifier(id, frameworks, policy).map(BaseInfo::Framework)
        }
        Reference::TargetFrameworkVersion(version) => {
            best_guess_framework_version(version, frameworks, policy).map(BaseInfo::Framework)
        }
        Reference::TargetFrameworkProfile(profile) => {
            best_guess_framework_profile(profile, frameworks, policy).map(BaseInfo::Framework)
        }
        Reference::TaskParameter { task, parameter } => {
            registry.task_parameter(task, parameter).map(BaseInfo::TaskParameter)
        }
        // TODO: pick an overload once argument types are tracked
        Reference::ItemFunction(name) => functions.item_function_info(name),
        Reference::StaticPropertyFunction { class, name } => {
            functions.static_property_function_info(class, name)
        }
        Reference::PropertyFunction { kind, name } => functions.property_function_info(*kind, name),
        Reference::ClassName(name) => functions
            .class_info(name)
            .or_else(|| functions.enum_info(name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::TextSize;
    use crate::language::resolve;
    use crate::schema::BuiltinFunctions;

    fn lookup(text: &str) -> Option<BaseInfo> {
        let offset = text.find('|').unwrap();
        let source = text.replacen('|', "", 1);
        let doc = MsBuildDocument::parse("/proj/a.csproj", &source);
        let rr = resolve(&doc, TextSize::new(offset as u32))?;
        resolved_reference(&rr, &doc, &BuiltinFunctions, BestGuessPolicy::default())
    }

    #[test]
    fn test_reserved_property_comes_from_builtins() {
        let info = lookup("<Project><PropertyGroup><X>$(MSBuildProjectDirec|tory)</X></PropertyGroup></Project>")
            .unwrap();
        assert!(matches!(info, BaseInfo::Property(p) if p.is_reserved));
    }

    #[test]
    fn test_target_declared_in_document() {
        let info = lookup(
            "<Project><Target Name=\"Build\" /><Target Name=\"After\" DependsOnTargets=\"Bu|ild\" /></Project>",
        )
        .unwrap();
        assert_eq!(info.name(), "Build");
    }

    #[test]
    fn test_keyword_resolves_to_grammar() {
        let info = lookup("<Project><Ta|rget Name=\"A\" /></Project>").unwrap();
        assert!(matches!(info, BaseInfo::Element(el) if el.name == "Target"));
    }

    #[test]
    fn test_items_come_from_document_or_nowhere() {
        assert!(lookup("<Project><ItemGroup><Nope|Nope Include=\"x\" /></ItemGroup></Project>").is_some());
        assert!(lookup("<Project><PropertyGroup><X>@(Miss|ing)</X></PropertyGroup></Project>").is_none());
    }
}

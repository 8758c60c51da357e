//! Completion candidates for elements, attributes and values.

use std::sync::Arc;

use rustc_hash::FxHashSet;
use smol_str::SmolStr;
use tokio_util::sync::CancellationToken;

use super::config::CompletionConfig;
use super::paths::filename_completions;
use crate::base::TextSize;
use crate::expression::{ExpressionNode, parse_expression};
use crate::frameworks::{
    framework_identifiers, framework_profiles, framework_versions, frameworks_with_short_names,
};
use crate::language::{
    ElementSyntax, MsBuildDocument, ResolvePosition, ResolveResult, SyntaxKind, ToolsVersion, context_item,
    is_in_target, resolve, resolve_element, specialize_attribute, value_info,
};
use crate::schema::{
    BaseInfo, BaseKind, ConstantInfo, Provenance, Result, SchemaRegistry, ValueKind,
    infer_value_kind_if_unknown, simple_values,
};
use crate::syntax::XDocument;

/// Kind of completion item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompletionKind {
    Element,
    Attribute,
    Item,
    Property,
    Metadata,
    Task,
    TaskParameter,
    Target,
    Value,
    Framework,
    File,
    Folder,
    Function,
    Class,
}

impl CompletionKind {
    pub fn of(info: &BaseInfo) -> Self {
        match info {
            BaseInfo::Element(_) => CompletionKind::Element,
            BaseInfo::Attribute(_) => CompletionKind::Attribute,
            BaseInfo::Item(_) => CompletionKind::Item,
            BaseInfo::Property(_) => CompletionKind::Property,
            BaseInfo::Metadata(_) => CompletionKind::Metadata,
            BaseInfo::Task(_) => CompletionKind::Task,
            BaseInfo::TaskParameter(_) => CompletionKind::TaskParameter,
            BaseInfo::Target(_) => CompletionKind::Target,
            BaseInfo::Constant(_) => CompletionKind::Value,
            BaseInfo::Framework(_) => CompletionKind::Framework,
            BaseInfo::FileOrFolder(f) if f.is_folder => CompletionKind::Folder,
            BaseInfo::FileOrFolder(_) => CompletionKind::File,
            BaseInfo::Function(_) => CompletionKind::Function,
            BaseInfo::Class(_) => CompletionKind::Class,
        }
    }

    /// Convert to LSP completion item kind number.
    pub fn to_lsp(&self) -> u32 {
        match self {
            CompletionKind::Element => 14,       // Keyword
            CompletionKind::Attribute => 10,     // Property
            CompletionKind::Item => 7,           // Class
            CompletionKind::Property => 6,       // Variable
            CompletionKind::Metadata => 5,       // Field
            CompletionKind::Task => 2,           // Method
            CompletionKind::TaskParameter => 25, // TypeParameter
            CompletionKind::Target => 23,        // Event
            CompletionKind::Value => 12,         // Value
            CompletionKind::Framework => 9,      // Module
            CompletionKind::File => 17,          // File
            CompletionKind::Folder => 19,        // Folder
            CompletionKind::Function => 3,       // Function
            CompletionKind::Class => 22,         // Struct
        }
    }
}

/// A completion suggestion.
#[derive(Clone, Debug)]
pub struct CompletionItem {
    /// The text to insert.
    pub label: Arc<str>,
    /// The kind of completion.
    pub kind: CompletionKind,
    /// Detail text (shown after label).
    pub detail: Option<Arc<str>>,
    /// Documentation (shown in popup).
    pub documentation: Option<Arc<str>>,
    /// Sort priority (lower = higher priority).
    pub sort_priority: u32,
}

impl CompletionItem {
    pub fn new(label: impl Into<Arc<str>>, kind: CompletionKind) -> Self {
        Self {
            label: label.into(),
            kind,
            detail: None,
            documentation: None,
            sort_priority: 100,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<Arc<str>>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_documentation(mut self, doc: impl Into<Arc<str>>) -> Self {
        self.documentation = Some(doc.into());
        self
    }

    pub fn with_priority(mut self, priority: u32) -> Self {
        self.sort_priority = priority;
        self
    }

    /// Create from a descriptor.
    ///
    /// Declarations from the document sort before schema ones, which sort
    /// before builtins.
    pub fn from_info(info: &BaseInfo) -> Self {
        let mut item = Self::new(info.name(), CompletionKind::of(info));

        let kind = info.value_kind();
        let shows_kind = !matches!(
            info,
            BaseInfo::Element(_) | BaseInfo::Constant(_) | BaseInfo::FileOrFolder(_)
        );
        if shows_kind && !kind.is_unknown() && kind.base() != BaseKind::Nothing {
            item = item.with_detail(kind.to_string());
        }

        let description = info.description();
        if !description.is_empty() {
            item = item.with_documentation(description);
        }

        if let BaseInfo::FileOrFolder(f) = info {
            // folders first; the parent entry last
            let priority = match (f.is_folder, f.name.as_str()) {
                (true, "..") => 90,
                (true, _) => 10,
                (false, _) => 20,
            };
            return item.with_priority(priority);
        }
        match info.provenance() {
            Provenance::Document => item.with_priority(20),
            Provenance::Schema(_) => item.with_priority(50),
            Provenance::Builtin => item,
        }
    }
}

/// Child elements valid under the resolved element.
///
/// With no resolved grammar element only the root `Project` is offered.
/// Abstract children are replaced by what the registry enumerates for
/// their category.
pub fn element_completions(
    rr: Option<&ResolveResult>,
    registry: &SchemaRegistry,
) -> Result<Vec<BaseInfo>> {
    let Some((rr, element)) = rr.and_then(|rr| Some((rr, rr.language_element?))) else {
        return Ok(vec![BaseInfo::Element(ElementSyntax::project())]);
    };
    let mut infos = Vec::new();
    for child in element.children() {
        if child.is_abstract {
            infos.extend(registry.abstract_children(child.kind, &rr.element_name)?);
        } else {
            infos.push(BaseInfo::Element(child));
        }
    }
    Ok(infos)
}

/// Attributes valid on the resolved element.
///
/// Items inside a target cannot be updated, and only they may use
/// `KeepMetadata`, `RemoveMetadata` and `KeepDuplicates`.
/// Items also offer their metadata once the tools version allows it, and
/// task invocations offer the task's parameters.
pub fn attribute_completions(
    rr: &ResolveResult,
    tree: &XDocument,
    registry: &SchemaRegistry,
    tools_version: ToolsVersion,
    config: &CompletionConfig,
) -> Vec<BaseInfo> {
    let Some(element) = rr.language_element else {
        return Vec::new();
    };
    let is_item = element.kind == SyntaxKind::Item;
    let in_target = is_item && is_in_target(tree, element.kind, rr.element);

    let mut infos: Vec<BaseInfo> = element
        .attributes
        .iter()
        .filter(|att| !att.is_abstract)
        .filter(|att| {
            if !is_item {
                return true;
            }
            let target_only = matches!(
                att.kind,
                SyntaxKind::ItemKeepMetadata
                    | SyntaxKind::ItemRemoveMetadata
                    | SyntaxKind::ItemKeepDuplicates
            );
            if in_target {
                att.kind != SyntaxKind::ItemUpdate
            } else {
                !target_only
            }
        })
        .map(|att| BaseInfo::Attribute(specialize_attribute(att, &rr.element_name, registry)))
        .collect();

    if is_item && tools_version.is_at_least(config.metadata_attributes_since) {
        infos.extend(
            registry
                .metadata(&rr.element_name, false)
                .into_iter()
                .map(BaseInfo::Metadata),
        );
    }
    if element.kind == SyntaxKind::Task {
        infos.extend(
            registry
                .task_parameters(&rr.element_name)
                .into_iter()
                .map(BaseInfo::TaskParameter),
        );
    }
    infos
}

fn constants(values: Vec<SmolStr>) -> Vec<BaseInfo> {
    values
        .into_iter()
        .map(|v| BaseInfo::Constant(ConstantInfo::new(v, "")))
        .collect()
}

fn dedup_by_name(infos: impl IntoIterator<Item = BaseInfo>) -> Vec<BaseInfo> {
    let mut seen = FxHashSet::default();
    infos
        .into_iter()
        .filter(|info| seen.insert(info.name().to_ascii_lowercase()))
        .collect()
}

/// Candidate values of `kind`.
///
/// Returns `None` when `kind` has no completion strategy; an empty list
/// means the kind is completable but nothing is known.
pub fn value_completions(
    kind: ValueKind,
    doc: &MsBuildDocument,
    rr: Option<&ResolveResult>,
    trigger: Option<&ExpressionNode>,
    config: &CompletionConfig,
    cancel: &CancellationToken,
) -> Option<Vec<BaseInfo>> {
    if let Some(simple) = simple_values(kind.scalar()) {
        return Some(simple);
    }

    let registry = doc.registry();
    let infos = match kind.base() {
        BaseKind::TaskOutputParameterName => rr
            .and_then(|rr| rr.parent_name.as_deref())
            .map(|task| {
                registry
                    .task_parameters(task)
                    .into_iter()
                    .filter(|p| p.is_output)
                    .map(BaseInfo::TaskParameter)
                    .collect()
            })
            .unwrap_or_default(),
        BaseKind::TargetName => registry.targets().into_iter().map(BaseInfo::Target).collect(),
        BaseKind::PropertyName => registry
            .properties(true)
            .into_iter()
            .map(BaseInfo::Property)
            .collect(),
        BaseKind::ItemName => registry.items().into_iter().map(BaseInfo::Item).collect(),
        BaseKind::TargetFramework | BaseKind::TargetFrameworks => frameworks_with_short_names()
            .into_iter()
            .map(BaseInfo::Framework)
            .collect(),
        BaseKind::TargetFrameworkIdentifier => framework_identifiers()
            .into_iter()
            .map(BaseInfo::Framework)
            .collect(),
        BaseKind::TargetFrameworkVersion => dedup_by_name(
            doc.frameworks()
                .iter()
                .flat_map(|fw| framework_versions(&fw.identifier))
                .map(BaseInfo::Framework),
        ),
        BaseKind::TargetFrameworkProfile => dedup_by_name(
            doc.frameworks()
                .iter()
                .flat_map(|fw| framework_profiles(&fw.identifier, fw.version))
                .map(BaseInfo::Framework),
        ),
        BaseKind::Configuration => constants(registry.configurations()),
        BaseKind::Platform => constants(registry.platforms()),
        _ => return filename_completions(kind, doc, trigger, 0, rr, config, cancel),
    };
    Some(infos)
}

/// The raw text holding the value at the resolved position, with its start.
fn value_text(doc: &MsBuildDocument, rr: &ResolveResult, offset: TextSize) -> Option<(String, TextSize)> {
    let tree = doc.tree();
    match rr.position {
        ResolvePosition::AttributeValue => {
            let att = &tree.element(rr.element)?.attributes[rr.attribute?];
            let span = att.value_span?;
            Some((att.value.as_deref().unwrap_or_default().to_string(), span.start()))
        }
        ResolvePosition::Text => {
            let text = tree.children(rr.element).iter().copied().find_map(|child| {
                let node = tree.text(child)?;
                let span = tree.span(child);
                (span.start() <= offset && offset <= span.end())
                    .then(|| (node.text.to_string(), span.start()))
            });
            Some(text.unwrap_or_else(|| (String::new(), offset)))
        }
        _ => None,
    }
}

/// The text before `offset`, clamped to a character boundary.
fn typed_prefix(raw: &str, start: TextSize, offset: TextSize) -> &str {
    let mut end = usize::from(offset.checked_sub(start).unwrap_or_default()).min(raw.len());
    while !raw.is_char_boundary(end) {
        end -= 1;
    }
    &raw[..end]
}

/// Completions for a reference still being typed, as in `$(Fo` or `%(`.
fn reference_completions(
    node: &ExpressionNode,
    rr: &ResolveResult,
    registry: &SchemaRegistry,
) -> Option<Vec<BaseInfo>> {
    let infos = match node {
        ExpressionNode::Property(p) if !p.is_complete => registry
            .properties(true)
            .into_iter()
            .map(BaseInfo::Property)
            .collect(),
        ExpressionNode::Item(i) if !i.is_complete => {
            registry.items().into_iter().map(BaseInfo::Item).collect()
        }
        ExpressionNode::Metadata(m) if !m.is_complete => {
            let item = m.item_name.clone().unwrap_or_else(|| context_item(rr));
            registry
                .metadata(&item, true)
                .into_iter()
                .map(BaseInfo::Metadata)
                .collect()
        }
        _ => return None,
    };
    Some(infos)
}

fn value_position_completions(
    doc: &MsBuildDocument,
    rr: &ResolveResult,
    registry: &SchemaRegistry,
    offset: TextSize,
    config: &CompletionConfig,
    cancel: &CancellationToken,
) -> Option<Vec<BaseInfo>> {
    let (raw, start) = value_text(doc, rr, offset)?;
    let typed = typed_prefix(&raw, start, offset);
    let expr = parse_expression(typed, start);
    if let Some(found) = expr.find_at_offset(offset) {
        if let Some(infos) = reference_completions(found, rr, registry) {
            return Some(infos);
        }
    }

    let info = value_info(rr, registry)?;
    let kind = infer_value_kind_if_unknown(&info);

    // complete paths from the last separator of the current list entry
    let entry = expr.last_list_entry();
    let entry_start = entry.range().start();
    let tail = &typed[typed_prefix(typed, start, entry_start).len()..];
    let cut = tail.rfind(['\\', '/']).map_or(0, |i| i + 1);
    let trigger = parse_expression(&tail[..cut], entry_start);
    value_completions(kind, doc, Some(rr), Some(&trigger), config, cancel)
}

/// Presenter-ready completions at `offset`.
///
/// Errors only when the grammar and schema tables disagree.
pub fn completions(
    doc: &MsBuildDocument,
    offset: TextSize,
    config: &CompletionConfig,
    cancel: &CancellationToken,
) -> Result<Vec<CompletionItem>> {
    let registry = doc.registry().clone().with_cancellation(cancel.clone());
    let rr = resolve(doc, offset);

    let infos = match &rr {
        None => element_completions(None, &registry)?,
        Some(rr) => match rr.position {
            ResolvePosition::ElementName => {
                let parent = doc
                    .tree()
                    .parent_element(rr.element)
                    .and_then(|parent| resolve_element(doc, parent));
                element_completions(parent.as_ref(), &registry)?
            }
            ResolvePosition::Tag | ResolvePosition::AttributeName => attribute_completions(
                rr,
                doc.tree(),
                &registry,
                doc.tools_version(),
                config,
            ),
            ResolvePosition::AttributeValue | ResolvePosition::Text => {
                value_position_completions(doc, rr, &registry, offset, config, cancel)
                    .unwrap_or_default()
            }
            ResolvePosition::ClosingTag => Vec::new(),
        },
    };

    let mut items: Vec<CompletionItem> = infos.iter().map(CompletionItem::from_info).collect();
    items.sort_by_key(|item| item.sort_priority);
    let mut seen = FxHashSet::default();
    items.retain(|item| seen.insert(item.label.to_ascii_lowercase()));

    tracing::debug!(
        "{} completion(s) at {:?} ({:?})",
        items.len(),
        offset,
        rr.as_ref().map(|rr| rr.position)
    );
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FileOrFolderInfo;

    #[test]
    fn test_completion_item_from_info() {
        let registry = SchemaRegistry::builtin();
        let compile = registry.item("Compile").unwrap();
        let item = CompletionItem::from_info(&BaseInfo::Item(compile));
        assert_eq!(item.label.as_ref(), "Compile");
        assert_eq!(item.kind, CompletionKind::Item);
        assert!(item.documentation.is_some());
        assert_eq!(item.detail.as_deref(), Some("file-list"));
    }

    #[test]
    fn test_folders_sort_before_files() {
        let folder = CompletionItem::from_info(&BaseInfo::FileOrFolder(FileOrFolderInfo {
            name: "src".into(),
            is_folder: true,
            description: "/p/src".into(),
        }));
        let file = CompletionItem::from_info(&BaseInfo::FileOrFolder(FileOrFolderInfo {
            name: "a.cs".into(),
            is_folder: false,
            description: "/p/a.cs".into(),
        }));
        assert_eq!(folder.kind, CompletionKind::Folder);
        assert!(folder.sort_priority < file.sort_priority);
    }

    #[test]
    fn test_root_when_nothing_resolved() {
        let infos = element_completions(None, &SchemaRegistry::builtin()).unwrap();
        assert_eq!(infos.len(), 1);
        assert_eq!(infos[0].name(), "Project");
    }

    #[test]
    fn test_typed_prefix_clamps() {
        assert_eq!(typed_prefix("abc", TextSize::new(10), TextSize::new(12)), "ab");
        assert_eq!(typed_prefix("abc", TextSize::new(10), TextSize::new(5)), "");
        assert_eq!(typed_prefix("abc", TextSize::new(10), TextSize::new(20)), "abc");
    }

    #[test]
    fn test_completion_kind_to_lsp() {
        assert_eq!(CompletionKind::Element.to_lsp(), 14);
        assert_eq!(CompletionKind::File.to_lsp(), 17);
        assert_eq!(CompletionKind::Folder.to_lsp(), 19);
    }
}

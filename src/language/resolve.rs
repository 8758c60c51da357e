//! Reference resolution: what construct occupies an offset.
//!
//! [`resolve`] classifies the innermost element at an offset against the
//! grammar, works out whether the offset is on a name, an attribute, a
//! value or text content, and names the reference (item, property,
//! target, ...) under the cursor.

use smol_str::SmolStr;

use super::document::MsBuildDocument;
use super::syntax::{AttributeSyntax, ElementSyntax, SyntaxKind};
use crate::base::{TextRange, TextSize, range_touches};
use crate::expression::{ExpressionNode, FunctionTarget, parse_expression};
use crate::schema::{
    AttributeInfo, BaseInfo, BaseKind, ConstantInfo, MetadataInfo, PropertyInfo, SchemaRegistry,
    TaskParameterInfo, ValueKind, infer_value_kind_if_unknown, known_value,
};
use crate::syntax::{XDocument, XNodeId};

/// Where in the markup the offset falls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResolvePosition {
    /// On the name in a start tag, including a name not yet typed.
    ElementName,
    AttributeName,
    AttributeValue,
    /// Inside a start tag but not on an attribute.
    Tag,
    /// Element content.
    Text,
    ClosingTag,
}

/// A grammar keyword under the cursor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Keyword {
    Element(&'static ElementSyntax),
    Attribute(&'static AttributeSyntax),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    Item,
    Metadata,
    Property,
    Task,
    Target,
    Keyword,
    KnownValue,
    TargetFramework,
    TargetFrameworkIdentifier,
    TargetFrameworkVersion,
    TargetFrameworkProfile,
    TaskParameter,
    ItemFunction,
    StaticPropertyFunction,
    PropertyFunction,
    ClassName,
}

/// The thing named at the cursor, with the payload its kind needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reference {
    Item(SmolStr),
    Metadata { item: SmolStr, metadata: SmolStr },
    Property(SmolStr),
    Task(SmolStr),
    Target(SmolStr),
    Keyword(Keyword),
    KnownValue(ConstantInfo),
    TargetFramework(SmolStr),
    TargetFrameworkIdentifier(SmolStr),
    TargetFrameworkVersion(SmolStr),
    TargetFrameworkProfile(SmolStr),
    TaskParameter { task: SmolStr, parameter: SmolStr },
    ItemFunction(SmolStr),
    StaticPropertyFunction { class: SmolStr, name: SmolStr },
    /// A function called on a property value of kind `kind`.
    PropertyFunction { kind: ValueKind, name: SmolStr },
    ClassName(SmolStr),
}

impl Reference {
    pub fn kind(&self) -> ReferenceKind {
        match self {
            Reference::Item(_) => ReferenceKind::Item,
            Reference::Metadata { .. } => ReferenceKind::Metadata,
            Reference::Property(_) => ReferenceKind::Property,
            Reference::Task(_) => ReferenceKind::Task,
            Reference::Target(_) => ReferenceKind::Target,
            Reference::Keyword(_) => ReferenceKind::Keyword,
            Reference::KnownValue(_) => ReferenceKind::KnownValue,
            Reference::TargetFramework(_) => ReferenceKind::TargetFramework,
            Reference::TargetFrameworkIdentifier(_) => ReferenceKind::TargetFrameworkIdentifier,
            Reference::TargetFrameworkVersion(_) => ReferenceKind::TargetFrameworkVersion,
            Reference::TargetFrameworkProfile(_) => ReferenceKind::TargetFrameworkProfile,
            Reference::TaskParameter { .. } => ReferenceKind::TaskParameter,
            Reference::ItemFunction(_) => ReferenceKind::ItemFunction,
            Reference::StaticPropertyFunction { .. } => ReferenceKind::StaticPropertyFunction,
            Reference::PropertyFunction { .. } => ReferenceKind::PropertyFunction,
            Reference::ClassName(_) => ReferenceKind::ClassName,
        }
    }
}

/// What the cursor is inside of.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolveResult {
    pub element: XNodeId,
    pub element_name: SmolStr,
    pub parent_name: Option<SmolStr>,
    /// `None` when the element is outside the grammar.
    pub language_element: Option<&'static ElementSyntax>,
    /// Index into the element's attributes.
    pub attribute: Option<usize>,
    pub attribute_name: Option<SmolStr>,
    pub language_attribute: Option<&'static AttributeSyntax>,
    pub position: ResolvePosition,
    pub reference: Option<Reference>,
    pub reference_range: Option<TextRange>,
}

impl ResolveResult {
    pub fn syntax_kind(&self) -> Option<SyntaxKind> {
        self.language_element.map(|el| el.kind)
    }

    pub fn reference_kind(&self) -> Option<ReferenceKind> {
        self.reference.as_ref().map(Reference::kind)
    }
}

/// The grammar entry for an element, walking down from the root `Project`.
pub fn element_syntax(tree: &XDocument, id: XNodeId) -> Option<&'static ElementSyntax> {
    let mut chain: Vec<XNodeId> = tree.ancestors(id).collect();
    chain.reverse();
    chain.push(id);
    let mut chain = chain.into_iter();
    let root = chain.next()?;
    if !tree.element(root)?.name_is("Project") {
        return None;
    }
    chain.try_fold(ElementSyntax::project(), |syntax, node| {
        syntax.child_named(tree.element_name(node)?)
    })
}

/// Whether an element of `kind` sits inside a `Target`.
///
/// Metadata belongs to an item, an item or property to its group, and the
/// group is in a target when its parent is one.
pub fn is_in_target(tree: &XDocument, kind: SyntaxKind, element: XNodeId) -> bool {
    let steps = match kind {
        SyntaxKind::Metadata => 2,
        SyntaxKind::Property | SyntaxKind::Item => 1,
        SyntaxKind::ItemGroup | SyntaxKind::PropertyGroup => 0,
        _ => return false,
    };
    let mut group = Some(element);
    for _ in 0..steps {
        group = group.and_then(|el| tree.parent_element(el));
    }
    group
        .and_then(|el| tree.parent_element(el))
        .and_then(|parent| tree.element_name(parent))
        .is_some_and(|name| name.eq_ignore_ascii_case("Target"))
}

/// Classification of an element as a whole, with no position detail.
pub fn resolve_element(doc: &MsBuildDocument, id: XNodeId) -> Option<ResolveResult> {
    let tree = doc.tree();
    let el = tree.element(id)?;
    Some(ResolveResult {
        element: id,
        element_name: el.name.clone(),
        parent_name: tree
            .parent_element(id)
            .and_then(|p| tree.element_name(p))
            .map(SmolStr::new),
        language_element: element_syntax(tree, id),
        attribute: None,
        attribute_name: None,
        language_attribute: None,
        position: ResolvePosition::Text,
        reference: None,
        reference_range: None,
    })
}

/// Resolve the construct at `offset`.
///
/// Returns `None` when the offset is not inside any element.
pub fn resolve(doc: &MsBuildDocument, offset: TextSize) -> Option<ResolveResult> {
    let tree = doc.tree();
    let id = tree.innermost_element_at(offset)?;
    let el = tree.element(id)?;
    let mut rr = resolve_element(doc, id)?;

    let in_start_tag = offset < el.start_tag.end()
        || (!el.start_tag_closed && offset == el.start_tag.end());

    if range_touches(el.name_span, offset) {
        rr.position = ResolvePosition::ElementName;
        rr.reference = element_reference(&rr);
        rr.reference_range = Some(el.name_span);
    } else if in_start_tag {
        rr.position = ResolvePosition::Tag;
        if let Some(index) = tree.attribute_at(id, offset) {
            let att = &el.attributes[index];
            rr.attribute = Some(index);
            rr.attribute_name = Some(att.name.clone());
            rr.language_attribute = rr.language_element.and_then(|l| l.attribute(&att.name));
            if range_touches(att.name_span, offset) {
                rr.position = ResolvePosition::AttributeName;
                rr.reference = attribute_reference(&rr);
                rr.reference_range = Some(att.name_span);
            } else {
                rr.position = ResolvePosition::AttributeValue;
                if let (Some(value), Some(span)) = (&att.value, att.value_span) {
                    let found = value_reference(doc, &rr, value, span.start(), offset);
                    (rr.reference, rr.reference_range) = found.unzip();
                }
            }
        }
    } else if el
        .closing_tag
        .is_some_and(|tag| tag.start() < offset && offset <= tag.end())
    {
        rr.position = ResolvePosition::ClosingTag;
        rr.reference = element_reference(&rr);
        rr.reference_range = el.closing_tag;
    } else {
        rr.position = ResolvePosition::Text;
        let text_node = tree
            .children(id)
            .iter()
            .copied()
            .find(|&child| tree.text(child).is_some() && range_touches(tree.span(child), offset));
        if let Some(node) = text_node {
            let raw = tree.text(node).map(|t| t.text.clone()).unwrap_or_default();
            let found = value_reference(doc, &rr, &raw, tree.span(node).start(), offset);
            (rr.reference, rr.reference_range) = found.unzip();
        }
    }

    tracing::trace!(
        "resolved {:?} at {:?}: {:?} {:?}",
        rr.element_name,
        offset,
        rr.position,
        rr.reference_kind()
    );
    Some(rr)
}

fn element_reference(rr: &ResolveResult) -> Option<Reference> {
    let syntax = rr.language_element?;
    let name = rr.element_name.clone();
    let reference = match syntax.kind {
        SyntaxKind::Item | SyntaxKind::ItemDefinition => Reference::Item(name),
        SyntaxKind::Property => Reference::Property(name),
        SyntaxKind::Metadata => Reference::Metadata {
            item: rr.parent_name.clone().unwrap_or_default(),
            metadata: name,
        },
        SyntaxKind::Task => Reference::Task(name),
        SyntaxKind::Parameter => return None,
        _ => Reference::Keyword(Keyword::Element(syntax)),
    };
    Some(reference)
}

fn attribute_reference(rr: &ResolveResult) -> Option<Reference> {
    let att = rr.language_attribute?;
    if !att.is_abstract {
        return Some(Reference::Keyword(Keyword::Attribute(att)));
    }
    let name = rr.attribute_name.clone()?;
    match rr.syntax_kind()? {
        SyntaxKind::Item | SyntaxKind::ItemDefinition => Some(Reference::Metadata {
            item: rr.element_name.clone(),
            metadata: name,
        }),
        SyntaxKind::Task => Some(Reference::TaskParameter {
            task: rr.element_name.clone(),
            parameter: name,
        }),
        _ => None,
    }
}

/// The info whose value occupies the resolved position.
///
/// Item selection attributes take the kind declared for the item type;
/// properties, metadata and task parameters missing from every schema get
/// a bare descriptor so name-based inference still applies.
pub fn value_info(rr: &ResolveResult, registry: &SchemaRegistry) -> Option<BaseInfo> {
    let element = rr.language_element?;
    let name = rr.element_name.as_str();

    if let Some(att_name) = rr.attribute_name.as_deref() {
        let att = rr.language_attribute?;
        if att.is_abstract {
            return match element.kind {
                SyntaxKind::Item | SyntaxKind::ItemDefinition => Some(BaseInfo::Metadata(
                    registry
                        .metadata_info(name, att_name)
                        .unwrap_or_else(|| MetadataInfo::new(att_name, "").for_item(name)),
                )),
                SyntaxKind::Task => Some(BaseInfo::TaskParameter(
                    registry
                        .task_parameter(name, att_name)
                        .unwrap_or_else(|| TaskParameterInfo::new(name, att_name, "")),
                )),
                _ => None,
            };
        }
        return Some(BaseInfo::Attribute(specialize_attribute(att, name, registry)));
    }

    let info = match element.kind {
        SyntaxKind::Property => BaseInfo::Property(
            registry
                .property(name)
                .unwrap_or_else(|| PropertyInfo::new(name, "")),
        ),
        SyntaxKind::Metadata => {
            let item = rr.parent_name.as_deref().unwrap_or_default();
            BaseInfo::Metadata(
                registry
                    .metadata_info(item, name)
                    .unwrap_or_else(|| MetadataInfo::new(name, "").for_item(item)),
            )
        }
        _ => BaseInfo::Element(element),
    };
    Some(info)
}

/// An attribute of element `element_name`, typed for that element.
///
/// Item selection attributes hold values of the item type itself.
pub fn specialize_attribute(
    att: &'static AttributeSyntax,
    element_name: &str,
    registry: &SchemaRegistry,
) -> AttributeInfo {
    let mut info = AttributeInfo::new(att);
    if matches!(
        att.kind,
        SyntaxKind::ItemInclude | SyntaxKind::ItemExclude | SyntaxKind::ItemRemove | SyntaxKind::ItemUpdate
    ) {
        if let Some(item) = registry.item(element_name) {
            info.value_kind = item.value_kind;
        }
    }
    info
}

/// The item metadata without an item qualifier refers to.
pub(crate) fn context_item(rr: &ResolveResult) -> SmolStr {
    match rr.syntax_kind() {
        Some(SyntaxKind::Item | SyntaxKind::ItemDefinition) => rr.element_name.clone(),
        Some(SyntaxKind::Metadata) => rr.parent_name.clone().unwrap_or_default(),
        _ => SmolStr::default(),
    }
}

fn property_kind(registry: &SchemaRegistry, name: &str) -> ValueKind {
    let info = registry
        .property(name)
        .unwrap_or_else(|| PropertyInfo::new(name, ""));
    infer_value_kind_if_unknown(&BaseInfo::Property(info))
}

fn value_reference(
    doc: &MsBuildDocument,
    rr: &ResolveResult,
    raw: &str,
    base: TextSize,
    offset: TextSize,
) -> Option<(Reference, TextRange)> {
    let registry = doc.registry();
    let expr = parse_expression(raw, base);
    let node = expr.find_at_offset(offset)?;
    match node {
        ExpressionNode::Property(p) if !p.name.is_empty() => {
            Some((Reference::Property(p.name.clone()), p.name_range))
        }
        ExpressionNode::Item(i) if !i.name.is_empty() => Some((Reference::Item(i.name.clone()), i.name_range)),
        ExpressionNode::Metadata(m) if !m.metadata_name.is_empty() => Some((
            Reference::Metadata {
                item: m.item_name.clone().unwrap_or_else(|| context_item(rr)),
                metadata: m.metadata_name.clone(),
            },
            m.metadata_range,
        )),
        ExpressionNode::Function(f) if range_touches(f.name_range, offset) => {
            let reference = match &f.target {
                FunctionTarget::Property(prop) => Reference::PropertyFunction {
                    kind: property_kind(registry, prop),
                    name: f.name.clone(),
                },
                FunctionTarget::Class(class) => Reference::StaticPropertyFunction {
                    class: class.clone(),
                    name: f.name.clone(),
                },
                FunctionTarget::Item(_) => Reference::ItemFunction(f.name.clone()),
            };
            Some((reference, f.name_range))
        }
        ExpressionNode::Function(f) => {
            let reference = match &f.target {
                FunctionTarget::Property(prop) => Reference::Property(prop.clone()),
                FunctionTarget::Class(class) => Reference::ClassName(class.clone()),
                FunctionTarget::Item(item) => Reference::Item(item.clone()),
            };
            Some((reference, f.target_range))
        }
        ExpressionNode::Text(text) => {
            let info = value_info(rr, registry)?;
            let kind = infer_value_kind_if_unknown(&info);
            let value = text.unescaped_value();
            literal_reference(rr, kind, value.trim()).map(|r| (r, text.range))
        }
        _ => None,
    }
}

fn literal_reference(rr: &ResolveResult, kind: ValueKind, value: &str) -> Option<Reference> {
    if value.is_empty() {
        return None;
    }
    let v = SmolStr::new(value);
    let reference = match kind.base() {
        BaseKind::TargetName => Reference::Target(v),
        BaseKind::ItemName => Reference::Item(v),
        BaseKind::PropertyName => Reference::Property(v),
        BaseKind::TaskName => Reference::Task(v),
        BaseKind::MetadataName => Reference::Metadata {
            item: context_item(rr),
            metadata: v,
        },
        BaseKind::TargetFramework => Reference::TargetFramework(v),
        BaseKind::TargetFrameworkIdentifier => Reference::TargetFrameworkIdentifier(v),
        BaseKind::TargetFrameworkVersion => Reference::TargetFrameworkVersion(v),
        BaseKind::TargetFrameworkProfile => Reference::TargetFrameworkProfile(v),
        BaseKind::TaskOutputParameterName => Reference::TaskParameter {
            task: rr.parent_name.clone()?,
            parameter: v,
        },
        _ => Reference::KnownValue(known_value(kind, value)?),
    };
    Some(reference)
}

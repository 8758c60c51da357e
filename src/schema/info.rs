//! Descriptors for everything a completion or lookup can return.

use smol_str::SmolStr;

use super::value_kind::{BaseKind, ValueKind};
use crate::base::Name;
use crate::frameworks::NuGetFramework;
use crate::language::{AttributeSyntax, ElementSyntax};

/// Where a descriptor came from.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Provenance {
    #[default]
    Builtin,
    /// A user or package schema, by schema name.
    Schema(SmolStr),
    /// Declared in the project document itself.
    Document,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemInfo {
    pub name: Name,
    pub description: SmolStr,
    /// Kind of the `Include` value for this item type.
    pub value_kind: ValueKind,
    pub provenance: Provenance,
}

impl ItemInfo {
    pub fn new(name: impl Into<Name>, description: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            value_kind: BaseKind::UnknownItem.list(),
            provenance: Provenance::Builtin,
        }
    }

    pub fn with_kind(mut self, kind: ValueKind) -> Self {
        self.value_kind = kind;
        self
    }

    pub fn with_provenance(mut self, provenance: Provenance) -> Self {
        self.provenance = provenance;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyInfo {
    pub name: Name,
    pub description: SmolStr,
    pub value_kind: ValueKind,
    /// Set by MSBuild itself; cannot be assigned in a project.
    pub is_reserved: bool,
    pub default_value: Option<SmolStr>,
    pub provenance: Provenance,
}

impl PropertyInfo {
    pub fn new(name: impl Into<Name>, description: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            value_kind: ValueKind::UNKNOWN,
            is_reserved: false,
            default_value: None,
            provenance: Provenance::Builtin,
        }
    }

    pub fn with_kind(mut self, kind: ValueKind) -> Self {
        self.value_kind = kind;
        self
    }

    pub fn reserved(mut self) -> Self {
        self.is_reserved = true;
        self
    }

    pub fn with_provenance(mut self, provenance: Provenance) -> Self {
        self.provenance = provenance;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetadataInfo {
    pub name: Name,
    /// Owning item type; `None` for well-known metadata on every item.
    pub item: Option<Name>,
    pub description: SmolStr,
    pub value_kind: ValueKind,
    /// Well-known metadata computed by MSBuild (`FullPath`, `Filename`, ...).
    pub is_builtin: bool,
    pub provenance: Provenance,
}

impl MetadataInfo {
    pub fn new(name: impl Into<Name>, description: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            item: None,
            description: description.into(),
            value_kind: ValueKind::UNKNOWN,
            is_builtin: false,
            provenance: Provenance::Builtin,
        }
    }

    pub fn for_item(mut self, item: impl Into<Name>) -> Self {
        self.item = Some(item.into());
        self
    }

    pub fn with_kind(mut self, kind: ValueKind) -> Self {
        self.value_kind = kind;
        self
    }

    pub fn with_provenance(mut self, provenance: Provenance) -> Self {
        self.provenance = provenance;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskInfo {
    pub name: Name,
    pub description: SmolStr,
    pub provenance: Provenance,
}

impl TaskInfo {
    pub fn new(name: impl Into<Name>, description: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            provenance: Provenance::Builtin,
        }
    }

    pub fn with_provenance(mut self, provenance: Provenance) -> Self {
        self.provenance = provenance;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskParameterInfo {
    pub name: Name,
    pub task: Name,
    pub description: SmolStr,
    pub value_kind: ValueKind,
    pub is_output: bool,
    pub is_required: bool,
    pub provenance: Provenance,
}

impl TaskParameterInfo {
    pub fn new(
        task: impl Into<Name>,
        name: impl Into<Name>,
        description: impl Into<SmolStr>,
    ) -> Self {
        Self {
            name: name.into(),
            task: task.into(),
            description: description.into(),
            value_kind: ValueKind::UNKNOWN,
            is_output: false,
            is_required: false,
            provenance: Provenance::Builtin,
        }
    }

    pub fn with_kind(mut self, kind: ValueKind) -> Self {
        self.value_kind = kind;
        self
    }

    pub fn output(mut self) -> Self {
        self.is_output = true;
        self
    }

    pub fn required(mut self) -> Self {
        self.is_required = true;
        self
    }

    pub fn with_provenance(mut self, provenance: Provenance) -> Self {
        self.provenance = provenance;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TargetInfo {
    pub name: Name,
    pub description: SmolStr,
    pub provenance: Provenance,
}

impl TargetInfo {
    pub fn new(name: impl Into<Name>, description: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            provenance: Provenance::Builtin,
        }
    }

    pub fn with_provenance(mut self, provenance: Provenance) -> Self {
        self.provenance = provenance;
        self
    }
}

/// A literal value offered for an enumerable kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConstantInfo {
    pub name: SmolStr,
    pub description: SmolStr,
}

impl ConstantInfo {
    pub fn new(name: impl Into<SmolStr>, description: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// A target framework, named by whichever part of it was referenced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameworkInfo {
    pub name: SmolStr,
    pub framework: NuGetFramework,
}

impl FrameworkInfo {
    pub fn new(name: impl Into<SmolStr>, framework: NuGetFramework) -> Self {
        Self {
            name: name.into(),
            framework,
        }
    }
}

/// A directory entry offered by path completion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileOrFolderInfo {
    pub name: SmolStr,
    pub is_folder: bool,
    /// Full path of the entry, or a description for synthetic entries.
    pub description: SmolStr,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionInfo {
    pub name: SmolStr,
    pub description: SmolStr,
    pub return_kind: ValueKind,
}

/// A class usable in static property functions, or an enum type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassInfo {
    pub name: SmolStr,
    pub description: SmolStr,
}

/// A grammar attribute, with its value kind specialised for the element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeInfo {
    pub syntax: &'static AttributeSyntax,
    pub description: SmolStr,
    pub value_kind: ValueKind,
}

impl AttributeInfo {
    pub fn new(syntax: &'static AttributeSyntax) -> Self {
        Self {
            syntax,
            description: SmolStr::new_static(syntax.description),
            value_kind: syntax.value_kind,
        }
    }
}

/// Any descriptor a completion or lookup can produce.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BaseInfo {
    Element(&'static ElementSyntax),
    Attribute(AttributeInfo),
    Item(ItemInfo),
    Property(PropertyInfo),
    Metadata(MetadataInfo),
    Task(TaskInfo),
    TaskParameter(TaskParameterInfo),
    Target(TargetInfo),
    Constant(ConstantInfo),
    Framework(FrameworkInfo),
    FileOrFolder(FileOrFolderInfo),
    Function(FunctionInfo),
    Class(ClassInfo),
}

impl BaseInfo {
    pub fn name(&self) -> &str {
        match self {
            BaseInfo::Element(e) => e.name,
            BaseInfo::Attribute(a) => a.syntax.name,
            BaseInfo::Item(i) => i.name.as_str(),
            BaseInfo::Property(p) => p.name.as_str(),
            BaseInfo::Metadata(m) => m.name.as_str(),
            BaseInfo::Task(t) => t.name.as_str(),
            BaseInfo::TaskParameter(p) => p.name.as_str(),
            BaseInfo::Target(t) => t.name.as_str(),
            BaseInfo::Constant(c) => &c.name,
            BaseInfo::Framework(f) => &f.name,
            BaseInfo::FileOrFolder(f) => &f.name,
            BaseInfo::Function(f) => &f.name,
            BaseInfo::Class(c) => &c.name,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            BaseInfo::Element(e) => e.description,
            BaseInfo::Attribute(a) => &a.description,
            BaseInfo::Item(i) => &i.description,
            BaseInfo::Property(p) => &p.description,
            BaseInfo::Metadata(m) => &m.description,
            BaseInfo::Task(t) => &t.description,
            BaseInfo::TaskParameter(p) => &p.description,
            BaseInfo::Target(t) => &t.description,
            BaseInfo::Constant(c) => &c.description,
            BaseInfo::Framework(f) => f.framework.identifier.as_str(),
            BaseInfo::FileOrFolder(f) => &f.description,
            BaseInfo::Function(f) => &f.description,
            BaseInfo::Class(c) => &c.description,
        }
    }

    /// Declared kind of the value this construct holds.
    pub fn value_kind(&self) -> ValueKind {
        match self {
            BaseInfo::Element(e) => e.value_kind,
            BaseInfo::Attribute(a) => a.value_kind,
            BaseInfo::Item(i) => i.value_kind,
            BaseInfo::Property(p) => p.value_kind,
            BaseInfo::Metadata(m) => m.value_kind,
            BaseInfo::TaskParameter(p) => p.value_kind,
            BaseInfo::Function(f) => f.return_kind,
            BaseInfo::Task(_)
            | BaseInfo::Target(_)
            | BaseInfo::Constant(_)
            | BaseInfo::Framework(_)
            | BaseInfo::FileOrFolder(_)
            | BaseInfo::Class(_) => BaseKind::Nothing.kind(),
        }
    }

    pub fn provenance(&self) -> Provenance {
        match self {
            BaseInfo::Item(i) => i.provenance.clone(),
            BaseInfo::Property(p) => p.provenance.clone(),
            BaseInfo::Metadata(m) => m.provenance.clone(),
            BaseInfo::Task(t) => t.provenance.clone(),
            BaseInfo::TaskParameter(p) => p.provenance.clone(),
            BaseInfo::Target(t) => t.provenance.clone(),
            _ => Provenance::Builtin,
        }
    }
}

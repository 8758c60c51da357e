//! The MSBuild grammar: which elements may contain which, and which
//! attributes each element declares.
//!
//! Abstract entries are placeholders for schema-extensible categories
//! (any item, any property, any task). Lookups by name fall back to them
//! when no concrete entry matches.

use std::str::FromStr;

use crate::schema::{BaseKind, SchemaError, ValueKind};

macro_rules! syntax_kinds {
    ($($kind:ident),* $(,)?) => {
        /// Every element and attribute construct the grammar knows.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum SyntaxKind {
            $($kind),*
        }

        impl SyntaxKind {
            pub const ALL: &'static [SyntaxKind] = &[$(SyntaxKind::$kind),*];

            pub const fn as_str(self) -> &'static str {
                match self {
                    $(SyntaxKind::$kind => stringify!($kind)),*
                }
            }
        }
    };
}

syntax_kinds! {
    // elements
    Project,
    Choose,
    When,
    Otherwise,
    Import,
    ImportGroup,
    ItemGroup,
    Item,
    Metadata,
    ItemDefinitionGroup,
    ItemDefinition,
    PropertyGroup,
    Property,
    Target,
    Task,
    Output,
    OnError,
    UsingTask,
    ParameterGroup,
    Parameter,
    UsingTaskBody,
    ProjectExtensions,
    Sdk,
    // attributes
    ProjectSdk,
    ProjectToolsVersion,
    ProjectDefaultTargets,
    ProjectInitialTargets,
    ProjectTreatAsLocalProperty,
    ImportProject,
    ImportSdk,
    ImportVersion,
    ImportMinimumVersion,
    ItemInclude,
    ItemExclude,
    ItemRemove,
    ItemUpdate,
    ItemKeepMetadata,
    ItemRemoveMetadata,
    ItemKeepDuplicates,
    ItemMetadata,
    TargetName,
    TargetDependsOnTargets,
    TargetBeforeTargets,
    TargetAfterTargets,
    TargetInputs,
    TargetOutputs,
    TargetReturns,
    TargetKeepDuplicateOutputs,
    TaskContinueOnError,
    TaskParameter,
    OutputTaskParameter,
    OutputPropertyName,
    OutputItemName,
    OnErrorExecuteTargets,
    UsingTaskTaskName,
    UsingTaskAssemblyName,
    UsingTaskAssemblyFile,
    UsingTaskTaskFactory,
    UsingTaskArchitecture,
    UsingTaskRuntime,
    ParameterParameterType,
    ParameterOutput,
    ParameterRequired,
    UsingTaskBodyEvaluate,
    SdkName,
    SdkVersion,
    SdkMinimumVersion,
    Condition,
    Label,
}

impl FromStr for SyntaxKind {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SyntaxKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| SchemaError::UnknownSyntaxKind(s.to_string()))
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct AttributeSyntax {
    pub name: &'static str,
    pub kind: SyntaxKind,
    pub description: &'static str,
    pub value_kind: ValueKind,
    /// Stands for any attribute name, e.g. metadata on an item.
    pub is_abstract: bool,
}

#[derive(Debug, PartialEq, Eq)]
pub struct ElementSyntax {
    pub name: &'static str,
    pub kind: SyntaxKind,
    pub description: &'static str,
    pub children: &'static [SyntaxKind],
    pub attributes: &'static [AttributeSyntax],
    /// Stands for any element name in a schema category.
    pub is_abstract: bool,
    /// Kind of the element's text content.
    pub value_kind: ValueKind,
}

const fn att(
    name: &'static str,
    kind: SyntaxKind,
    value_kind: ValueKind,
    description: &'static str,
) -> AttributeSyntax {
    AttributeSyntax {
        name,
        kind,
        description,
        value_kind,
        is_abstract: false,
    }
}

const fn abstract_att(name: &'static str, kind: SyntaxKind, description: &'static str) -> AttributeSyntax {
    AttributeSyntax {
        name,
        kind,
        description,
        value_kind: ValueKind::UNKNOWN,
        is_abstract: true,
    }
}

const fn element(
    name: &'static str,
    kind: SyntaxKind,
    description: &'static str,
    children: &'static [SyntaxKind],
    attributes: &'static [AttributeSyntax],
) -> ElementSyntax {
    ElementSyntax {
        name,
        kind,
        description,
        children,
        attributes,
        is_abstract: false,
        value_kind: BaseKind::Nothing.kind(),
    }
}

const CONDITION: AttributeSyntax = att(
    "Condition",
    SyntaxKind::Condition,
    BaseKind::Condition.kind(),
    "Condition that must be true for this element to be evaluated",
);

const LABEL: AttributeSyntax = att(
    "Label",
    SyntaxKind::Label,
    BaseKind::String.kind(),
    "Label for the element, ignored by the build",
);

use SyntaxKind as K;

static ELEMENTS: &[ElementSyntax] = &[
    element(
        "Project",
        K::Project,
        "Root element of an MSBuild project",
        &[
            K::Choose,
            K::Import,
            K::ImportGroup,
            K::ItemGroup,
            K::ItemDefinitionGroup,
            K::PropertyGroup,
            K::Target,
            K::UsingTask,
            K::ProjectExtensions,
            K::Sdk,
        ],
        &[
            att("Sdk", K::ProjectSdk, BaseKind::Sdk.list(), "SDKs imported around the project"),
            att("ToolsVersion", K::ProjectToolsVersion, BaseKind::ToolsVersion.kind(), "Version of the toolset used to build the project"),
            att("DefaultTargets", K::ProjectDefaultTargets, BaseKind::TargetName.list(), "Targets built when none are specified"),
            att("InitialTargets", K::ProjectInitialTargets, BaseKind::TargetName.list(), "Targets run before any other target"),
            att("TreatAsLocalProperty", K::ProjectTreatAsLocalProperty, BaseKind::PropertyName.list(), "Global properties the project may override"),
        ],
    ),
    element(
        "Choose",
        K::Choose,
        "Groups When and Otherwise branches, of which the first true one is evaluated",
        &[K::When, K::Otherwise],
        &[],
    ),
    element(
        "When",
        K::When,
        "Branch of a Choose evaluated when its condition is true",
        &[K::Choose, K::ItemGroup, K::PropertyGroup],
        &[CONDITION],
    ),
    element(
        "Otherwise",
        K::Otherwise,
        "Branch of a Choose evaluated when no When condition is true",
        &[K::Choose, K::ItemGroup, K::PropertyGroup],
        &[],
    ),
    element(
        "Import",
        K::Import,
        "Imports the contents of another project file",
        &[],
        &[
            att("Project", K::ImportProject, BaseKind::ProjectFile.kind(), "Path of the project to import"),
            att("Sdk", K::ImportSdk, BaseKind::Sdk.kind(), "SDK in which to resolve the project path"),
            att("Version", K::ImportVersion, BaseKind::Version.kind(), "Version of the SDK"),
            att("MinimumVersion", K::ImportMinimumVersion, BaseKind::Version.kind(), "Minimum version of the SDK"),
            CONDITION,
            LABEL,
        ],
    ),
    element(
        "ImportGroup",
        K::ImportGroup,
        "Groups imports under one condition",
        &[K::Import],
        &[CONDITION, LABEL],
    ),
    element(
        "ItemGroup",
        K::ItemGroup,
        "Contains items",
        &[K::Item],
        &[CONDITION, LABEL],
    ),
    ElementSyntax {
        is_abstract: true,
        ..element(
            "Item",
            K::Item,
            "An item",
            &[K::Metadata],
            &[
                att("Include", K::ItemInclude, ValueKind::UNKNOWN, "Files or values to include in the item list"),
                att("Exclude", K::ItemExclude, ValueKind::UNKNOWN, "Files or values to exclude from the Include list"),
                att("Remove", K::ItemRemove, ValueKind::UNKNOWN, "Values to remove from the item list"),
                att("Update", K::ItemUpdate, ValueKind::UNKNOWN, "Existing items whose metadata to update"),
                att("KeepMetadata", K::ItemKeepMetadata, BaseKind::MetadataName.list(), "Metadata to keep, removing all other metadata"),
                att("RemoveMetadata", K::ItemRemoveMetadata, BaseKind::MetadataName.list(), "Metadata to remove"),
                att("KeepDuplicates", K::ItemKeepDuplicates, BaseKind::Bool.kind(), "Whether to add items that duplicate existing ones"),
                CONDITION,
                LABEL,
                abstract_att("Metadata", K::ItemMetadata, "Item metadata"),
            ],
        )
    },
    ElementSyntax {
        is_abstract: true,
        value_kind: ValueKind::UNKNOWN,
        ..element("Metadata", K::Metadata, "Item metadata", &[], &[CONDITION])
    },
    element(
        "ItemDefinitionGroup",
        K::ItemDefinitionGroup,
        "Contains default metadata for item types",
        &[K::ItemDefinition],
        &[CONDITION, LABEL],
    ),
    ElementSyntax {
        is_abstract: true,
        ..element(
            "ItemDefinition",
            K::ItemDefinition,
            "Default metadata for an item type",
            &[K::Metadata],
            &[CONDITION, LABEL],
        )
    },
    element(
        "PropertyGroup",
        K::PropertyGroup,
        "Contains properties",
        &[K::Property],
        &[CONDITION, LABEL],
    ),
    ElementSyntax {
        is_abstract: true,
        value_kind: ValueKind::UNKNOWN,
        ..element("Property", K::Property, "A property", &[], &[CONDITION])
    },
    element(
        "Target",
        K::Target,
        "A named sequence of tasks",
        &[K::Task, K::PropertyGroup, K::ItemGroup, K::OnError],
        &[
            att("Name", K::TargetName, BaseKind::TargetName.kind(), "Name of the target"),
            att("DependsOnTargets", K::TargetDependsOnTargets, BaseKind::TargetName.list(), "Targets that run before this one"),
            att("BeforeTargets", K::TargetBeforeTargets, BaseKind::TargetName.list(), "Targets this one runs before"),
            att("AfterTargets", K::TargetAfterTargets, BaseKind::TargetName.list(), "Targets this one runs after"),
            att("Inputs", K::TargetInputs, BaseKind::File.list(), "Files compared with Outputs to decide whether to skip the target"),
            att("Outputs", K::TargetOutputs, BaseKind::File.list(), "Files produced by the target"),
            att("Returns", K::TargetReturns, BaseKind::UnknownItem.list(), "Items returned to callers of the target"),
            att("KeepDuplicateOutputs", K::TargetKeepDuplicateOutputs, BaseKind::Bool.kind(), "Whether duplicate outputs are kept"),
            CONDITION,
            LABEL,
        ],
    ),
    ElementSyntax {
        is_abstract: true,
        ..element(
            "Task",
            K::Task,
            "A task invocation",
            &[K::Output],
            &[
                att("ContinueOnError", K::TaskContinueOnError, BaseKind::ContinueOnError.kind(), "What to do when the task fails"),
                CONDITION,
                abstract_att("Parameter", K::TaskParameter, "Task parameter"),
            ],
        )
    },
    element(
        "Output",
        K::Output,
        "Stores a task output parameter in a property or item",
        &[],
        &[
            att("TaskParameter", K::OutputTaskParameter, BaseKind::TaskOutputParameterName.kind(), "Output parameter of the task"),
            att("PropertyName", K::OutputPropertyName, BaseKind::PropertyName.kind(), "Property receiving the output"),
            att("ItemName", K::OutputItemName, BaseKind::ItemName.kind(), "Item receiving the output"),
            CONDITION,
        ],
    ),
    element(
        "OnError",
        K::OnError,
        "Runs targets when a task fails",
        &[],
        &[
            att("ExecuteTargets", K::OnErrorExecuteTargets, BaseKind::TargetName.list(), "Targets to run on failure"),
            CONDITION,
        ],
    ),
    element(
        "UsingTask",
        K::UsingTask,
        "Registers a task implementation",
        &[K::ParameterGroup, K::UsingTaskBody],
        &[
            att("TaskName", K::UsingTaskTaskName, BaseKind::TaskName.kind(), "Name of the task"),
            att("AssemblyName", K::UsingTaskAssemblyName, BaseKind::String.kind(), "Name of the assembly containing the task"),
            att("AssemblyFile", K::UsingTaskAssemblyFile, BaseKind::File.kind(), "Path of the assembly containing the task"),
            att("TaskFactory", K::UsingTaskTaskFactory, BaseKind::String.kind(), "Factory that creates the task"),
            att("Architecture", K::UsingTaskArchitecture, BaseKind::String.kind(), "Architecture the task runs on"),
            att("Runtime", K::UsingTaskRuntime, BaseKind::String.kind(), "Runtime the task runs on"),
            CONDITION,
        ],
    ),
    element(
        "ParameterGroup",
        K::ParameterGroup,
        "Declares the parameters of an inline task",
        &[K::Parameter],
        &[],
    ),
    ElementSyntax {
        is_abstract: true,
        ..element(
            "Parameter",
            K::Parameter,
            "An inline task parameter",
            &[],
            &[
                att("ParameterType", K::ParameterParameterType, BaseKind::String.kind(), "Type of the parameter"),
                att("Output", K::ParameterOutput, BaseKind::Bool.kind(), "Whether the parameter is an output"),
                att("Required", K::ParameterRequired, BaseKind::Bool.kind(), "Whether the parameter is required"),
            ],
        )
    },
    ElementSyntax {
        value_kind: BaseKind::String.kind(),
        ..element(
            "Task",
            K::UsingTaskBody,
            "Body of an inline task",
            &[],
            &[att("Evaluate", K::UsingTaskBodyEvaluate, BaseKind::Bool.kind(), "Whether properties and items in the body are expanded")],
        )
    },
    element(
        "ProjectExtensions",
        K::ProjectExtensions,
        "Arbitrary content ignored by the build",
        &[],
        &[],
    ),
    element(
        "Sdk",
        K::Sdk,
        "Imports an SDK around the project",
        &[],
        &[
            att("Name", K::SdkName, BaseKind::Sdk.kind(), "Name of the SDK"),
            att("Version", K::SdkVersion, BaseKind::Version.kind(), "Version of the SDK"),
            att("MinimumVersion", K::SdkMinimumVersion, BaseKind::Version.kind(), "Minimum version of the SDK"),
        ],
    ),
];

impl ElementSyntax {
    /// The grammar entry for an element kind. `None` for attribute kinds.
    pub fn get(kind: SyntaxKind) -> Option<&'static ElementSyntax> {
        ELEMENTS.iter().find(|el| el.kind == kind)
    }

    pub fn project() -> &'static ElementSyntax {
        &ELEMENTS[0]
    }

    pub fn children(&self) -> impl Iterator<Item = &'static ElementSyntax> + '_ {
        self.children.iter().filter_map(|&kind| ElementSyntax::get(kind))
    }

    pub fn abstract_child(&self) -> Option<&'static ElementSyntax> {
        self.children().find(|child| child.is_abstract)
    }

    pub fn abstract_attribute(&'static self) -> Option<&'static AttributeSyntax> {
        self.attributes.iter().find(|att| att.is_abstract)
    }

    /// The child construct an element named `name` resolves to.
    ///
    /// Concrete children match by name first; anything else is the abstract
    /// child, if the element has one.
    pub fn child_named(&self, name: &str) -> Option<&'static ElementSyntax> {
        self.children()
            .find(|child| !child.is_abstract && child.name.eq_ignore_ascii_case(name))
            .or_else(|| self.abstract_child())
    }

    /// The attribute construct an attribute named `name` resolves to.
    pub fn attribute(&'static self, name: &str) -> Option<&'static AttributeSyntax> {
        self.attributes
            .iter()
            .find(|att| !att.is_abstract && att.name.eq_ignore_ascii_case(name))
            .or_else(|| self.abstract_attribute())
    }
}

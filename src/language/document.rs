//! Document snapshots.
//!
//! An [`MsBuildDocument`] is immutable: the parsed tree, the declarations
//! harvested from it and the capabilities queries need. Editing a file
//! produces a new snapshot.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;
use smol_str::SmolStr;

use super::sdk::{RuntimeInformation, SdksDirectory};
use super::syntax::{ElementSyntax, SyntaxKind};
use crate::base::Name;
use crate::evaluation::{EvaluationContext, PermutationEvaluator};
use crate::frameworks::NuGetFramework;
use crate::project::{DirectoryListing, StdFileSystem};
use crate::schema::{
    ItemInfo, MetadataInfo, MsBuildSchema, PropertyInfo, Provenance, SchemaRegistry, TargetInfo,
    TaskInfo, TaskParameterInfo, builtin_schema,
};
use crate::syntax::{XDocument, XNodeId, parse_document};

/// Toolset version declared by a project.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ToolsVersion {
    #[default]
    Unknown,
    V2_0,
    V3_5,
    V4_0,
    V12_0,
    V14_0,
    V15_0,
    Current,
}

impl ToolsVersion {
    pub fn parse(text: &str) -> Self {
        match text.trim() {
            "2.0" => ToolsVersion::V2_0,
            "3.5" => ToolsVersion::V3_5,
            "4.0" => ToolsVersion::V4_0,
            "12.0" => ToolsVersion::V12_0,
            "14.0" => ToolsVersion::V14_0,
            "15.0" => ToolsVersion::V15_0,
            t if t.eq_ignore_ascii_case("current") => ToolsVersion::Current,
            _ => ToolsVersion::Unknown,
        }
    }

    /// An unknown version is never at least anything.
    pub fn is_at_least(self, other: ToolsVersion) -> bool {
        self != ToolsVersion::Unknown && self >= other
    }
}

impl fmt::Display for ToolsVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ToolsVersion::Unknown => "Unknown",
            ToolsVersion::V2_0 => "2.0",
            ToolsVersion::V3_5 => "3.5",
            ToolsVersion::V4_0 => "4.0",
            ToolsVersion::V12_0 => "12.0",
            ToolsVersion::V14_0 => "14.0",
            ToolsVersion::V15_0 => "15.0",
            ToolsVersion::Current => "Current",
        })
    }
}

/// Declarations a document makes about itself.
///
/// The most specific schema source in the document's registry.
#[derive(Clone, Debug, Default)]
pub struct DocumentSchema {
    items: Vec<ItemInfo>,
    properties: Vec<PropertyInfo>,
    metadata: IndexMap<Name, Vec<MetadataInfo>>,
    tasks: Vec<TaskInfo>,
    task_parameters: IndexMap<Name, Vec<TaskParameterInfo>>,
    targets: Vec<TargetInfo>,
    /// Literal values seen for each property, in document order.
    property_values: IndexMap<Name, Vec<SmolStr>>,
    /// Values declared through plural properties and conditions only.
    declared_values: IndexMap<Name, Vec<SmolStr>>,
    frameworks: Vec<NuGetFramework>,
    tools_version: ToolsVersion,
}

impl DocumentSchema {
    pub fn harvest(tree: &XDocument) -> Self {
        let mut harvester = Harvester::default();
        if let Some(root) = tree.root_element() {
            if tree.element(root).is_some_and(|el| el.name_is("Project")) {
                harvester.visit(tree, root, ElementSyntax::project());
            }
        }
        let schema = harvester.finish();
        tracing::debug!(
            "harvested {} properties, {} items, {} targets, {} frameworks",
            schema.properties.len(),
            schema.items.len(),
            schema.targets.len(),
            schema.frameworks.len()
        );
        schema
    }

    pub fn property_values(&self) -> &IndexMap<Name, Vec<SmolStr>> {
        &self.property_values
    }

    fn declared_values_of(&self, property: &str) -> &[SmolStr] {
        self.declared_values
            .get(&Name::new(property))
            .map_or(&[][..], Vec::as_slice)
    }

    pub fn frameworks(&self) -> &[NuGetFramework] {
        &self.frameworks
    }

    pub fn tools_version(&self) -> ToolsVersion {
        self.tools_version
    }
}

impl MsBuildSchema for DocumentSchema {
    fn name(&self) -> &str {
        "document"
    }

    fn items(&self) -> &[ItemInfo] {
        &self.items
    }

    fn properties(&self) -> &[PropertyInfo] {
        &self.properties
    }

    fn metadata(&self, item: &str) -> &[MetadataInfo] {
        self.metadata
            .get(&Name::new(item))
            .map_or(&[][..], Vec::as_slice)
    }

    fn tasks(&self) -> &[TaskInfo] {
        &self.tasks
    }

    fn task_parameters(&self, task: &str) -> &[TaskParameterInfo] {
        self.task_parameters
            .get(&Name::new(task))
            .map_or(&[][..], Vec::as_slice)
    }

    fn targets(&self) -> &[TargetInfo] {
        &self.targets
    }

    fn configurations(&self) -> &[SmolStr] {
        self.declared_values_of("Configuration")
    }

    fn platforms(&self) -> &[SmolStr] {
        self.declared_values_of("Platform")
    }
}

/// Plural properties whose `;`-separated values feed the singular one.
const PLURAL_PROPERTIES: &[(&str, &str)] = &[
    ("Configurations", "Configuration"),
    ("Platforms", "Platform"),
    ("TargetFrameworks", "TargetFramework"),
];

fn is_literal(value: &str) -> bool {
    !value.is_empty() && !value.contains(['$', '@', '%'])
}

/// Concatenated text content of an element.
fn element_text(tree: &XDocument, id: XNodeId) -> String {
    let text: String = tree
        .children(id)
        .iter()
        .filter_map(|&child| tree.text(child))
        .map(|text| text.decoded())
        .collect();
    text.trim().to_string()
}

/// `'$(Configuration)|$(Platform)'` on the left of `==`, unquoted.
fn last_quoted(text: &str) -> Option<&str> {
    let text = text.trim_end().strip_suffix('\'')?;
    let start = text.rfind('\'')?;
    Some(&text[start + 1..])
}

fn first_quoted(text: &str) -> Option<&str> {
    let text = text.trim_start().strip_prefix('\'')?;
    let end = text.find('\'')?;
    Some(&text[..end])
}

fn push_unique(values: &mut Vec<SmolStr>, value: &str) {
    if !values.iter().any(|v| v.eq_ignore_ascii_case(value)) {
        values.push(SmolStr::new(value));
    }
}

/// Task invocations are named by the last segment of a qualified name.
fn short_task_name(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name).trim()
}

#[derive(Default)]
struct Harvester {
    items: IndexMap<Name, ItemInfo>,
    properties: IndexMap<Name, PropertyInfo>,
    metadata: IndexMap<Name, IndexMap<Name, MetadataInfo>>,
    tasks: IndexMap<Name, TaskInfo>,
    task_parameters: IndexMap<Name, IndexMap<Name, TaskParameterInfo>>,
    targets: IndexMap<Name, TargetInfo>,
    property_values: IndexMap<Name, Vec<SmolStr>>,
    declared_values: IndexMap<Name, Vec<SmolStr>>,
    tools_version: Option<ToolsVersion>,
    sdk_style: bool,
}

impl Harvester {
    fn visit(&mut self, tree: &XDocument, id: XNodeId, syntax: &'static ElementSyntax) {
        let Some(el) = tree.element(id) else { return };
        if let Some(condition) = el.attribute("Condition").and_then(|att| att.value.as_deref()) {
            self.harvest_condition(condition);
        }

        match syntax.kind {
            SyntaxKind::Project => {
                if let Some(tv) = el.attribute("ToolsVersion").and_then(|att| att.value.as_deref()) {
                    self.tools_version = Some(ToolsVersion::parse(tv));
                }
                if el
                    .attribute("Sdk")
                    .and_then(|att| att.value.as_deref())
                    .is_some_and(|sdk| !sdk.trim().is_empty())
                {
                    self.sdk_style = true;
                }
            }
            SyntaxKind::Sdk => self.sdk_style = true,
            SyntaxKind::Property => {
                self.add_property(&el.name, &element_text(tree, id));
            }
            SyntaxKind::Item | SyntaxKind::ItemDefinition => {
                self.add_item(&el.name);
                for att in &el.attributes {
                    if syntax.attribute(&att.name).is_some_and(|a| a.is_abstract) {
                        self.add_metadata(&el.name, &att.name);
                    }
                }
            }
            SyntaxKind::Metadata => {
                if let Some(item) = tree.parent_element(id).and_then(|p| tree.element_name(p)) {
                    self.add_metadata(item, &el.name);
                }
            }
            SyntaxKind::Target => {
                if let Some(name) = el.attribute("Name").and_then(|att| att.value.as_deref()) {
                    self.add_target(name);
                }
            }
            SyntaxKind::UsingTask => self.harvest_using_task(tree, id),
            SyntaxKind::Task => {
                let task = el.name.clone();
                self.add_task(&task);
                for att in &el.attributes {
                    if syntax.attribute(&att.name).is_some_and(|a| a.is_abstract) {
                        self.add_task_parameter(&task, &att.name, false);
                    }
                }
                for output in tree.child_elements(id) {
                    let Some(out) = tree.element(output) else { continue };
                    if !out.name_is("Output") {
                        continue;
                    }
                    if let Some(param) = out.attribute("TaskParameter").and_then(|a| a.value.as_deref()) {
                        self.add_task_parameter(&task, param.trim(), true);
                    }
                }
            }
            _ => {}
        }

        for child in tree.child_elements(id) {
            let Some(name) = tree.element_name(child) else { continue };
            if let Some(child_syntax) = syntax.child_named(name) {
                self.visit(tree, child, child_syntax);
            }
        }
    }

    fn harvest_using_task(&mut self, tree: &XDocument, id: XNodeId) {
        let Some(el) = tree.element(id) else { return };
        let Some(task_name) = el.attribute("TaskName").and_then(|att| att.value.as_deref()) else {
            return;
        };
        let task = short_task_name(task_name);
        if task.is_empty() {
            return;
        }
        self.add_task(task);
        for group in tree.child_elements(id) {
            if !tree.element(group).is_some_and(|g| g.name_is("ParameterGroup")) {
                continue;
            }
            for param in tree.child_elements(group) {
                let Some(p) = tree.element(param) else { continue };
                let flag = |name: &str| {
                    p.attribute(name)
                        .and_then(|att| att.value.as_deref())
                        .is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
                };
                let mut info = TaskParameterInfo::new(task, p.name.as_str(), "")
                    .with_provenance(Provenance::Document);
                if flag("Output") {
                    info = info.output();
                }
                if flag("Required") {
                    info = info.required();
                }
                self.task_parameters
                    .entry(Name::new(task))
                    .or_default()
                    .insert(Name::new(&p.name), info);
            }
        }
    }

    /// Record `'$(A)|$(B)' == 'x|y'` comparisons as property values.
    fn harvest_condition(&mut self, condition: &str) {
        let mut rest = condition;
        while let Some(eq) = rest.find("==") {
            let left = &rest[..eq];
            rest = &rest[eq + 2..];
            let (Some(lhs), Some(rhs)) = (last_quoted(left), first_quoted(rest)) else {
                continue;
            };
            let names: Vec<&str> = lhs.split('|').collect();
            let values: Vec<&str> = rhs.split('|').collect();
            if names.len() != values.len() {
                continue;
            }
            for (name, value) in names.into_iter().zip(values) {
                let property = name
                    .trim()
                    .strip_prefix("$(")
                    .and_then(|n| n.strip_suffix(')'))
                    .map(str::trim);
                if let Some(property) = property {
                    self.declare_value(property, value.trim());
                }
            }
        }
    }

    fn add_property(&mut self, name: &str, value: &str) {
        let info = self
            .properties
            .entry(Name::new(name))
            .or_insert_with(|| PropertyInfo::new(name, "").with_provenance(Provenance::Document));
        if info.default_value.is_none() && is_literal(value) {
            info.default_value = Some(SmolStr::new(value));
        }

        if let Some((_, singular)) = PLURAL_PROPERTIES
            .iter()
            .find(|(plural, _)| plural.eq_ignore_ascii_case(name))
        {
            if is_literal(value) {
                for part in value.split(';') {
                    self.declare_value(singular, part.trim());
                }
            }
        }
        self.add_property_value(name, value);
    }

    /// A value the project explicitly offers for `name`.
    ///
    /// Singular property text is not a declaration: it may be the value
    /// being typed.
    fn declare_value(&mut self, name: &str, value: &str) {
        if !is_literal(value) || name.is_empty() {
            return;
        }
        push_unique(self.declared_values.entry(Name::new(name)).or_default(), value);
        self.add_property_value(name, value);
    }

    fn add_property_value(&mut self, name: &str, value: &str) {
        if !is_literal(value) || name.is_empty() {
            return;
        }
        push_unique(self.property_values.entry(Name::new(name)).or_default(), value);
    }

    fn add_item(&mut self, name: &str) {
        self.items
            .entry(Name::new(name))
            .or_insert_with(|| ItemInfo::new(name, "").with_provenance(Provenance::Document));
    }

    fn add_metadata(&mut self, item: &str, name: &str) {
        self.metadata
            .entry(Name::new(item))
            .or_default()
            .entry(Name::new(name))
            .or_insert_with(|| {
                MetadataInfo::new(name, "")
                    .for_item(item)
                    .with_provenance(Provenance::Document)
            });
    }

    fn add_target(&mut self, name: &str) {
        let name = name.trim();
        if name.is_empty() {
            return;
        }
        self.targets
            .entry(Name::new(name))
            .or_insert_with(|| TargetInfo::new(name, "").with_provenance(Provenance::Document));
    }

    fn add_task(&mut self, name: &str) {
        self.tasks
            .entry(Name::new(name))
            .or_insert_with(|| TaskInfo::new(name, "").with_provenance(Provenance::Document));
    }

    fn add_task_parameter(&mut self, task: &str, name: &str, is_output: bool) {
        if name.is_empty() {
            return;
        }
        let info = self
            .task_parameters
            .entry(Name::new(task))
            .or_default()
            .entry(Name::new(name))
            .or_insert_with(|| {
                TaskParameterInfo::new(task, name, "").with_provenance(Provenance::Document)
            });
        info.is_output |= is_output;
    }

    fn finish(self) -> DocumentSchema {
        let frameworks = self
            .property_values
            .get(&Name::new("TargetFramework"))
            .into_iter()
            .flatten()
            .filter_map(|tfm| NuGetFramework::parse_folder(tfm))
            .collect();
        let tools_version = match self.tools_version {
            Some(tv) => tv,
            None if self.sdk_style => ToolsVersion::V15_0,
            None => ToolsVersion::Unknown,
        };
        DocumentSchema {
            items: self.items.into_values().collect(),
            properties: self.properties.into_values().collect(),
            metadata: self
                .metadata
                .into_iter()
                .map(|(item, metadata)| (item, metadata.into_values().collect()))
                .collect(),
            tasks: self.tasks.into_values().collect(),
            task_parameters: self
                .task_parameters
                .into_iter()
                .map(|(task, params)| (task, params.into_values().collect()))
                .collect(),
            targets: self.targets.into_values().collect(),
            property_values: self.property_values,
            declared_values: self.declared_values,
            frameworks,
            tools_version,
        }
    }
}

/// A parsed project with its harvested declarations and capabilities.
#[derive(Clone)]
pub struct MsBuildDocument {
    path: PathBuf,
    tree: XDocument,
    schema: Arc<DocumentSchema>,
    user_schemas: Vec<Arc<dyn MsBuildSchema>>,
    registry: SchemaRegistry,
    evaluation: Arc<dyn EvaluationContext>,
    /// Set by `with_evaluation`; schema changes then leave it alone.
    custom_evaluation: bool,
    runtime: Arc<dyn RuntimeInformation>,
    file_system: Arc<dyn DirectoryListing>,
}

impl MsBuildDocument {
    pub fn new(path: impl Into<PathBuf>, tree: XDocument) -> Self {
        let schema = Arc::new(DocumentSchema::harvest(&tree));
        let evaluation = Arc::new(PermutationEvaluator::default());
        let mut doc = Self {
            path: path.into(),
            tree,
            registry: SchemaRegistry::default(),
            schema,
            user_schemas: Vec::new(),
            evaluation,
            custom_evaluation: false,
            runtime: Arc::new(SdksDirectory::from_env()),
            file_system: Arc::new(StdFileSystem),
        };
        doc.rebuild_registry();
        doc
    }

    pub fn parse(path: impl Into<PathBuf>, text: &str) -> Self {
        Self::new(path, parse_document(text))
    }

    /// Additional schema sources, consulted after the document itself and
    /// before the builtins.
    pub fn with_schemas(mut self, schemas: Vec<Arc<dyn MsBuildSchema>>) -> Self {
        self.user_schemas = schemas;
        self.rebuild_registry();
        self
    }

    pub fn with_runtime(mut self, runtime: Arc<dyn RuntimeInformation>) -> Self {
        self.runtime = runtime;
        self
    }

    pub fn with_file_system(mut self, file_system: Arc<dyn DirectoryListing>) -> Self {
        self.file_system = file_system;
        self
    }

    pub fn with_evaluation(mut self, evaluation: Arc<dyn EvaluationContext>) -> Self {
        self.evaluation = evaluation;
        self.custom_evaluation = true;
        self
    }

    fn rebuild_registry(&mut self) {
        let document: Arc<dyn MsBuildSchema> = self.schema.clone();
        let builtin: Arc<dyn MsBuildSchema> = builtin_schema();
        let mut sources = Vec::with_capacity(self.user_schemas.len() + 2);
        sources.push(document);
        sources.extend(self.user_schemas.iter().cloned());
        sources.push(builtin);
        self.registry = SchemaRegistry::new(sources);
        if !self.custom_evaluation {
            self.evaluation = Arc::new(self.permutation_evaluator());
        }
    }

    /// Document property values, with the configurations and platforms of
    /// every schema source appended.
    fn permutation_evaluator(&self) -> PermutationEvaluator {
        let mut evaluator = PermutationEvaluator::new(self.schema.property_values().clone());
        let declared = [
            ("Configuration", self.registry.configurations()),
            ("Platform", self.registry.platforms()),
        ];
        for (property, extra) in declared {
            let mut values = evaluator.values(property).to_vec();
            for value in extra {
                if !values.iter().any(|v| v.eq_ignore_ascii_case(&value)) {
                    values.push(value);
                }
            }
            if !values.is_empty() {
                evaluator.set(property, values);
            }
        }
        evaluator
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory containing the document, `.` for a bare file name.
    pub fn directory(&self) -> String {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_string_lossy().into_owned(),
            _ => ".".to_string(),
        }
    }

    pub fn tree(&self) -> &XDocument {
        &self.tree
    }

    pub fn schema(&self) -> &DocumentSchema {
        &self.schema
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    pub fn tools_version(&self) -> ToolsVersion {
        self.schema.tools_version()
    }

    pub fn frameworks(&self) -> &[NuGetFramework] {
        self.schema.frameworks()
    }

    pub fn evaluation(&self) -> &dyn EvaluationContext {
        self.evaluation.as_ref()
    }

    pub fn runtime(&self) -> &dyn RuntimeInformation {
        self.runtime.as_ref()
    }

    pub fn file_system(&self) -> &dyn DirectoryListing {
        self.file_system.as_ref()
    }
}

impl fmt::Debug for MsBuildDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MsBuildDocument")
            .field("path", &self.path)
            .field("nodes", &self.tree.node_count())
            .field("tools_version", &self.tools_version())
            .field("schemas", &self.registry)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROJECT: &str = r#"<Project Sdk="Microsoft.NET.Sdk">
  <PropertyGroup>
    <TargetFrameworks>net472;net8.0</TargetFrameworks>
    <Configurations>Debug;Release</Configurations>
    <OutputPath>bin\$(Configuration)</OutputPath>
  </PropertyGroup>
  <PropertyGroup Condition="'$(Configuration)|$(Platform)' == 'Debug|x64'">
    <DebugType>full</DebugType>
  </PropertyGroup>
  <ItemGroup>
    <Widget Include="a.w" Size="3">
      <Color>red</Color>
    </Widget>
  </ItemGroup>
  <UsingTask TaskName="My.Tasks.Frob" AssemblyFile="frob.dll">
    <ParameterGroup>
      <Result Output="true" />
    </ParameterGroup>
  </UsingTask>
  <Target Name="Go">
    <Frob Input="x">
      <Output TaskParameter="Result" PropertyName="R" />
    </Frob>
  </Target>
</Project>"#;

    fn schema() -> DocumentSchema {
        DocumentSchema::harvest(&parse_document(PROJECT))
    }

    #[test]
    fn test_harvest_properties_and_values() {
        let schema = schema();
        assert!(schema.property("OutputPath").is_some());
        // non-literal values are not recorded
        assert!(schema.property("OutputPath").unwrap().default_value.is_none());
        assert_eq!(schema.configurations(), ["Debug", "Release"]);
        assert_eq!(schema.platforms(), ["x64"]);
    }

    #[test]
    fn test_harvest_items_and_metadata() {
        let schema = schema();
        assert!(schema.item("widget").is_some());
        assert!(schema.metadata_info("Widget", "Size").is_some());
        assert!(schema.metadata_info("Widget", "Color").is_some());
        assert!(schema.metadata_info("Widget", "Include").is_none());
    }

    #[test]
    fn test_harvest_tasks_and_targets() {
        let schema = schema();
        assert!(schema.target("Go").is_some());
        assert!(schema.task("Frob").is_some());
        assert!(schema.task_parameter("Frob", "Result").unwrap().is_output);
        assert!(!schema.task_parameter("Frob", "Input").unwrap().is_output);
    }

    #[test]
    fn test_frameworks_and_tools_version() {
        let schema = schema();
        let names: Vec<String> = schema.frameworks().iter().map(|f| f.short_name()).collect();
        assert_eq!(names, vec!["net472", "net8.0"]);
        assert_eq!(schema.tools_version(), ToolsVersion::V15_0);

        let legacy = DocumentSchema::harvest(&parse_document(r#"<Project ToolsVersion="4.0"/>"#));
        assert_eq!(legacy.tools_version(), ToolsVersion::V4_0);
        assert!(!ToolsVersion::Unknown.is_at_least(ToolsVersion::V2_0));
        assert!(ToolsVersion::Current.is_at_least(ToolsVersion::V15_0));
    }

    #[test]
    fn test_registry_order() {
        let doc = MsBuildDocument::parse("/src/app/app.csproj", PROJECT);
        let names: Vec<&str> = doc.registry().sources().iter().map(|s| s.name()).collect();
        assert_eq!(names.first(), Some(&"document"));
        assert_eq!(names.len(), 2);
        assert!(doc.directory().ends_with("app"));
        assert_eq!(MsBuildDocument::parse("x.proj", "").directory(), ".");
    }

    #[test]
    fn test_singular_property_text_is_not_declared() {
        let tree = parse_document(
            "<Project><PropertyGroup><Platforms>AnyCPU;x64</Platforms><Platform>A</Platform></PropertyGroup></Project>",
        );
        let schema = DocumentSchema::harvest(&tree);
        assert_eq!(schema.platforms(), ["AnyCPU", "x64"]);
        // still a value for evaluation
        assert_eq!(schema.property_values()[&Name::new("Platform")], ["AnyCPU", "x64", "A"]);
    }

    struct PlatformSchema;

    impl MsBuildSchema for PlatformSchema {
        fn name(&self) -> &str {
            "platforms"
        }
        fn items(&self) -> &[ItemInfo] {
            &[]
        }
        fn properties(&self) -> &[PropertyInfo] {
            &[]
        }
        fn metadata(&self, _item: &str) -> &[MetadataInfo] {
            &[]
        }
        fn tasks(&self) -> &[TaskInfo] {
            &[]
        }
        fn task_parameters(&self, _task: &str) -> &[TaskParameterInfo] {
            &[]
        }
        fn targets(&self) -> &[TargetInfo] {
            &[]
        }
        fn platforms(&self) -> &[SmolStr] {
            const PLATFORMS: &[SmolStr] = &[SmolStr::new_static("ARM64")];
            PLATFORMS
        }
    }

    #[test]
    fn test_schema_platforms_expand_in_templates() {
        let doc = MsBuildDocument::parse(
            "/proj/app.csproj",
            "<Project><PropertyGroup><Platforms>x64</Platforms></PropertyGroup></Project>",
        );
        let before: Vec<String> = doc.evaluation().evaluate_path_with_permutation("$(Platform)", "").collect();
        assert_eq!(before, vec!["x64"]);

        let doc = doc.with_schemas(vec![Arc::new(PlatformSchema)]);
        let after: Vec<String> = doc.evaluation().evaluate_path_with_permutation("$(Platform)", "").collect();
        assert_eq!(after, vec!["x64", "ARM64"]);
    }
}

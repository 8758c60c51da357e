//! The built-in schema: reserved and common properties, well-known
//! metadata, common items, tasks and targets.

use std::sync::{Arc, LazyLock};

use indexmap::IndexMap;

use super::info::{
    ItemInfo, MetadataInfo, PropertyInfo, TargetInfo, TaskInfo, TaskParameterInfo,
};
use super::source::MsBuildSchema;
use super::value_kind::{BaseKind, ValueKind};
use crate::base::Name;

pub struct BuiltinSchema {
    items: Vec<ItemInfo>,
    properties: Vec<PropertyInfo>,
    metadata: IndexMap<Name, Vec<MetadataInfo>>,
    tasks: Vec<TaskInfo>,
    task_parameters: IndexMap<Name, Vec<TaskParameterInfo>>,
    targets: Vec<TargetInfo>,
}

static BUILTIN: LazyLock<Arc<BuiltinSchema>> = LazyLock::new(|| Arc::new(BuiltinSchema::build()));

static WELL_KNOWN_METADATA: LazyLock<Vec<MetadataInfo>> = LazyLock::new(|| {
    use BaseKind::*;
    [
        ("FullPath", "The full path of the item", File),
        ("RootDir", "The root directory of the item", Folder),
        ("Filename", "The filename of the item, without the extension", Filename),
        ("Extension", "The file extension of the item", Extension),
        ("RelativeDir", "The path specified in the Include attribute, up to the final separator", Folder),
        ("Directory", "The directory of the item, without the root directory", Folder),
        ("RecursiveDir", "The path matched by a `**` wildcard in the Include attribute", Folder),
        ("Identity", "The item specified in the Include attribute", String),
        ("ModifiedTime", "The time the item was last modified", String),
        ("CreatedTime", "The time the item was created", String),
        ("AccessedTime", "The time the item was last accessed", String),
        ("DefiningProjectFullPath", "The full path of the project that defined the item", ProjectFile),
        ("DefiningProjectDirectory", "The directory of the project that defined the item", Folder),
        ("DefiningProjectName", "The name of the project that defined the item", Filename),
        ("DefiningProjectExtension", "The extension of the project that defined the item", Extension),
    ]
    .into_iter()
    .map(|(name, desc, kind)| {
        let mut info = MetadataInfo::new(name, desc).with_kind(kind.kind());
        info.is_builtin = true;
        info
    })
    .collect()
});

/// Shared instance of the built-in schema.
pub fn builtin_schema() -> Arc<BuiltinSchema> {
    Arc::clone(&*BUILTIN)
}

/// Metadata MSBuild computes for every item.
pub fn well_known_metadata() -> &'static [MetadataInfo] {
    &WELL_KNOWN_METADATA
}

pub fn well_known_metadata_info(name: &str) -> Option<&'static MetadataInfo> {
    WELL_KNOWN_METADATA.iter().find(|m| m.name.matches(name))
}

/// Reserved or common property declared by the built-in schema.
pub fn builtin_property(name: &str) -> Option<&'static PropertyInfo> {
    BUILTIN.properties.iter().find(|p| p.name.matches(name))
}

const RESERVED_PROPERTIES: &[(&str, &str, ValueKind)] = &[
    ("MSBuildProjectDirectory", "Directory of the project file", BaseKind::Folder.kind()),
    ("MSBuildProjectDirectoryNoRoot", "Directory of the project file, without the root", BaseKind::Folder.kind()),
    ("MSBuildProjectExtension", "Extension of the project file", BaseKind::Extension.kind()),
    ("MSBuildProjectFile", "Filename of the project file, with extension", BaseKind::Filename.kind()),
    ("MSBuildProjectFullPath", "Full path of the project file", BaseKind::ProjectFile.kind()),
    ("MSBuildProjectName", "Filename of the project file, without extension", BaseKind::Filename.kind()),
    ("MSBuildProjectDefaultTargets", "Targets named in the DefaultTargets attribute", BaseKind::TargetName.list()),
    ("MSBuildThisFile", "Filename of the file containing this property", BaseKind::Filename.kind()),
    ("MSBuildThisFileDirectory", "Directory of the file containing this property", BaseKind::FolderWithSlash.kind()),
    ("MSBuildThisFileFullPath", "Full path of the file containing this property", BaseKind::File.kind()),
    ("MSBuildThisFileName", "Filename of the file containing this property, without extension", BaseKind::Filename.kind()),
    ("MSBuildThisFileExtension", "Extension of the file containing this property", BaseKind::Extension.kind()),
    ("MSBuildBinPath", "Directory of the MSBuild binaries", BaseKind::Folder.kind()),
    ("MSBuildToolsPath", "Directory of the MSBuild tools", BaseKind::Folder.kind()),
    ("MSBuildToolsVersion", "Version of the MSBuild toolset", BaseKind::ToolsVersion.kind()),
    ("MSBuildExtensionsPath", "Directory of MSBuild extensions", BaseKind::Folder.kind()),
    ("MSBuildStartupDirectory", "Directory MSBuild was started from", BaseKind::Folder.kind()),
    ("MSBuildNodeCount", "Maximum number of concurrent build processes", BaseKind::Int.kind()),
    ("MSBuildLastTaskResult", "Whether the previous task succeeded", BaseKind::Bool.kind()),
    ("MSBuildProgramFiles32", "The 32-bit Program Files folder", BaseKind::Folder.kind()),
    ("MSBuildRuntimeType", "The runtime MSBuild is running on", BaseKind::String.kind()),
    ("MSBuildVersion", "The version of MSBuild", BaseKind::Version.kind()),
];

const COMMON_PROPERTIES: &[(&str, &str, ValueKind)] = &[
    ("Configuration", "The build configuration", BaseKind::Configuration.kind()),
    ("Configurations", "The build configurations available in the project", BaseKind::Configuration.list()),
    ("Platform", "The build platform", BaseKind::Platform.kind()),
    ("Platforms", "The build platforms available in the project", BaseKind::Platform.list()),
    ("OutputPath", "Output directory, relative to the project", BaseKind::FolderWithSlash.kind()),
    ("BaseOutputPath", "Base of the output directory", BaseKind::FolderWithSlash.kind()),
    ("IntermediateOutputPath", "Intermediate output directory", BaseKind::FolderWithSlash.kind()),
    ("BaseIntermediateOutputPath", "Base of the intermediate output directory", BaseKind::FolderWithSlash.kind()),
    ("OutputType", "Type of the output: Library, Exe, WinExe or Module", BaseKind::String.kind()),
    ("AssemblyName", "Name of the output assembly", BaseKind::String.kind()),
    ("RootNamespace", "Root namespace for generated code", BaseKind::String.kind()),
    ("TargetFramework", "The framework the project targets", BaseKind::TargetFramework.kind()),
    ("TargetFrameworks", "The frameworks a multi-targeted project targets", BaseKind::TargetFramework.list()),
    ("TargetFrameworkIdentifier", "Identifier of the target framework", BaseKind::TargetFrameworkIdentifier.kind()),
    ("TargetFrameworkVersion", "Version of the target framework", BaseKind::TargetFrameworkVersion.kind()),
    ("TargetFrameworkProfile", "Profile of the target framework", BaseKind::TargetFrameworkProfile.kind()),
    ("DefineConstants", "Conditional compilation symbols", BaseKind::String.list()),
    ("Optimize", "Whether to optimize the output", BaseKind::Bool.kind()),
    ("DebugSymbols", "Whether to emit debug symbols", BaseKind::Bool.kind()),
    ("DebugType", "Kind of debug symbols to emit", BaseKind::String.kind()),
    ("TreatWarningsAsErrors", "Whether warnings fail the build", BaseKind::Bool.kind()),
    ("Nullable", "Nullable reference type context", BaseKind::String.kind()),
    ("LangVersion", "Language version", BaseKind::String.kind()),
    ("ProjectGuid", "Unique identifier of the project", BaseKind::Guid.kind()),
    ("Version", "Version of the package and assembly", BaseKind::Version.kind()),
    ("BuildDependsOn", "Targets the Build target depends on", BaseKind::TargetName.list()),
];

fn item_metadata(item: &str, entries: &[(&str, &str, ValueKind)]) -> Vec<MetadataInfo> {
    entries
        .iter()
        .map(|(name, desc, kind)| MetadataInfo::new(*name, *desc).for_item(item).with_kind(*kind))
        .collect()
}

fn task_parameters(task: &str, entries: &[(&str, &str, ValueKind, bool)]) -> Vec<TaskParameterInfo> {
    entries
        .iter()
        .map(|(name, desc, kind, output)| {
            let param = TaskParameterInfo::new(task, *name, *desc).with_kind(*kind);
            if *output { param.output() } else { param }
        })
        .collect()
}

impl BuiltinSchema {
    fn build() -> Self {
        use BaseKind::*;

        let properties = RESERVED_PROPERTIES
            .iter()
            .map(|(name, desc, kind)| PropertyInfo::new(*name, *desc).with_kind(*kind).reserved())
            .chain(
                COMMON_PROPERTIES
                    .iter()
                    .map(|(name, desc, kind)| PropertyInfo::new(*name, *desc).with_kind(*kind)),
            )
            .collect();

        let items = vec![
            ItemInfo::new("Compile", "Source files to compile").with_kind(File.list()),
            ItemInfo::new("Content", "Files that are not compiled but are deployed").with_kind(File.list()),
            ItemInfo::new("None", "Files with no build action").with_kind(File.list()),
            ItemInfo::new("EmbeddedResource", "Files embedded in the output assembly").with_kind(File.list()),
            ItemInfo::new("Reference", "Assembly references").with_kind(String.list()),
            ItemInfo::new("ProjectReference", "References to other projects").with_kind(ProjectFile.list()),
            ItemInfo::new("PackageReference", "References to NuGet packages").with_kind(NuGetId.list()),
            ItemInfo::new("Folder", "Folders shown in the project").with_kind(Folder.list()),
        ];

        let mut metadata = IndexMap::new();
        for (item, entries) in [
            (
                "Compile",
                &[
                    ("Link", "Display path of a file outside the project directory", File.kind()),
                    ("DependentUpon", "File this file is nested under", File.kind()),
                    ("AutoGen", "Whether the file is generated", Bool.kind()),
                    ("Visible", "Whether to show the file in the project tree", Bool.kind()),
                ][..],
            ),
            (
                "Content",
                &[
                    ("Link", "Display path of a file outside the project directory", File.kind()),
                    ("CopyToOutputDirectory", "Whether to copy the file to the output directory", String.kind()),
                ][..],
            ),
            (
                "None",
                &[
                    ("Link", "Display path of a file outside the project directory", File.kind()),
                    ("CopyToOutputDirectory", "Whether to copy the file to the output directory", String.kind()),
                ][..],
            ),
            (
                "EmbeddedResource",
                &[
                    ("LogicalName", "Name of the embedded resource", String.kind()),
                    ("DependentUpon", "File this file is nested under", File.kind()),
                ][..],
            ),
            (
                "Reference",
                &[
                    ("HintPath", "Path of the referenced assembly", File.kind()),
                    ("Private", "Whether to copy the assembly to the output directory", Bool.kind()),
                ][..],
            ),
            (
                "ProjectReference",
                &[
                    ("Project", "Project GUID of the referenced project", Guid.kind()),
                    ("Name", "Display name of the referenced project", String.kind()),
                    ("ReferenceOutputAssembly", "Whether to reference the project's output", Bool.kind()),
                    ("Private", "Whether to copy the output to the output directory", Bool.kind()),
                ][..],
            ),
            (
                "PackageReference",
                &[
                    ("Version", "Version range of the package", Version.kind()),
                    ("PrivateAssets", "Assets that do not flow to dependents", String.list()),
                    ("IncludeAssets", "Assets to consume", String.list()),
                    ("ExcludeAssets", "Assets not to consume", String.list()),
                ][..],
            ),
        ] {
            metadata.insert(Name::new(item), item_metadata(item, entries));
        }

        let tasks = vec![
            TaskInfo::new("Message", "Logs a message"),
            TaskInfo::new("Warning", "Logs a warning"),
            TaskInfo::new("Error", "Logs an error and stops the build"),
            TaskInfo::new("Copy", "Copies files"),
            TaskInfo::new("Delete", "Deletes files"),
            TaskInfo::new("MakeDir", "Creates directories"),
            TaskInfo::new("Exec", "Runs a command"),
            TaskInfo::new("CallTarget", "Invokes targets in the current project"),
            TaskInfo::new("MSBuild", "Builds other projects"),
        ];

        let mut params = IndexMap::new();
        for (task, entries) in [
            (
                "Message",
                &[
                    ("Text", "Message to log", String.kind(), false),
                    ("Importance", "Importance of the message", Importance.kind(), false),
                ][..],
            ),
            ("Warning", &[("Text", "Warning to log", String.kind(), false), ("Code", "Warning code", String.kind(), false)][..]),
            ("Error", &[("Text", "Error to log", String.kind(), false), ("Code", "Error code", String.kind(), false)][..]),
            (
                "Copy",
                &[
                    ("SourceFiles", "Files to copy", File.list(), false),
                    ("DestinationFolder", "Folder to copy the files to", Folder.kind(), false),
                    ("DestinationFiles", "Paths to copy the files to", File.list(), false),
                    ("SkipUnchangedFiles", "Whether to skip files that are unchanged", Bool.kind(), false),
                    ("CopiedFiles", "Files that were copied", File.list(), true),
                ][..],
            ),
            (
                "Delete",
                &[
                    ("Files", "Files to delete", File.list(), false),
                    ("DeletedFiles", "Files that were deleted", File.list(), true),
                ][..],
            ),
            (
                "MakeDir",
                &[
                    ("Directories", "Directories to create", Folder.list(), false),
                    ("DirectoriesCreated", "Directories that were created", Folder.list(), true),
                ][..],
            ),
            (
                "Exec",
                &[
                    ("Command", "Command to run", String.kind(), false),
                    ("WorkingDirectory", "Directory to run the command in", Folder.kind(), false),
                    ("ExitCode", "Exit code of the command", Int.kind(), true),
                ][..],
            ),
            (
                "CallTarget",
                &[
                    ("Targets", "Targets to invoke", TargetName.list(), false),
                    ("TargetOutputs", "Outputs of the invoked targets", UnknownItem.list(), true),
                ][..],
            ),
            (
                "MSBuild",
                &[
                    ("Projects", "Projects to build", ProjectFile.list(), false),
                    ("Targets", "Targets to build", TargetName.list(), false),
                    ("Properties", "Global properties for the projects", String.list(), false),
                    ("TargetOutputs", "Outputs of the built targets", UnknownItem.list(), true),
                ][..],
            ),
        ] {
            params.insert(Name::new(task), task_parameters(task, entries));
        }

        let targets = [
            ("Build", "Builds the project"),
            ("Rebuild", "Cleans and builds the project"),
            ("Clean", "Deletes build outputs"),
            ("Restore", "Restores package references"),
            ("Publish", "Publishes the project"),
            ("Pack", "Creates a NuGet package"),
            ("BeforeBuild", "Runs before the build; override to customise"),
            ("AfterBuild", "Runs after the build; override to customise"),
            ("CoreCompile", "Compiles the project sources"),
        ]
        .into_iter()
        .map(|(name, desc)| TargetInfo::new(name, desc))
        .collect();

        Self {
            items,
            properties,
            metadata,
            tasks,
            task_parameters: params,
            targets,
        }
    }
}

impl MsBuildSchema for BuiltinSchema {
    fn name(&self) -> &str {
        "builtin"
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
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_properties_are_marked() {
        let prop = builtin_property("msbuildprojectdirectory").unwrap();
        assert!(prop.is_reserved);
        assert_eq!(prop.value_kind, BaseKind::Folder.kind());
    }

    #[test]
    fn test_item_metadata_lookup_is_case_insensitive() {
        let schema = builtin_schema();
        let meta = schema.metadata_info("compile", "link").unwrap();
        assert_eq!(meta.item.as_ref().map(Name::as_str), Some("Compile"));
    }

    #[test]
    fn test_output_parameters_flagged() {
        let schema = builtin_schema();
        let outputs: Vec<_> = schema
            .task_parameters("Copy")
            .iter()
            .filter(|p| p.is_output)
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(outputs, ["CopiedFiles"]);
    }

    #[test]
    fn test_well_known_metadata() {
        let full_path = well_known_metadata_info("FULLPATH").unwrap();
        assert!(full_path.is_builtin);
        assert!(full_path.item.is_none());
    }
}

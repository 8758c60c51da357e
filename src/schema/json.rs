//! Schema sources loaded from JSON schema files.
//!
//! ```json
//! {
//!   "properties": { "Foo": "Description", "BarPath": { "description": "...", "kind": "folder" } },
//!   "items": { "Thing": { "description": "...", "kind": "file", "metadata": { "Meta": "..." } } },
//!   "tasks": { "MyTask": { "description": "...", "parameters": { "Out": { "kind": "file-list", "output": true } } } },
//!   "targets": { "MyTarget": "..." },
//!   "configurations": ["Debug", "Release"],
//!   "platforms": ["AnyCPU"]
//! }
//! ```

use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;
use smol_str::SmolStr;

use super::error::{Result, SchemaError};
use super::info::{
    ItemInfo, MetadataInfo, PropertyInfo, Provenance, TargetInfo, TaskInfo, TaskParameterInfo,
};
use super::source::MsBuildSchema;
use super::value_kind::ValueKind;
use crate::base::Name;

#[derive(Deserialize)]
#[serde(untagged)]
enum Entry {
    Description(String),
    Full(EntryBody),
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct EntryBody {
    description: String,
    kind: Option<String>,
    reserved: bool,
    output: bool,
    required: bool,
    metadata: IndexMap<String, Entry>,
    parameters: IndexMap<String, Entry>,
}

impl Entry {
    fn into_body(self) -> EntryBody {
        match self {
            Entry::Description(description) => EntryBody {
                description,
                ..EntryBody::default()
            },
            Entry::Full(body) => body,
        }
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct SchemaFile {
    properties: IndexMap<String, Entry>,
    items: IndexMap<String, Entry>,
    tasks: IndexMap<String, Entry>,
    targets: IndexMap<String, Entry>,
    configurations: Vec<String>,
    platforms: Vec<String>,
}

/// A schema source read from a JSON file.
#[derive(Debug, Default)]
pub struct JsonSchema {
    name: SmolStr,
    items: Vec<ItemInfo>,
    properties: Vec<PropertyInfo>,
    metadata: IndexMap<Name, Vec<MetadataInfo>>,
    tasks: Vec<TaskInfo>,
    task_parameters: IndexMap<Name, Vec<TaskParameterInfo>>,
    targets: Vec<TargetInfo>,
    configurations: Vec<SmolStr>,
    platforms: Vec<SmolStr>,
}

fn parse_kind(kind: Option<&str>) -> Result<Option<ValueKind>> {
    kind.map(str::parse::<ValueKind>).transpose()
}

impl JsonSchema {
    /// Parse schema `text`, labelling its entries with `name`.
    ///
    /// Unknown value-kind tags are an error: they mean the schema was
    /// written for a different table.
    pub fn parse(name: &str, text: &str) -> Result<Self> {
        let file: SchemaFile =
            serde_json::from_str(text).map_err(|e| SchemaError::json(e.to_string()))?;
        let provenance = Provenance::Schema(SmolStr::new(name));
        let mut schema = JsonSchema {
            name: SmolStr::new(name),
            ..JsonSchema::default()
        };

        for (prop_name, entry) in file.properties {
            let body = entry.into_body();
            let mut info = PropertyInfo::new(prop_name.as_str(), body.description)
                .with_provenance(provenance.clone());
            if let Some(kind) = parse_kind(body.kind.as_deref())? {
                info = info.with_kind(kind);
            }
            info.is_reserved = body.reserved;
            schema.properties.push(info);
        }

        for (item_name, entry) in file.items {
            let body = entry.into_body();
            let mut info = ItemInfo::new(item_name.as_str(), body.description)
                .with_provenance(provenance.clone());
            if let Some(kind) = parse_kind(body.kind.as_deref())? {
                info = info.with_kind(kind);
            }
            let mut metadata = Vec::with_capacity(body.metadata.len());
            for (meta_name, meta) in body.metadata {
                let meta = meta.into_body();
                let mut meta_info = MetadataInfo::new(meta_name.as_str(), meta.description)
                    .for_item(item_name.as_str())
                    .with_provenance(provenance.clone());
                if let Some(kind) = parse_kind(meta.kind.as_deref())? {
                    meta_info = meta_info.with_kind(kind);
                }
                metadata.push(meta_info);
            }
            schema.metadata.insert(Name::new(&item_name), metadata);
            schema.items.push(info);
        }

        for (task_name, entry) in file.tasks {
            let body = entry.into_body();
            let mut params = Vec::with_capacity(body.parameters.len());
            for (param_name, param) in body.parameters {
                let param = param.into_body();
                let mut info =
                    TaskParameterInfo::new(task_name.as_str(), param_name.as_str(), param.description)
                        .with_provenance(provenance.clone());
                if let Some(kind) = parse_kind(param.kind.as_deref())? {
                    info = info.with_kind(kind);
                }
                info.is_output = param.output;
                info.is_required = param.required;
                params.push(info);
            }
            schema.task_parameters.insert(Name::new(&task_name), params);
            schema.tasks.push(
                TaskInfo::new(task_name.as_str(), body.description)
                    .with_provenance(provenance.clone()),
            );
        }

        for (target_name, entry) in file.targets {
            let body = entry.into_body();
            schema.targets.push(
                TargetInfo::new(target_name.as_str(), body.description)
                    .with_provenance(provenance.clone()),
            );
        }

        schema.configurations = file.configurations.into_iter().map(SmolStr::from).collect();
        schema.platforms = file.platforms.into_iter().map(SmolStr::from).collect();

        tracing::debug!(
            "loaded schema {}: {} properties, {} items, {} tasks, {} targets",
            name,
            schema.properties.len(),
            schema.items.len(),
            schema.tasks.len(),
            schema.targets.len()
        );
        Ok(schema)
    }

    /// Load a schema file; the file stem becomes the schema name.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| SchemaError::invalid("schema path", path.display().to_string()))?;
        Self::parse(name, &text)
    }
}

impl MsBuildSchema for JsonSchema {
    fn name(&self) -> &str {
        &self.name
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
        &self.configurations
    }

    fn platforms(&self) -> &[SmolStr] {
        &self.platforms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::BaseKind;

    const SCHEMA: &str = r#"{
        "properties": {
            "Foo": "The foo",
            "BarDir": { "description": "The bar", "kind": "folder-list" }
        },
        "items": {
            "Widget": { "description": "Widgets", "kind": "file", "metadata": { "Size": "Widget size" } }
        },
        "tasks": {
            "Frob": { "parameters": { "Result": { "kind": "file-list", "output": true } } }
        },
        "targets": { "FrobAll": "Frobs everything" },
        "platforms": ["ARM64"]
    }"#;

    #[test]
    fn test_parse_schema_file() {
        let schema = JsonSchema::parse("widgets", SCHEMA).unwrap();
        assert_eq!(schema.properties().len(), 2);
        assert_eq!(
            schema.property("bardir").unwrap().value_kind,
            BaseKind::Folder.list()
        );
        let meta = schema.metadata_info("widget", "size").unwrap();
        assert_eq!(meta.description, "Widget size");
        assert_eq!(meta.provenance, Provenance::Schema("widgets".into()));
        assert!(schema.task_parameter("Frob", "Result").unwrap().is_output);
        assert_eq!(schema.platforms(), ["ARM64"]);
    }

    #[test]
    fn test_unknown_kind_is_contract_error() {
        let err = JsonSchema::parse("bad", r#"{ "properties": { "X": { "kind": "wibble" } } }"#)
            .unwrap_err();
        assert!(matches!(err, SchemaError::UnknownValueKind(_)));
    }

    #[test]
    fn test_malformed_json() {
        let err = JsonSchema::parse("bad", "{ nope").unwrap_err();
        assert!(matches!(err, SchemaError::Json(_)));
    }
}

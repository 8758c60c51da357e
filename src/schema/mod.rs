//! Schema: what the language service knows about items, properties,
//! metadata, tasks and targets.
//!
//! - [`ValueKind`] - semantic value domains, with a list modifier
//! - [`BaseInfo`] - the descriptor family returned by lookups and completions
//! - [`MsBuildSchema`] / [`SchemaRegistry`] - pluggable sources and their merge
//! - [`infer_value_kind_if_unknown`] - naming-convention heuristics
//! - [`FunctionTypeProvider`] - function and class descriptors

mod builtins;
mod error;
mod functions;
mod info;
mod infer;
#[cfg(feature = "json-schema")]
mod json;
mod source;
mod value_kind;

pub use builtins::{
    BuiltinSchema, builtin_property, builtin_schema, well_known_metadata,
    well_known_metadata_info,
};
pub use error::{Result, SchemaError};
pub use functions::{BuiltinFunctions, FunctionTypeProvider};
pub use info::{
    AttributeInfo, BaseInfo, ClassInfo, ConstantInfo, FileOrFolderInfo, FrameworkInfo,
    FunctionInfo, ItemInfo, MetadataInfo, PropertyInfo, Provenance, TargetInfo, TaskInfo,
    TaskParameterInfo,
};
pub use infer::infer_value_kind_if_unknown;
#[cfg(feature = "json-schema")]
pub use json::JsonSchema;
pub use source::{MsBuildSchema, SchemaRegistry};
pub use value_kind::{BaseKind, ValueKind, known_value, simple_values};

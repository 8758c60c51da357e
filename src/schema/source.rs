//! Schema sources and the registry that merges them.
//!
//! A registry holds an ordered list of sources, most specific first: the
//! document's own declarations, then user and package schemas, then the
//! built-in schema. Enumerations are a union de-duplicated by
//! case-insensitive name. For enumerations and single lookups alike the
//! first (most specific) entry wins, and gaps in it (empty description,
//! unknown kind) are filled from later duplicates.

use std::sync::Arc;

use indexmap::IndexMap;
use indexmap::map::Entry;
use rustc_hash::FxHashSet;
use smol_str::SmolStr;
use tokio_util::sync::CancellationToken;

use super::builtins;
use super::error::{Result, SchemaError};
use super::value_kind::BaseKind;
use super::info::{
    BaseInfo, ItemInfo, MetadataInfo, PropertyInfo, TargetInfo, TaskInfo, TaskParameterInfo,
};
use crate::base::Name;
use crate::language::SyntaxKind;

/// A provider of item, property, metadata, task and target declarations.
pub trait MsBuildSchema: Send + Sync {
    /// Label recorded in provenance and logs.
    fn name(&self) -> &str;

    fn items(&self) -> &[ItemInfo];

    fn properties(&self) -> &[PropertyInfo];

    /// Metadata declared for one item type.
    fn metadata(&self, item: &str) -> &[MetadataInfo];

    fn tasks(&self) -> &[TaskInfo];

    fn task_parameters(&self, task: &str) -> &[TaskParameterInfo];

    fn targets(&self) -> &[TargetInfo];

    fn configurations(&self) -> &[SmolStr] {
        &[]
    }

    fn platforms(&self) -> &[SmolStr] {
        &[]
    }

    fn item(&self, name: &str) -> Option<&ItemInfo> {
        self.items().iter().find(|i| i.name.matches(name))
    }

    fn property(&self, name: &str) -> Option<&PropertyInfo> {
        self.properties().iter().find(|p| p.name.matches(name))
    }

    fn metadata_info(&self, item: &str, name: &str) -> Option<&MetadataInfo> {
        self.metadata(item).iter().find(|m| m.name.matches(name))
    }

    fn task(&self, name: &str) -> Option<&TaskInfo> {
        self.tasks().iter().find(|t| t.name.matches(name))
    }

    fn task_parameter(&self, task: &str, name: &str) -> Option<&TaskParameterInfo> {
        self.task_parameters(task)
            .iter()
            .find(|p| p.name.matches(name))
    }

    fn target(&self, name: &str) -> Option<&TargetInfo> {
        self.targets().iter().find(|t| t.name.matches(name))
    }
}

/// Entries the registry can merge across sources.
trait SchemaEntry: Clone {
    fn key(&self) -> &Name;

    /// Fill gaps in `self` from a less specific duplicate.
    fn fill_from(&mut self, _other: &Self) {}
}

macro_rules! fill_description_and_kind {
    ($($ty:ty),* $(,)?) => {$(
        impl SchemaEntry for $ty {
            fn key(&self) -> &Name {
                &self.name
            }

            fn fill_from(&mut self, other: &Self) {
                if self.description.is_empty() {
                    self.description = other.description.clone();
                }
                // harvested items carry the placeholder item kind
                if self.value_kind.is_unknown() || self.value_kind.base() == BaseKind::UnknownItem {
                    self.value_kind = other.value_kind;
                }
            }
        }
    )*};
}

fill_description_and_kind!(ItemInfo, PropertyInfo, MetadataInfo, TaskParameterInfo);

impl SchemaEntry for TaskInfo {
    fn key(&self) -> &Name {
        &self.name
    }

    fn fill_from(&mut self, other: &Self) {
        if self.description.is_empty() {
            self.description = other.description.clone();
        }
    }
}

impl SchemaEntry for TargetInfo {
    fn key(&self) -> &Name {
        &self.name
    }

    fn fill_from(&mut self, other: &Self) {
        if self.description.is_empty() {
            self.description = other.description.clone();
        }
    }
}

fn merge_entries<'s, T: SchemaEntry + 's>(slices: impl Iterator<Item = &'s [T]>) -> Vec<T> {
    let mut merged: IndexMap<Name, T> = IndexMap::new();
    for entry in slices.flatten() {
        match merged.entry(entry.key().clone()) {
            Entry::Occupied(mut existing) => existing.get_mut().fill_from(entry),
            Entry::Vacant(slot) => {
                slot.insert(entry.clone());
            }
        }
    }
    merged.into_values().collect()
}

/// The first entry, completed from the duplicates after it.
fn first_filled<'s, T: SchemaEntry + 's>(mut found: impl Iterator<Item = &'s T>) -> Option<T> {
    let mut first = found.next()?.clone();
    for other in found {
        first.fill_from(other);
    }
    Some(first)
}

fn merge_values<'s>(slices: impl Iterator<Item = &'s [SmolStr]>) -> Vec<SmolStr> {
    let mut seen = FxHashSet::default();
    let mut out = Vec::new();
    for value in slices.flatten() {
        if seen.insert(Name::new(value)) {
            out.push(value.clone());
        }
    }
    out
}

/// An ordered, immutable set of schema sources.
///
/// Cheap to clone; sources are shared. Enumerations check the cancellation
/// token between sources and return what they have merged so far.
#[derive(Clone, Default)]
pub struct SchemaRegistry {
    sources: Vec<Arc<dyn MsBuildSchema>>,
    cancel: CancellationToken,
}

impl std::fmt::Debug for SchemaRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.sources.iter().map(|s| s.name()))
            .finish()
    }
}

impl SchemaRegistry {
    /// Registry over `sources`, most specific first.
    pub fn new(sources: Vec<Arc<dyn MsBuildSchema>>) -> Self {
        Self {
            sources,
            cancel: CancellationToken::new(),
        }
    }

    /// Registry with only the built-in schema.
    pub fn builtin() -> Self {
        let builtin: Arc<dyn MsBuildSchema> = builtins::builtin_schema();
        Self::new(vec![builtin])
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn sources(&self) -> &[Arc<dyn MsBuildSchema>] {
        &self.sources
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    fn live_sources(&self) -> impl Iterator<Item = &Arc<dyn MsBuildSchema>> {
        self.sources.iter().take_while(|source| {
            let cancelled = self.cancel.is_cancelled();
            if cancelled {
                tracing::trace!("schema merge cancelled before {}", source.name());
            }
            !cancelled
        })
    }

    pub fn items(&self) -> Vec<ItemInfo> {
        merge_entries(self.live_sources().map(|s| s.items()))
    }

    /// All properties; reserved ones only when `include_reserved`.
    pub fn properties(&self, include_reserved: bool) -> Vec<PropertyInfo> {
        let mut merged = merge_entries(self.live_sources().map(|s| s.properties()));
        if !include_reserved {
            merged.retain(|p| !p.is_reserved);
        }
        merged
    }

    /// Metadata of `item`; well-known metadata appended when `include_builtins`.
    pub fn metadata(&self, item: &str, include_builtins: bool) -> Vec<MetadataInfo> {
        let mut merged = merge_entries(self.live_sources().map(|s| s.metadata(item)));
        if include_builtins {
            let known: FxHashSet<Name> = merged.iter().map(|m| m.name.clone()).collect();
            merged.extend(
                builtins::well_known_metadata()
                    .iter()
                    .filter(|m| !known.contains(&m.name))
                    .cloned(),
            );
        }
        merged
    }

    pub fn tasks(&self) -> Vec<TaskInfo> {
        merge_entries(self.live_sources().map(|s| s.tasks()))
    }

    pub fn task_parameters(&self, task: &str) -> Vec<TaskParameterInfo> {
        merge_entries(self.live_sources().map(|s| s.task_parameters(task)))
    }

    pub fn targets(&self) -> Vec<TargetInfo> {
        merge_entries(self.live_sources().map(|s| s.targets()))
    }

    pub fn configurations(&self) -> Vec<SmolStr> {
        merge_values(self.live_sources().map(|s| s.configurations()))
    }

    pub fn platforms(&self) -> Vec<SmolStr> {
        merge_values(self.live_sources().map(|s| s.platforms()))
    }

    /// The most specific match, with gaps filled from later sources.
    pub fn item(&self, name: &str) -> Option<ItemInfo> {
        first_filled(self.sources.iter().filter_map(|s| s.item(name)))
    }

    pub fn property(&self, name: &str) -> Option<PropertyInfo> {
        first_filled(self.sources.iter().filter_map(|s| s.property(name)))
    }

    /// Item-specific metadata first, then well-known metadata.
    pub fn metadata_info(&self, item: &str, name: &str) -> Option<MetadataInfo> {
        first_filled(
            self.sources
                .iter()
                .filter_map(|s| s.metadata_info(item, name))
                .chain(builtins::well_known_metadata_info(name)),
        )
    }

    pub fn task(&self, name: &str) -> Option<TaskInfo> {
        first_filled(self.sources.iter().filter_map(|s| s.task(name)))
    }

    pub fn task_parameter(&self, task: &str, name: &str) -> Option<TaskParameterInfo> {
        first_filled(self.sources.iter().filter_map(|s| s.task_parameter(task, name)))
    }

    pub fn target(&self, name: &str) -> Option<TargetInfo> {
        first_filled(self.sources.iter().filter_map(|s| s.target(name)))
    }

    /// Schema-backed entries standing in for an abstract grammar child.
    ///
    /// `element_name` is the item name when `kind` is `Metadata`.
    pub fn abstract_children(&self, kind: SyntaxKind, element_name: &str) -> Result<Vec<BaseInfo>> {
        let infos = match kind {
            SyntaxKind::Item | SyntaxKind::ItemDefinition => {
                self.items().into_iter().map(BaseInfo::Item).collect()
            }
            SyntaxKind::Task => self.tasks().into_iter().map(BaseInfo::Task).collect(),
            SyntaxKind::Property => self
                .properties(false)
                .into_iter()
                .map(BaseInfo::Property)
                .collect(),
            SyntaxKind::Metadata => self
                .metadata(element_name, false)
                .into_iter()
                .map(BaseInfo::Metadata)
                .collect(),
            // inline task parameters are named by the task author
            SyntaxKind::Parameter => Vec::new(),
            kind => return Err(SchemaError::NotAbstract { kind }),
        };
        tracing::trace!("abstract children of {:?}: {}", kind, infos.len());
        Ok(infos)
    }
}

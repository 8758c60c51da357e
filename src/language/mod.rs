//! The MSBuild language layer: grammar, documents, and reference resolution.
//!
//! [`syntax`] holds the static element/attribute grammar. A
//! [`MsBuildDocument`] pairs a parsed tree with the schema harvested from it
//! and the external services (evaluation, SDK lookup, file listing) the
//! language service consults. [`resolve`] maps an offset to the construct
//! under it.

mod document;
mod resolve;
mod sdk;
mod syntax;

pub use document::{DocumentSchema, MsBuildDocument, ToolsVersion};
pub use resolve::{
    Keyword, Reference, ReferenceKind, ResolvePosition, ResolveResult, element_syntax,
    is_in_target, resolve, resolve_element, specialize_attribute, value_info,
};
pub(crate) use resolve::context_item;
pub use sdk::{RuntimeInformation, SdkReference, SdksDirectory};
pub use syntax::{AttributeSyntax, ElementSyntax, SyntaxKind};

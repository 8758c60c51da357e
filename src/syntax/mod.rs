//! Syntax: the element/attribute tree of a project file.
//!
//! The tree is the contract between a tokenizer and the semantic layer:
//! elements with name/attribute/value spans, text nodes, closing-tag info
//! and parent/child navigation. [`parse_document`] is a lenient builder for
//! callers that do not bring their own tokenizer.

mod parser;
mod tree;

pub use parser::parse_document;
pub use tree::{
    XAttribute, XDocument, XDocumentBuilder, XElement, XNode, XNodeData, XNodeId, XText,
    decode_entities,
};

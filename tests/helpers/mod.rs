//! Shared helpers for integration tests.

pub mod fixtures;

use msbuild::ide::CompletionItem;
use msbuild::{MsBuildDocument, TextSize};

/// Parse `text` with its `|` cursor marker removed.
pub fn doc_at(path: &str, text: &str) -> (MsBuildDocument, TextSize) {
    let offset = text.find('|').expect("cursor marker");
    let source = text.replacen('|', "", 1);
    (MsBuildDocument::parse(path, &source), TextSize::new(offset as u32))
}

pub fn labels(items: &[CompletionItem]) -> Vec<&str> {
    items.iter().map(|item| item.label.as_ref()).collect()
}

//! Completion options.

use crate::frameworks::BestGuessPolicy;
use crate::language::ToolsVersion;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompletionConfig {
    /// Matching policy for partial framework references.
    pub best_guess: BestGuessPolicy,
    /// Append a `..` entry to path completions.
    pub include_parent_directory: bool,
    /// Item metadata is offered as attributes from this tools version on.
    pub metadata_attributes_since: ToolsVersion,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            best_guess: BestGuessPolicy::default(),
            include_parent_directory: true,
            metadata_attributes_since: ToolsVersion::V15_0,
        }
    }
}

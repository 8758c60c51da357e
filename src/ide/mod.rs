//! IDE features: high-level APIs for editor and LSP handlers.
//!
//! This module turns resolve results into what an editor shows: completion
//! candidates for elements, attributes and values, file and folder
//! candidates for path values, and the declaration behind a reference.
//!
//! ## Design Principles
//!
//! 1. **Pure functions**: Take snapshots in, return data out
//! 2. **No LSP types**: Uses our own types, converted at LSP boundary
//! 3. **Composable**: The candidate builders work without `AnalysisHost`
//!
//! ## Usage
//!
//! ```ignore
//! use msbuild::ide::AnalysisHost;
//!
//! let mut host = AnalysisHost::new();
//! host.set_file_content("app.csproj", "<Project Sdk=\"Microsoft.NET.Sdk\" />");
//!
//! let analysis = host.analysis();
//! let items = analysis.completions("app.csproj", offset)?;
//! ```

mod analysis;
mod completion;
mod config;
mod paths;
mod reference;

pub use analysis::{Analysis, AnalysisHost};
pub use completion::{
    CompletionItem, CompletionKind, attribute_completions, completions, element_completions,
    value_completions,
};
pub use config::CompletionConfig;
pub use paths::{PathCandidates, evaluate_expression_as_paths, filename_completions, path_completions};
pub use reference::resolved_reference;

//! AnalysisHost and Analysis: document state and query snapshots.
//!
//! The `AnalysisHost` owns the documents and the schema set and hands out
//! `Analysis` snapshots for querying. A snapshot keeps the documents it
//! was taken from, so later edits never disturb a query in flight.
//!
//! ## Usage
//!
//! ```ignore
//! let mut host = AnalysisHost::new();
//! host.set_file_content("app.csproj", text);
//!
//! let analysis = host.analysis();
//! let items = analysis.completions("app.csproj", offset)?;
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rayon::prelude::*;
use tokio_util::sync::CancellationToken;

use super::completion::{CompletionItem, completions};
use super::config::CompletionConfig;
use super::reference::resolved_reference;
use crate::base::{LineCol, LineIndex, TextSize};
use crate::language::{MsBuildDocument, ResolveResult, RuntimeInformation, resolve};
use crate::project::DirectoryListing;
use crate::schema::{BaseInfo, BuiltinFunctions, FunctionTypeProvider, MsBuildSchema, Result};

#[derive(Clone)]
struct FileEntry {
    document: Arc<MsBuildDocument>,
    line_index: Arc<LineIndex>,
}

/// Owns all mutable state for the IDE layer.
///
/// Apply changes via `set_file_content()` and `remove_file()`, then get a
/// consistent snapshot via `analysis()`.
pub struct AnalysisHost {
    files: Arc<HashMap<PathBuf, FileEntry>>,
    schemas: Vec<Arc<dyn MsBuildSchema>>,
    functions: Arc<dyn FunctionTypeProvider>,
    runtime: Option<Arc<dyn RuntimeInformation>>,
    file_system: Option<Arc<dyn DirectoryListing>>,
    config: CompletionConfig,
}

impl Default for AnalysisHost {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisHost {
    pub fn new() -> Self {
        Self {
            files: Arc::default(),
            schemas: Vec::new(),
            functions: Arc::new(BuiltinFunctions),
            runtime: None,
            file_system: None,
            config: CompletionConfig::default(),
        }
    }

    pub fn with_config(mut self, config: CompletionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_functions(mut self, functions: Arc<dyn FunctionTypeProvider>) -> Self {
        self.functions = functions;
        self
    }

    pub fn with_runtime(mut self, runtime: Arc<dyn RuntimeInformation>) -> Self {
        self.runtime = Some(runtime);
        self
    }

    pub fn with_file_system(mut self, file_system: Arc<dyn DirectoryListing>) -> Self {
        self.file_system = Some(file_system);
        self
    }

    fn build(&self, path: PathBuf, text: &str) -> FileEntry {
        let mut document = MsBuildDocument::parse(path, text).with_schemas(self.schemas.clone());
        if let Some(runtime) = &self.runtime {
            document = document.with_runtime(Arc::clone(runtime));
        }
        if let Some(file_system) = &self.file_system {
            document = document.with_file_system(Arc::clone(file_system));
        }
        FileEntry {
            document: Arc::new(document),
            line_index: Arc::new(LineIndex::new(text)),
        }
    }

    /// Set the content of a file, replacing its snapshot.
    pub fn set_file_content(&mut self, path: impl Into<PathBuf>, content: &str) {
        let path = path.into();
        let entry = self.build(path.clone(), content);
        tracing::debug!("updated {}", path.display());
        Arc::make_mut(&mut self.files).insert(path, entry);
    }

    /// Set several files at once, parsing them in parallel.
    pub fn set_files(&mut self, files: Vec<(PathBuf, String)>) {
        let entries: Vec<(PathBuf, FileEntry)> = files
            .into_par_iter()
            .map(|(path, text)| {
                let entry = self.build(path.clone(), &text);
                (path, entry)
            })
            .collect();
        tracing::debug!("loaded {} file(s)", entries.len());
        Arc::make_mut(&mut self.files).extend(entries);
    }

    pub fn remove_file(&mut self, path: impl AsRef<Path>) {
        Arc::make_mut(&mut self.files).remove(path.as_ref());
    }

    pub fn has_file(&self, path: impl AsRef<Path>) -> bool {
        self.files.contains_key(path.as_ref())
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Add a schema source; every loaded document is rebuilt to include it.
    ///
    /// Sources added later are less specific than earlier ones.
    pub fn add_schema(&mut self, schema: Arc<dyn MsBuildSchema>) {
        tracing::debug!("adding schema {}", schema.name());
        self.schemas.push(schema);
        let schemas = self.schemas.clone();
        let files = Arc::make_mut(&mut self.files);
        for entry in files.values_mut() {
            let document = (*entry.document).clone().with_schemas(schemas.clone());
            entry.document = Arc::new(document);
        }
    }

    pub fn schemas(&self) -> &[Arc<dyn MsBuildSchema>] {
        &self.schemas
    }

    /// Get a consistent snapshot for querying.
    pub fn analysis(&self) -> Analysis {
        Analysis {
            files: Arc::clone(&self.files),
            functions: Arc::clone(&self.functions),
            config: self.config,
        }
    }
}

/// An immutable snapshot of the analysis state.
///
/// All IDE queries go through this struct to ensure consistent results.
#[derive(Clone)]
pub struct Analysis {
    files: Arc<HashMap<PathBuf, FileEntry>>,
    functions: Arc<dyn FunctionTypeProvider>,
    config: CompletionConfig,
}

impl Analysis {
    pub fn document(&self, path: impl AsRef<Path>) -> Option<&Arc<MsBuildDocument>> {
        self.files.get(path.as_ref()).map(|entry| &entry.document)
    }

    /// Byte offset of a 0-based line and column.
    pub fn offset(&self, path: impl AsRef<Path>, line: u32, col: u32) -> Option<TextSize> {
        let entry = self.files.get(path.as_ref())?;
        Some(entry.line_index.offset(LineCol { line, col }))
    }

    pub fn resolve(&self, path: impl AsRef<Path>, offset: TextSize) -> Option<ResolveResult> {
        resolve(self.document(path)?, offset)
    }

    /// Get completions at an offset. Unknown files have none.
    pub fn completions(&self, path: impl AsRef<Path>, offset: TextSize) -> Result<Vec<CompletionItem>> {
        self.completions_with_cancel(path, offset, &CancellationToken::new())
    }

    pub fn completions_with_cancel(
        &self,
        path: impl AsRef<Path>,
        offset: TextSize,
        cancel: &CancellationToken,
    ) -> Result<Vec<CompletionItem>> {
        match self.document(path) {
            Some(doc) => completions(doc, offset, &self.config, cancel),
            None => Ok(Vec::new()),
        }
    }

    /// The declaration behind the reference at an offset.
    pub fn resolved_reference(&self, path: impl AsRef<Path>, offset: TextSize) -> Option<BaseInfo> {
        let doc = self.document(path)?;
        let rr = resolve(doc, offset)?;
        resolved_reference(&rr, doc, self.functions.as_ref(), self.config.best_guess)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROJECT: &str = "<Project>\n  <PropertyGroup>\n    <Platforms>AnyCPU;x64</Platforms>\n  </PropertyGroup>\n</Project>";

    #[test]
    fn test_analysis_host_basic() {
        let mut host = AnalysisHost::new();
        host.set_file_content("app.csproj", PROJECT);
        assert!(host.has_file("app.csproj"));
        assert_eq!(host.file_count(), 1);

        let analysis = host.analysis();
        assert!(analysis.document("app.csproj").is_some());
        assert!(analysis.document("other.csproj").is_none());
    }

    #[test]
    fn test_snapshot_survives_removal() {
        let mut host = AnalysisHost::new();
        host.set_file_content("app.csproj", PROJECT);
        let before = host.analysis();
        host.remove_file("app.csproj");

        assert!(before.document("app.csproj").is_some());
        assert!(host.analysis().document("app.csproj").is_none());
    }

    #[test]
    fn test_offset_from_line_col() {
        let mut host = AnalysisHost::new();
        host.set_file_content("app.csproj", PROJECT);
        let analysis = host.analysis();
        let offset = analysis.offset("app.csproj", 1, 3).unwrap();
        let rr = analysis.resolve("app.csproj", offset).unwrap();
        assert_eq!(rr.element_name, "PropertyGroup");
    }

    #[test]
    fn test_set_files_in_bulk() {
        let mut host = AnalysisHost::new();
        host.set_files(vec![
            (PathBuf::from("a.csproj"), PROJECT.to_string()),
            (PathBuf::from("b.props"), "<Project />".to_string()),
        ]);
        assert_eq!(host.file_count(), 2);
        assert!(host.has_file("b.props"));
    }

    #[test]
    fn test_unknown_file_has_no_completions() {
        let host = AnalysisHost::new();
        let items = host.analysis().completions("nope.csproj", TextSize::new(0)).unwrap();
        assert!(items.is_empty());
    }
}

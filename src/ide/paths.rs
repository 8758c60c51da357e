//! File and folder candidates for path-valued values.
//!
//! The typed expression is turned into one or more base directories, then
//! the immediate children of each are listed. Templates with property
//! references expand over every value the document gives those properties.

use std::path::Path;

use smol_str::SmolStr;
use tokio_util::sync::CancellationToken;

use super::config::CompletionConfig;
use crate::evaluation::EvaluationContext;
use crate::expression::{ExpressionNode, from_msbuild_path};
use crate::language::{MsBuildDocument, ResolveResult, SdkReference, SyntaxKind};
use crate::project::DirectoryListing;
use crate::schema::{BaseInfo, BaseKind, FileOrFolderInfo, ValueKind};

/// Base paths an expression can denote.
///
/// Iterating is lazy and may be repeated; each call to [`iter`] starts
/// from the beginning.
///
/// [`iter`]: PathCandidates::iter
pub struct PathCandidates<'a> {
    evaluation: &'a dyn EvaluationContext,
    source: PathSource,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum PathSource {
    Nothing,
    Path(String),
    Template { template: String, base_dir: String },
}

impl<'a> PathCandidates<'a> {
    fn new(evaluation: &'a dyn EvaluationContext, source: PathSource) -> Self {
        Self { evaluation, source }
    }

    pub fn iter(&self) -> Box<dyn Iterator<Item = String> + '_> {
        match &self.source {
            PathSource::Nothing => Box::new(std::iter::empty()),
            PathSource::Path(path) => Box::new(std::iter::once(path.clone())),
            PathSource::Template { template, base_dir } => {
                self.evaluation.evaluate_path_with_permutation(template, base_dir)
            }
        }
    }
}

impl<'s> IntoIterator for &'s PathCandidates<'_> {
    type Item = String;
    type IntoIter = Box<dyn Iterator<Item = String> + 's>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Drop the last `count` characters.
fn trim_end_chars(text: &str, count: usize) -> &str {
    let keep = text.chars().count().saturating_sub(count);
    match text.char_indices().nth(keep) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}

/// The directories `expression` can denote.
///
/// `skip_end_chars` characters are trimmed from the trailing literal text,
/// which removes the partially typed name being completed. With no
/// expression, or nothing left after trimming, the base directory itself is
/// the only candidate. A concatenation of literal text and property
/// references is expanded through the document's evaluation context; any
/// other shape produces nothing.
pub fn evaluate_expression_as_paths<'a>(
    expression: Option<&ExpressionNode>,
    doc: &'a MsBuildDocument,
    skip_end_chars: usize,
    base_dir: Option<String>,
) -> PathCandidates<'a> {
    let base_dir = base_dir.unwrap_or_else(|| doc.directory());
    let source = match expression.map(ExpressionNode::last_list_entry) {
        None => PathSource::Path(base_dir),
        Some(ExpressionNode::Text(text)) => {
            let value = text.unescaped_value();
            let path = trim_end_chars(&value, skip_end_chars);
            if path.is_empty() {
                PathSource::Path(base_dir)
            } else {
                from_msbuild_path(path, &base_dir).map_or(PathSource::Nothing, PathSource::Path)
            }
        }
        Some(ExpressionNode::Concat(concat)) => {
            let last = concat.nodes.len().saturating_sub(1);
            let mut template = String::new();
            let mut supported = true;
            for (i, node) in concat.nodes.iter().enumerate() {
                match node {
                    ExpressionNode::Text(text) => {
                        let value = text.unescaped_value();
                        let value = if i == last {
                            trim_end_chars(&value, skip_end_chars)
                        } else {
                            &value
                        };
                        template.push_str(value);
                    }
                    ExpressionNode::Property(prop) => {
                        template.push_str("$(");
                        template.push_str(&prop.name);
                        template.push(')');
                    }
                    other => {
                        tracing::trace!("no path candidates for {:?}", other.range());
                        supported = false;
                        break;
                    }
                }
            }
            if supported {
                PathSource::Template { template, base_dir }
            } else {
                PathSource::Nothing
            }
        }
        Some(_) => PathSource::Nothing,
    };
    PathCandidates::new(doc.evaluation(), source)
}

/// The SDK directory when completing `Project` on an `<Import Sdk="...">`.
fn sdk_base_dir(doc: &MsBuildDocument, rr: &ResolveResult) -> Option<String> {
    if rr.language_attribute?.kind != SyntaxKind::ImportProject {
        return None;
    }
    let sdk = doc.tree().element(rr.element)?.attribute("Sdk")?.value.as_deref()?;
    let Some(sdk) = SdkReference::try_parse(sdk) else {
        tracing::trace!("ignoring unparseable SDK reference {:?}", sdk);
        return None;
    };
    let path = doc.runtime().sdk_path(&sdk, doc.path())?;
    Some(path.to_string_lossy().into_owned())
}

/// Files and folders for a path-valued `kind`.
///
/// Returns `None` when `kind` is not a path kind or no base path could be
/// computed. `trigger_length` is the length of the typed name being
/// replaced; it and the separator before it are trimmed.
pub fn filename_completions(
    kind: ValueKind,
    doc: &MsBuildDocument,
    trigger: Option<&ExpressionNode>,
    trigger_length: usize,
    rr: Option<&ResolveResult>,
    config: &CompletionConfig,
    cancel: &CancellationToken,
) -> Option<Vec<BaseInfo>> {
    let include_files = match kind.base() {
        BaseKind::File | BaseKind::ProjectFile | BaseKind::FileOrFolder => true,
        BaseKind::Folder | BaseKind::FolderWithSlash => false,
        _ => return None,
    };
    let base_dir = rr.and_then(|rr| sdk_base_dir(doc, rr));
    let candidates = evaluate_expression_as_paths(trigger, doc, trigger_length + 1, base_dir);
    let base_paths: Vec<String> = candidates.iter().collect();
    if base_paths.is_empty() {
        return None;
    }
    tracing::debug!("listing {} base path(s) for {}", base_paths.len(), kind);
    Some(path_completions(
        &base_paths,
        include_files,
        doc.file_system(),
        config.include_parent_directory,
        cancel,
    ))
}

/// Immediate children of each base path: folders, then files if wanted.
///
/// A base path that cannot be listed is logged and skipped. Cancellation
/// is checked before each base path.
pub fn path_completions(
    base_paths: &[String],
    include_files: bool,
    file_system: &dyn DirectoryListing,
    include_parent_directory: bool,
    cancel: &CancellationToken,
) -> Vec<BaseInfo> {
    let mut infos = Vec::new();
    for base in base_paths {
        if cancel.is_cancelled() {
            tracing::debug!("path listing cancelled before {}", base);
            break;
        }
        let dir = Path::new(base);
        if !file_system.exists(dir) {
            continue;
        }
        let entries = match file_system.list(dir) {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!("error enumerating paths under '{}': {}", base, err);
                continue;
            }
        };
        let (folders, files): (Vec<_>, Vec<_>) = entries.into_iter().partition(|e| e.is_dir);
        let files = if include_files { files } else { Vec::new() };
        infos.extend(folders.into_iter().chain(files).map(|entry| {
            BaseInfo::FileOrFolder(FileOrFolderInfo {
                name: entry.name,
                is_folder: entry.is_dir,
                description: SmolStr::new(entry.path.to_string_lossy()),
            })
        }));
    }
    if include_parent_directory {
        infos.push(BaseInfo::FileOrFolder(FileOrFolderInfo {
            name: "..".into(),
            is_folder: true,
            description: "The parent directory".into(),
        }));
    }
    infos
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::TextSize;
    use crate::expression::parse_expression;

    #[test]
    fn test_trim_end_chars() {
        assert_eq!(trim_end_chars(r"src\", 1), "src");
        assert_eq!(trim_end_chars("ab", 5), "");
        assert_eq!(trim_end_chars("dé", 1), "d");
        assert_eq!(trim_end_chars("abc", 0), "abc");
    }

    #[test]
    fn test_unsupported_concat_yields_nothing() {
        let doc = MsBuildDocument::parse("/proj/a.csproj", "<Project />");
        let expr = parse_expression(r"@(Compile)\bin", TextSize::new(0));
        let candidates = evaluate_expression_as_paths(Some(&expr), &doc, 0, None);
        assert_eq!(candidates.iter().count(), 0);
    }

    #[test]
    fn test_candidates_restart() {
        let doc = MsBuildDocument::parse(
            "/proj/a.csproj",
            "<Project><PropertyGroup><Configurations>Debug;Release</Configurations></PropertyGroup></Project>",
        );
        let expr = parse_expression(r"bin\$(Configuration)", TextSize::new(0));
        let candidates = evaluate_expression_as_paths(Some(&expr), &doc, 0, None);
        assert_eq!(candidates.iter().count(), 2);
        assert_eq!((&candidates).into_iter().count(), 2);
    }

    #[test]
    fn test_non_path_kind_is_not_completable() {
        let doc = MsBuildDocument::parse("/proj/a.csproj", "<Project />");
        let cancel = CancellationToken::new();
        let result = filename_completions(
            BaseKind::Bool.kind(),
            &doc,
            None,
            0,
            None,
            &CompletionConfig::default(),
            &cancel,
        );
        assert!(result.is_none());
    }
}

use std::path::{Path, PathBuf};

use crate::ide::AnalysisHost;

/// Extensions of MSBuild project and import files.
pub const PROJECT_EXTENSIONS: &[&str] = &["proj", "csproj", "vbproj", "fsproj", "props", "targets"];

/// Suffix of schema files loaded by [`ProjectLoader::load_schemas_from_directory`].
pub const SCHEMA_SUFFIX: &str = ".buildschema.json";

fn is_project_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| PROJECT_EXTENSIONS.iter().any(|known| known.eq_ignore_ascii_case(ext)))
}

fn is_schema_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.to_ascii_lowercase().ends_with(SCHEMA_SUFFIX))
}

/// Loads project files and schemas from disk into an [`AnalysisHost`].
#[derive(Clone, Copy, Debug, Default)]
pub struct ProjectLoader;

impl ProjectLoader {
    pub fn new() -> Self {
        Self
    }

    /// Loads every project file under a directory, recursively.
    pub fn load_directory_into_host<P: Into<PathBuf>>(
        &self,
        path: P,
        host: &mut AnalysisHost,
    ) -> Result<(), String> {
        let path = path.into();
        if !path.is_dir() {
            return Err(format!("Directory not found: {}", path.display()));
        }
        let mut paths = Vec::new();
        collect_files(&path, &is_project_file, &mut paths)?;

        let mut files = Vec::with_capacity(paths.len());
        let mut errors = Vec::new();
        for path in paths {
            match std::fs::read_to_string(&path) {
                Ok(text) => files.push((path, text)),
                Err(e) => errors.push(format!("{}: {}", path.display(), e)),
            }
        }
        host.set_files(files);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(format!(
                "Failed to load {} file(s):\n  {}",
                errors.len(),
                errors.join("\n  ")
            ))
        }
    }

    /// Loads a single project file.
    pub fn load_file_into_host<P: Into<PathBuf>>(
        &self,
        path: P,
        host: &mut AnalysisHost,
    ) -> Result<(), String> {
        let path = path.into();
        let text = std::fs::read_to_string(&path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        host.set_file_content(path, &text);
        Ok(())
    }

    /// Adds every `*.buildschema.json` under a directory as a schema source.
    ///
    /// Files are added in path order. A file that fails to load is reported
    /// and the rest are still added.
    #[cfg(feature = "json-schema")]
    pub fn load_schemas_from_directory<P: Into<PathBuf>>(
        &self,
        path: P,
        host: &mut AnalysisHost,
    ) -> Result<(), String> {
        use std::sync::Arc;

        use crate::schema::JsonSchema;

        let path = path.into();
        if !path.is_dir() {
            return Err(format!("Directory not found: {}", path.display()));
        }
        let mut paths = Vec::new();
        collect_files(&path, &is_schema_file, &mut paths)?;

        let mut errors = Vec::new();
        for schema_path in paths {
            match JsonSchema::load(&schema_path) {
                Ok(schema) => {
                    tracing::debug!("loaded schema from {}", schema_path.display());
                    host.add_schema(Arc::new(schema));
                }
                Err(e) => errors.push(format!("{}: {}", schema_path.display(), e)),
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(format!(
                "Failed to load {} schema file(s):\n  {}",
                errors.len(),
                errors.join("\n  ")
            ))
        }
    }
}

/// Files under `dir` accepted by `filter`, sorted by path.
fn collect_files(
    dir: &Path,
    filter: &dyn Fn(&Path) -> bool,
    results: &mut Vec<PathBuf>,
) -> Result<(), String> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| format!("Failed to read directory {}: {}", dir.display(), e))?;

    let mut children = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| format!("Failed to read directory entry: {}", e))?;
        children.push(entry.path());
    }
    children.sort();

    for path in children {
        if path.is_dir() {
            collect_files(&path, filter, results)?;
        } else if path.is_file() && filter(&path) {
            results.push(path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("src")).unwrap();
        std::fs::write(dir.path().join("app.csproj"), "<Project />").unwrap();
        std::fs::write(dir.path().join("src").join("Directory.Build.props"), "<Project />").unwrap();
        std::fs::write(dir.path().join("readme.md"), "# hi").unwrap();

        let mut host = AnalysisHost::new();
        ProjectLoader::new()
            .load_directory_into_host(dir.path(), &mut host)
            .unwrap();
        assert_eq!(host.file_count(), 2);
        assert!(host.has_file(dir.path().join("app.csproj")));
    }

    #[test]
    fn test_missing_directory() {
        let mut host = AnalysisHost::new();
        let result = ProjectLoader::new().load_directory_into_host("/does/not/exist", &mut host);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_single_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lib.fsproj");
        std::fs::write(&path, "<Project Sdk=\"Microsoft.NET.Sdk\" />").unwrap();

        let mut host = AnalysisHost::new();
        ProjectLoader::new().load_file_into_host(&path, &mut host).unwrap();
        assert!(host.has_file(&path));
    }

    #[test]
    fn test_file_filters() {
        assert!(is_project_file(Path::new("a.CSPROJ")));
        assert!(!is_project_file(Path::new("a.cs")));
        assert!(is_schema_file(Path::new("x.buildschema.json")));
        assert!(!is_schema_file(Path::new("x.json")));
    }
}

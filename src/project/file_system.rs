//! Directory listing for path completion.

use std::io;
use std::path::{Path, PathBuf};

use smol_str::SmolStr;

/// One immediate child of a listed directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirEntryInfo {
    pub name: SmolStr,
    pub path: PathBuf,
    pub is_dir: bool,
}

/// Read-only view of the file system. Listing must never modify it.
pub trait DirectoryListing: Send + Sync {
    fn exists(&self, dir: &Path) -> bool;

    /// Immediate children of `dir`, sorted by name.
    fn list(&self, dir: &Path) -> io::Result<Vec<DirEntryInfo>>;
}

/// The host file system.
#[derive(Clone, Copy, Debug, Default)]
pub struct StdFileSystem;

impl DirectoryListing for StdFileSystem {
    fn exists(&self, dir: &Path) -> bool {
        dir.is_dir()
    }

    fn list(&self, dir: &Path) -> io::Result<Vec<DirEntryInfo>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            let is_dir = entry.file_type()?.is_dir();
            entries.push(DirEntryInfo {
                name: SmolStr::new(entry.file_name().to_string_lossy()),
                path: entry.path(),
                is_dir,
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_sorted_with_kinds() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("obj")).unwrap();
        std::fs::write(dir.path().join("b.cs"), "").unwrap();
        std::fs::write(dir.path().join("a.cs"), "").unwrap();

        let entries = StdFileSystem.list(dir.path()).unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a.cs", "b.cs", "obj"]);
        assert!(entries[2].is_dir);
        assert!(!entries[0].is_dir);
    }

    #[test]
    fn test_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(!StdFileSystem.exists(&missing));
        assert!(StdFileSystem.list(&missing).is_err());
    }
}

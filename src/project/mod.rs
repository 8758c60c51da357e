//! Project files on disk: directory listing and loading into a host.

mod file_system;
mod loader;

pub use file_system::{DirEntryInfo, DirectoryListing, StdFileSystem};
pub use loader::{PROJECT_EXTENSIONS, ProjectLoader, SCHEMA_SUFFIX};

//! # msbuild-base
//!
//! Semantic resolution and completion for MSBuild project files.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide         → Completion, resolved references, AnalysisHost snapshots
//!   ↓
//! project     → Directory listing, loading projects and schemas from disk
//!   ↓
//! language    → Grammar, MsBuildDocument, offset → construct resolution
//!   ↓
//! evaluation  → Path template permutation
//! frameworks  → Target framework monikers and best-guess resolution
//! schema      → Value kinds, descriptors, schema sources and their merge
//!   ↓
//! expression  → $(..) @(..) %(..) expression parsing and escaping
//! syntax      → Element/attribute tree of a project file
//!   ↓
//! base        → Primitives (Name, TextRange, LineIndex)
//! ```

// ============================================================================
// MODULES (dependency order: base → syntax → expression → schema → language → ide)
// ============================================================================

/// Foundation types: case-insensitive Name, TextRange, LineIndex
pub mod base;

/// Syntax: the element/attribute tree of a project file
pub mod syntax;

/// Expressions inside attribute values and element text
pub mod expression;

/// Schema descriptors and value kinds
pub mod schema;

/// Target framework monikers
pub mod frameworks;

/// Path template evaluation
pub mod evaluation;

/// MSBuild grammar, documents and resolution
pub mod language;

/// Project loading and file system listing
pub mod project;

/// IDE features: completion, resolved references
pub mod ide;

// Re-export foundation types
pub use base::{LineCol, LineIndex, Name, TextRange, TextSize};

pub use language::{MsBuildDocument, ResolveResult, resolve};
pub use schema::{BaseInfo, SchemaError, SchemaRegistry, ValueKind};

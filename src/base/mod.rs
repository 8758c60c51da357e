//! Foundation types for the MSBuild language service.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//! - [`LineCol`], [`LineIndex`] - Line/column conversion
//! - [`Name`] - Case-insensitive MSBuild identifiers
//!
//! This module has NO dependencies on other crate modules.

mod name;
mod span;

pub use name::Name;
pub use span::{LineCol, LineIndex, TextRange, TextSize, range_touches};

// Re-export text-size types for convenience
pub use text_size;

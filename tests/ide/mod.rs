//! IDE feature tests
//!
//! Tests for:
//! - Element, attribute and value completion
//! - File and folder completion
//! - Resolved references

pub mod tests_completion;
pub mod tests_paths;
pub mod tests_reference;

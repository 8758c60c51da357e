//! Language layer tests
//!
//! Tests for:
//! - Offset resolution
//! - Target membership
//! - Value kind inference

pub mod tests_inference;
pub mod tests_resolve;

//! Project loading tests

pub mod tests_loader;

#[path = "helpers/mod.rs"]
mod helpers;

#[path = "ide/mod.rs"]
mod ide;

#[path = "language/mod.rs"]
mod language;

#[path = "project/mod.rs"]
mod project;

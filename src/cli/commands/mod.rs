//! CLI command implementations

pub mod check;
pub mod flatten;
pub mod list;
pub mod show;

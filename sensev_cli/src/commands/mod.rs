//! CLI subcommand implementations.

pub mod get;
pub mod post;

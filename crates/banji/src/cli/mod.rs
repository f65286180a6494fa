//! CLI support for the `banji` binary.

pub mod args;
pub mod commands;
pub mod config;
pub mod context;
pub mod output;

pub use context::CommandContext;

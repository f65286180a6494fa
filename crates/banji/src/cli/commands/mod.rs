//! Command implementations and dispatch.

pub mod add;
pub mod demo;
pub mod enroll;
pub mod init;
pub mod ls;
pub mod report;
pub mod stats;

use std::process::ExitCode;

use super::args::Commands;
use super::context::CommandContext;

/// Dispatches to the selected subcommand.
pub fn run(command: Commands, ctx: &CommandContext) -> ExitCode {
    match command {
        Commands::Init(cmd) => init::run(ctx, &cmd),
        Commands::Demo => demo::run(ctx),
        Commands::Add { what } => add::run(ctx, &what),
        Commands::Enroll { student, class } => enroll::run(ctx, student, class),
        Commands::Ls { what } => ls::run(ctx, what),
        Commands::Stats { what } => stats::run(ctx, &what),
        Commands::Report { what } => report::run(ctx, what),
    }
}

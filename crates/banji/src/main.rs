//! banji: school records and class question analytics.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

fn main() -> ExitCode {
    // Logs go to stderr so table and JSON output stay pipeable.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let args = cli::args::Cli::parse();
    // A forced init must be able to replace a config that no longer
    // parses, so it loads leniently.
    let force_init = matches!(&args.command, cli::args::Commands::Init(cmd) if cmd.force);
    let loaded = if force_init {
        cli::CommandContext::load_or_default(args.config.as_deref())
    } else {
        cli::CommandContext::load(args.config.as_deref())
    };
    let ctx = match loaded {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };
    cli::commands::run(args.command, &ctx)
}

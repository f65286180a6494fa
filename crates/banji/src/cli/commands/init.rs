//! Implementation of `banji init`.

use std::fs;
use std::process::ExitCode;

use crate::cli::args::InitCommand;
use crate::cli::config::CONFIG_FILENAME;
use crate::cli::context::CommandContext;

/// Default configuration template with commented defaults.
const CONFIG_TEMPLATE: &str = include_str!("../../../templates/banji.toml");

/// Writes banji.toml and creates the empty database.
pub fn run(ctx: &CommandContext, cmd: &InitCommand) -> ExitCode {
    let config_path = ctx.cwd.join(CONFIG_FILENAME);
    if config_path.exists() && !cmd.force {
        eprintln!(
            "error: configuration file already exists: {}",
            config_path.display()
        );
        eprintln!("use --force to overwrite");
        return ExitCode::FAILURE;
    }

    if let Err(e) = fs::write(&config_path, CONFIG_TEMPLATE) {
        eprintln!("error: failed to write {}: {e}", config_path.display());
        return ExitCode::FAILURE;
    }
    println!("Created {}", config_path.display());

    // Opening creates the file and schema.
    match ctx.open_store() {
        Ok(_) => {
            println!("Created {}", ctx.store_path().display());
            ExitCode::SUCCESS
        }
        Err(code) => code,
    }
}

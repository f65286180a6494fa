//! Shared context for running CLI commands.

use std::env;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use banji_render::RenderConfig;
use banji_store::Store;
use tracing::warn;

use super::config::Config;

/// Command execution context built once per CLI invocation.
pub struct CommandContext {
    /// Current working directory.
    pub cwd: PathBuf,
    /// Loaded configuration (defaults if no config file was found).
    pub config: Config,
    /// Where the configuration came from, if a file was found.
    pub config_path: Option<PathBuf>,
}

impl CommandContext {
    /// Loads the current directory and configuration.
    pub fn load(explicit_config: Option<&Path>) -> Result<Self, ExitCode> {
        let cwd = current_dir()?;
        let (config, config_path) = Config::load(explicit_config, &cwd).map_err(|e| {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        })?;
        Ok(Self {
            cwd,
            config,
            config_path,
        })
    }

    /// Like [`Self::load`], but a config file that no longer reads or
    /// parses falls back to the defaults instead of failing, so
    /// `init --force` can replace a broken file.
    pub fn load_or_default(explicit_config: Option<&Path>) -> Result<Self, ExitCode> {
        let cwd = current_dir()?;
        let (config, config_path) = match Config::load(explicit_config, &cwd) {
            Ok(loaded) => loaded,
            Err(e) => {
                warn!("ignoring existing configuration: {e}");
                (Config::default(), None)
            }
        };
        Ok(Self {
            cwd,
            config,
            config_path,
        })
    }

    /// The database path this invocation operates on.
    pub fn store_path(&self) -> PathBuf {
        self.config.store_path(&self.cwd)
    }

    /// Opens the school database, creating file and schema if needed.
    pub fn open_store(&self) -> Result<Store, ExitCode> {
        let path = self.store_path();
        Store::open(&path).map_err(|e| {
            eprintln!("error: could not open database {}: {e}", path.display());
            ExitCode::FAILURE
        })
    }

    /// Renderer options with defaults filled in.
    pub fn render_config(&self) -> RenderConfig {
        self.config.render_config(&self.cwd)
    }
}

/// The process working directory, with the I/O failure reported.
fn current_dir() -> Result<PathBuf, ExitCode> {
    env::current_dir().map_err(|e| {
        eprintln!("error: could not determine current directory: {e}");
        ExitCode::FAILURE
    })
}

//! The banji.toml configuration file.
//!
//! Discovery order: the `--config` flag, then `banji.toml` in the working
//! directory, then the user config directory. A missing file is not an
//! error; every field has a default.

use std::path::{Path, PathBuf};
use std::{fs, io};

use banji_render::RenderConfig;
use directories::ProjectDirs;
use serde::Deserialize;
use thiserror::Error;

/// Name of the configuration file.
pub const CONFIG_FILENAME: &str = "banji.toml";

/// Default database filename when the config does not name one.
pub const DEFAULT_DB_FILENAME: &str = "banji.db";

/// Parsed banji.toml contents.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// `[store]` section.
    #[serde(default)]
    pub store: StoreSection,
    /// `[render]` section.
    #[serde(default)]
    pub render: RenderSection,
}

/// `[store]` settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreSection {
    /// SQLite database file.
    pub path: Option<PathBuf>,
}

/// `[render]` settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderSection {
    /// CJK-capable TrueType font for report images.
    pub font: Option<PathBuf>,
    /// Directory report images are written into.
    pub out_dir: Option<PathBuf>,
}

/// Config loading failures, rendered for the CLI user.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("could not read {path}: {source}")]
    Read {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The file is not valid TOML for this schema.
    #[error("invalid config {path}: {source}")]
    Parse {
        /// Path to the file that could not be parsed.
        path: PathBuf,
        /// Underlying TOML parse error.
        source: toml::de::Error,
    },
}

impl Config {
    /// Loads configuration, returning it with the file it came from.
    ///
    /// `explicit` wins outright and must exist; otherwise the first file
    /// found in the discovery order is used, and `(default, None)` when
    /// nothing is found.
    pub fn load(
        explicit: Option<&Path>,
        cwd: &Path,
    ) -> Result<(Self, Option<PathBuf>), ConfigError> {
        if let Some(path) = explicit {
            return Self::read(path).map(|config| (config, Some(path.to_path_buf())));
        }
        for candidate in discovery_candidates(cwd) {
            if candidate.is_file() {
                return Self::read(&candidate).map(|config| (config, Some(candidate)));
            }
        }
        Ok((Self::default(), None))
    }

    /// Reads and parses one file.
    fn read(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The database path, resolved against `cwd` when relative.
    pub fn store_path(&self, cwd: &Path) -> PathBuf {
        let path = self
            .store
            .path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILENAME));
        if path.is_absolute() {
            path
        } else {
            cwd.join(path)
        }
    }

    /// Renderer options with defaults filled in.
    pub fn render_config(&self, cwd: &Path) -> RenderConfig {
        let defaults = RenderConfig::default();
        let out_dir = self.render.out_dir.clone().unwrap_or(defaults.out_dir);
        RenderConfig {
            font_path: self.render.font.clone().unwrap_or(defaults.font_path),
            out_dir: if out_dir.is_absolute() {
                out_dir
            } else {
                cwd.join(out_dir)
            },
        }
    }
}

/// Paths checked, in order, when no explicit config is given.
fn discovery_candidates(cwd: &Path) -> Vec<PathBuf> {
    let mut candidates = vec![cwd.join(CONFIG_FILENAME)];
    if let Some(dirs) = ProjectDirs::from("", "", "banji") {
        candidates.push(dirs.config_dir().join(CONFIG_FILENAME));
    }
    candidates
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert!(config.store.path.is_none());
    }

    #[test]
    fn sections_parse() {
        let config: Config = toml::from_str(
            "[store]\npath = \"school.db\"\n\n[render]\nfont = \"/fonts/hei.ttf\"\nout_dir = \"reports\"\n",
        )
        .unwrap();
        assert_eq!(config.store.path.as_deref(), Some(Path::new("school.db")));
        assert_eq!(
            config.render.font.as_deref(),
            Some(Path::new("/fonts/hei.ttf"))
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(toml::from_str::<Config>("[store]\ndatabase = \"x\"\n").is_err());
    }

    #[test]
    fn relative_paths_resolve_against_cwd() {
        let config: Config =
            toml::from_str("[store]\npath = \"db/school.db\"\n[render]\nout_dir = \"out\"\n")
                .unwrap();
        let cwd = Path::new("/work");
        assert_eq!(config.store_path(cwd), Path::new("/work/db/school.db"));
        assert_eq!(config.render_config(cwd).out_dir, Path::new("/work/out"));
    }

    #[test]
    fn absolute_paths_pass_through() {
        let config: Config = toml::from_str("[store]\npath = \"/data/school.db\"\n").unwrap();
        assert_eq!(
            config.store_path(Path::new("/work")),
            Path::new("/data/school.db")
        );
    }

    #[test]
    fn defaults_match_the_renderer_defaults() {
        let config = Config::default();
        let rendered = config.render_config(Path::new("/work"));
        assert_eq!(rendered.font_path, RenderConfig::default().font_path);
        assert_eq!(rendered.out_dir, Path::new("/work"));
    }

    #[test]
    fn missing_everything_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let (config, source) = Config::load(None, dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(source.is_none());
    }

    #[test]
    fn explicit_file_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(Config::load(Some(&missing), dir.path()).is_err());
    }

    #[test]
    fn load_errors_name_the_offending_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = Config::load(Some(&missing), dir.path()).unwrap_err();
        let text = err.to_string();
        assert!(text.contains("could not read"));
        assert!(text.contains("nope.toml"));

        let broken = dir.path().join("broken.toml");
        fs::write(&broken, "not = [valid").unwrap();
        let err = Config::load(Some(&broken), dir.path()).unwrap_err();
        let text = err.to_string();
        assert!(text.contains("invalid config"));
        assert!(text.contains("broken.toml"));
    }

    #[test]
    fn cwd_file_is_discovered() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        fs::write(&path, "[store]\npath = \"x.db\"\n").unwrap();
        let (config, source) = Config::load(None, dir.path()).unwrap();
        assert_eq!(config.store.path.as_deref(), Some(Path::new("x.db")));
        assert_eq!(source, Some(path));
    }
}

//! Runtime font registration for chart text.
//!
//! plotters built without the system font stack has no fonts at all until
//! one is registered, and the reports draw Chinese keyword labels. The
//! configured TrueType file is read once per process and registered under
//! [`FONT_FAMILY`] and under plotters' default "sans-serif" name, so mesh
//! labels styled with the default family resolve to the same face.

use std::{fs, path::Path, sync::OnceLock};

use plotters::style::{FontStyle, register_font};

use crate::error::RenderError;

/// Family name chart text styles refer to.
pub const FONT_FAMILY: &str = "report-cjk";

/// Display path of the font registered for this process.
static REGISTERED: OnceLock<String> = OnceLock::new();

/// Loads `path` and registers it for chart text.
///
/// Idempotent: the first successful registration wins for the lifetime of
/// the process and later calls return without touching the filesystem.
pub fn ensure_font(path: &Path) -> Result<(), RenderError> {
    if REGISTERED.get().is_some() {
        return Ok(());
    }
    let bytes = load_font_bytes(path)?;
    // Registration holds the bytes for the rest of the process.
    let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
    for family in [FONT_FAMILY, "sans-serif"] {
        register_font(family, FontStyle::Normal, bytes).map_err(|_| {
            RenderError::FontInvalid {
                path: path.to_path_buf(),
            }
        })?;
    }
    REGISTERED.get_or_init(|| path.display().to_string());
    Ok(())
}

/// Reads the font file, mapping failures to the configured-path error.
fn load_font_bytes(path: &Path) -> Result<Vec<u8>, RenderError> {
    fs::read(path).map_err(|source| RenderError::FontLoad {
        path: path.to_path_buf(),
        source,
    })
}

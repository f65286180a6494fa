//! Rendering error types.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors produced while rendering report images.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The configured font file could not be read.
    #[error(
        "failed to read font {path}: {source} (charts need a CJK-capable \
         TrueType font; point [render] font in banji.toml at one)"
    )]
    FontLoad {
        /// Configured font path.
        path: PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },

    /// The font file was read but rejected by the glyph engine.
    #[error("font {path} is not a usable TrueType or OpenType face")]
    FontInvalid {
        /// Configured font path.
        path: PathBuf,
    },

    /// The keyword set was empty; there is nothing to draw.
    #[error("no keywords to render")]
    EmptyInput,

    /// A drawing primitive or the image encoder failed.
    #[error("drawing failed: {0}")]
    Draw(String),
}

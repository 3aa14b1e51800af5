//! # ACF I/O Errors

use body_grid::BodyGridError;
use config::constants::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for file-side operations.
pub type AcfResult<T> = Result<T, AcfError>;

/// Errors raised while reading inputs or rewriting an `.acf` file.
#[derive(Debug, Error)]
pub enum AcfError {
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Malformed input line (1-based line number)
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("PROPERTIES_BEGIN/PROPERTIES_END block not found")]
    MissingPropertiesBlock,

    /// The template's `_geo_xyz` extent cannot hold the grid.
    #[error("template holds {stations}x{slots} cells, the grid needs {grid_stations}x{grid_slots}")]
    TemplateTooSmall {
        stations: usize,
        slots: usize,
        grid_stations: usize,
        grid_slots: usize,
    },

    #[error("no bodies assigned")]
    NoAssignments,

    #[error("mesh '{name}' not found in the OBJ file")]
    UnknownMesh { name: String },

    #[error("body index {index} is assigned more than once")]
    DuplicateBodyIndex { index: usize },

    #[error("body indices must run from 0 without gaps, {missing} is missing")]
    NonContiguousBodyIndices { missing: usize },

    /// A body failed in the engine; nothing was written.
    #[error("body {index} ('{mesh}'): {source}")]
    Body {
        index: usize,
        mesh: String,
        #[source]
        source: BodyGridError,
    },

    #[error(transparent)]
    Engine(#[from] BodyGridError),

    #[error("invalid grid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AcfError {
    /// Creates a `Parse` error for a 1-based line number.
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}

//! Error type for rendering and writing output files.

use std::{io, path::PathBuf};

use bitdraw::errors::LayoutError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    /// Writing an output file failed.
    #[error("failed to write {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Writing to an in-memory or caller-provided sink failed.
    #[error("failed to write output")]
    Write(#[from] io::Error),
    /// A line of a curve data file is not an x/y pair.
    #[error("line {line}: expected two numbers, found `{content}`")]
    CurveData { line: usize, content: String },
    /// A curve data file contains no points.
    #[error("curve data contains no points")]
    EmptyCurve,
    /// No built-in figure has this name.
    #[error("unknown figure `{0}`")]
    UnknownFigure(String),
    #[error(transparent)]
    Layout(#[from] LayoutError),
}

//! Error types for hickory.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// The main error type for plotting operations.
#[derive(Debug, Error)]
pub enum PlotError {
    /// Error during IO operations (file writing, etc.)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Invalid data provided for plotting
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Invalid configuration or parameters
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Rendering or encoding error
    #[error("Render error: {0}")]
    Render(String),

    /// Empty data provided where non-empty data is required
    #[error("Empty data provided")]
    EmptyData,

    /// The output path has no extension we know how to write.
    #[error("Unsupported output format for {path}")]
    UnsupportedFormat { path: PathBuf },

    /// A table cell index outside the table's shape.
    #[error("index ({row}, {col}) out of range for {rows}x{cols} table")]
    IndexOutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// Interactive show requested but no display is available.
    #[error("no display available")]
    NoDisplay,

    /// A display exists but no image viewer program was found.
    #[error("no interactive viewer found (install feh/eog or set HICKORY_VIEWER)")]
    NoViewer,

    /// Interactive show requested while the backend is forced headless.
    #[error("interactive display disabled by HICKORY_BACKEND")]
    HeadlessForced,

    /// The viewer program failed.
    #[error("viewer error: {0}")]
    Viewer(String),
}

impl PlotError {
    /// True for the errors raised when an interactive show cannot happen.
    pub fn is_display_error(&self) -> bool {
        matches!(
            self,
            PlotError::NoDisplay | PlotError::NoViewer | PlotError::HeadlessForced
        )
    }

    pub(crate) fn length_mismatch(what: &str, expected: usize, got: usize) -> Self {
        PlotError::InvalidData(format!(
            "{} has length {}, expected {}",
            what, got, expected
        ))
    }
}

/// Result type alias for plotting operations.
pub type PlotResult<T> = Result<T, PlotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_errors_are_distinguishable() {
        assert!(PlotError::NoDisplay.is_display_error());
        assert!(PlotError::NoViewer.is_display_error());
        assert!(PlotError::HeadlessForced.is_display_error());
        assert!(!PlotError::EmptyData.is_display_error());
        assert_eq!(PlotError::NoDisplay.to_string(), "no display available");
    }

    #[test]
    fn test_index_error_message() {
        let err = PlotError::IndexOutOfRange {
            row: 2,
            col: 0,
            rows: 2,
            cols: 3,
        };
        assert_eq!(err.to_string(), "index (2, 0) out of range for 2x3 table");
    }
}

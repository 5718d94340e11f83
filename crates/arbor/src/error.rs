//! Error types for Arbor operations.
//!
//! The layout pipeline itself never fails: degenerate input produces an empty
//! or partial layout. [`ArborError`] covers everything around it, such as
//! assembling a tree, validating configuration, reading tree documents and
//! writing exports.

use std::{io, ops::Range};

use thiserror::Error;

use arbor_core::tree::TreeError;

/// The main error type for Arbor operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the offending source text and, when known, the
/// byte range of the problem so callers can render a source snippet.
#[derive(Debug, Error)]
pub enum ArborError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Tree error: {0}")]
    Tree(#[from] TreeError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{message}")]
    Parse {
        message: String,
        src: String,
        span: Option<Range<usize>>,
    },

    #[error("Export error: {0}")]
    Export(String),
}

impl ArborError {
    /// Create a new `Parse` error with the associated source text.
    pub fn new_parse_error(
        message: impl Into<String>,
        src: impl Into<String>,
        span: Option<Range<usize>>,
    ) -> Self {
        Self::Parse {
            message: message.into(),
            src: src.into(),
            span,
        }
    }
}

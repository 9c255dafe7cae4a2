use std::{
    io,
    path::{Path, PathBuf},
    str::Utf8Error,
};

use thiserror::Error;

/// Errors surfaced while reading lines backward.
///
/// Every variant is fatal: the reader moves to [`ReaderState::Failed`] and
/// releases its source before the error is returned.
///
/// [`ReaderState::Failed`]: crate::ReaderState::Failed
#[derive(Error, Debug)]
pub enum ReaderError {
    /// The source could not be opened or its size could not be determined.
    #[error("failed to open {}: {source}", display_path(path.as_deref()))]
    OpenFailure {
        /// Path of the file; `None` for sources passed to
        /// [`ReverseLineReader::from_source`](crate::ReverseLineReader::from_source).
        path: Option<PathBuf>,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A positioned read failed part way through the stream.
    #[error("failed to read {len} bytes at offset {offset}: {source}")]
    ReadFailure {
        /// File offset the window read started at.
        offset: u64,
        /// Number of bytes requested.
        len: usize,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A finalized line is not valid UTF-8 and the reader decodes strictly.
    #[error("invalid UTF-8 in line starting at offset {offset}: {source}")]
    DecodeFailure {
        /// File offset of the first byte of the offending line.
        offset: u64,
        /// Position of the invalid sequence within the line.
        #[source]
        source: Utf8Error,
    },
}

impl ReaderError {
    /// File offset the error refers to, if any.
    #[must_use]
    pub fn offset(&self) -> Option<u64> {
        match self {
            Self::OpenFailure { .. } => None,
            Self::ReadFailure { offset, .. } | Self::DecodeFailure { offset, .. } => Some(*offset),
        }
    }
}

fn display_path(path: Option<&Path>) -> String {
    path.map_or_else(|| "source".to_owned(), |p| p.display().to_string())
}

//! Error types for comment extraction and documentation assembly

use std::path::PathBuf;
use thiserror::Error;

/// Failure to map an offset back to a source line.
///
/// Either variant means the text was rewritten inconsistently with the index
/// it was resolved against. Neither is recoverable for the file at hand.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LineIndexError {
    #[error("line {line} of the index is malformed, file is likely corrupted")]
    Corrupt { line: usize },

    #[error("offset {offset} lies beyond the indexed text, file is likely corrupted")]
    NotFound { offset: usize },
}

/// Failure while parsing a single text for comments
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The caller handed over empty text. Empty files must be skipped before parsing.
    #[error("cannot parse empty input")]
    EmptyInput,

    #[error(transparent)]
    LineIndex(#[from] LineIndexError),
}

/// Failure while assembling extracted comments into a document
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    #[error("no comments were present in the files")]
    NoComments,

    #[error("improperly formatted title comment at {}:{line}", file.display())]
    MalformedTitle { file: PathBuf, line: usize },
}

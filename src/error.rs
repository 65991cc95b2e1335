//! Unified error types for storyline
//!
//! Provides a top-level `TimelineError` that wraps source-attempt errors,
//! plus `From` impls so `?` works across module boundaries.

use core::fmt;

/// Top-level error type for storyline operations
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TimelineError {
    /// A data-source attempt failed terminally
    Source(SourceError),
    /// Every configured data source was exhausted without producing a document
    NoData,
    /// The document parsed but contains zero chapters
    EmptyDataset,
    /// I/O error (description only, since `std::io::Error` is not `Clone`)
    Io(String),
    /// Chapter index requested is out of bounds
    ChapterOutOfBounds {
        /// Requested chapter index.
        index: usize,
        /// Total number of chapters available.
        chapter_count: usize,
    },
}

impl fmt::Display for TimelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimelineError::Source(err) => write!(f, "Source error: {}", err),
            TimelineError::NoData => write!(
                f,
                "No timeline data found. Embed the data in the page or provide data.json next to it."
            ),
            TimelineError::EmptyDataset => write!(f, "No chapters found in timeline data"),
            TimelineError::Io(msg) => write!(f, "I/O error: {}", msg),
            TimelineError::ChapterOutOfBounds {
                index,
                chapter_count,
            } => write!(
                f,
                "Chapter index {} out of bounds (chapter count: {})",
                index, chapter_count
            ),
        }
    }
}

/// Error from a single data-source attempt
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SourceError {
    /// Source content is not a valid timeline JSON document
    Parse(String),
    /// Network or file-access failure before any content arrived
    Transport(String),
    /// HTTP response carried a non-success status
    HttpStatus(u16),
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Parse(msg) => write!(f, "failed to parse JSON: {}", msg),
            SourceError::Transport(msg) => write!(f, "transport failure: {}", msg),
            SourceError::HttpStatus(status) => write!(f, "HTTP {}", status),
        }
    }
}

impl std::error::Error for TimelineError {}

impl std::error::Error for SourceError {}

impl From<SourceError> for TimelineError {
    fn from(err: SourceError) -> Self {
        TimelineError::Source(err)
    }
}

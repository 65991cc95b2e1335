//! storyline -- timeline page renderer
//!
//! Loads a JSON chapter document through a prioritized source chain
//! (embedded payload, HTTP fetch, legacy low-level retry), normalizes it
//! into an ordered chapter sequence, and prepares resolved chapter records
//! for the render crates. The pipeline up to rendering is pure and runs
//! without any host page present.
//!
//! # Features
//!
//! - `fetch` (default) -- enables the reqwest-backed primary HTTP fetch
//! - `cli` -- enables the `storyline` inspection binary
//!
//! # Crates
//!
//! The structural block builders, host-page contract, and page controller
//! live in `storyline-render`; HTML emission lives in
//! `storyline-render-web`.

#![warn(missing_docs)]
#![deny(clippy::large_enum_variant, clippy::redundant_clone)]
#![warn(
    clippy::needless_collect,
    clippy::map_clone,
    clippy::implicit_clone,
    clippy::inefficient_to_string
)]

pub mod document;
pub mod error;
pub mod render_prep;
pub mod sequence;
pub mod source;
pub mod validate;

// Re-export key types for convenience
pub use document::{
    parse_document, Chapter, ChapterContent, Intro, PageChrome, TimelineDocument,
};
pub use error::{SourceError, TimelineError};
pub use render_prep::{
    anchor_id, fallback_title, number_label, prepare_chapter, prepare_chapters, PreparedChapter,
    PreparedImage,
};
pub use sequence::ChapterSeq;
pub use source::{default_sources, load_document, ChapterSource, SourceKind, DATA_FILE};
pub use validate::{
    validate_timeline_json, ValidationDiagnostic, ValidationReport, ValidationSeverity,
};

//! Ordered chapter sequence
//!
//! The sequence defines the final display order of chapters. It is rebuilt
//! wholesale from a parsed document on every load and is the single source
//! of truth consumed by both the navigation and chapter renderers.

use crate::document::{Chapter, TimelineDocument};

/// Final ordered chapter sequence
///
/// Chapters are stable-sorted by their `order` key ascending; ties keep the
/// relative input order. Display numbering is strictly the 1-based position
/// in this sequence, independent of `order` values.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChapterSeq {
    chapters: Vec<Chapter>,
}

impl ChapterSeq {
    /// Create a new empty sequence
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the sequence from a raw chapter list, applying the stable sort.
    pub fn from_chapters(mut chapters: Vec<Chapter>) -> Self {
        chapters.sort_by(|a, b| a.order.total_cmp(&b.order));
        Self { chapters }
    }

    /// Build the sequence from a parsed document, consuming it.
    pub fn from_document(document: TimelineDocument) -> Self {
        Self::from_chapters(document.chapters)
    }

    /// Get a reference to the ordered chapters
    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    /// Get total number of chapters
    pub fn len(&self) -> usize {
        self.chapters.len()
    }

    /// Check if the sequence is empty
    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }

    /// Get chapter at specific position (0-indexed)
    pub fn get(&self, index: usize) -> Option<&Chapter> {
        self.chapters.get(index)
    }

    /// Iterate over chapters in display order
    pub fn iter(&self) -> core::slice::Iter<'_, Chapter> {
        self.chapters.iter()
    }
}

impl<'a> IntoIterator for &'a ChapterSeq {
    type Item = &'a Chapter;
    type IntoIter = core::slice::Iter<'a, Chapter>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

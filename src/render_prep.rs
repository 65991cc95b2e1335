//! Render preparation: resolved per-chapter records
//!
//! Pure resolution step between the chapter sequence and the render crates.
//! Both the navigation renderer and the chapter renderer consume the same
//! `PreparedChapter` records, which pins the index-to-chapter agreement
//! invariant: position N in the prepared list is always anchor `chapter-N+1`.

use crate::error::TimelineError;
use crate::sequence::ChapterSeq;

/// Anchor id for a 1-based chapter number, e.g. `chapter-3`.
pub fn anchor_id(number: usize) -> String {
    format!("chapter-{}", number)
}

/// Generated title for an untitled chapter, e.g. `Chapter 3`.
pub fn fallback_title(number: usize) -> String {
    format!("Chapter {}", number)
}

/// Two-digit zero-padded display label for a chapter number, e.g. `03`.
pub fn number_label(number: usize) -> String {
    format!("{:02}", number)
}

/// Resolved image reference for a prepared chapter
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreparedImage {
    /// Image URL or path, verbatim from the document
    pub src: String,
    /// Resolved alt text: `imageAlt`, then `title`, then a generated label
    pub alt: String,
}

/// A chapter with every display value resolved
///
/// All fallback rules are applied here so the renderers stay purely
/// structural.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreparedChapter {
    /// 0-based position in the final sorted order
    pub index: usize,
    /// 1-based display number
    pub number: usize,
    /// Stable anchor id, `chapter-{number}`
    pub anchor: String,
    /// Zero-padded display label for the number
    pub number_label: String,
    /// Resolved title (document title or generated fallback)
    pub title: String,
    /// Resolved image, when the chapter carries one
    pub image: Option<PreparedImage>,
    /// Flattened paragraph list in document order
    pub paragraphs: Vec<String>,
    /// Optional trailing metadata note
    pub metadata: Option<String>,
}

/// Prepare every chapter of a sequence, in display order.
pub fn prepare_chapters(seq: &ChapterSeq) -> Vec<PreparedChapter> {
    seq.iter()
        .enumerate()
        .map(|(index, chapter)| prepare(chapter, index))
        .collect()
}

/// Prepare a single chapter by its position in the sequence.
pub fn prepare_chapter(seq: &ChapterSeq, index: usize) -> Result<PreparedChapter, TimelineError> {
    match seq.get(index) {
        Some(chapter) => Ok(prepare(chapter, index)),
        None => Err(TimelineError::ChapterOutOfBounds {
            index,
            chapter_count: seq.len(),
        }),
    }
}

fn prepare(chapter: &crate::document::Chapter, index: usize) -> PreparedChapter {
    let number = index + 1;
    let title = chapter
        .title
        .clone()
        .unwrap_or_else(|| fallback_title(number));

    let image = chapter.image.as_ref().map(|src| PreparedImage {
        src: src.clone(),
        alt: chapter
            .image_alt
            .clone()
            .or_else(|| chapter.title.clone())
            .unwrap_or_else(|| format!("Chapter {} image", number)),
    });

    let paragraphs = chapter
        .content
        .as_ref()
        .map(|content| content.paragraphs().to_vec())
        .unwrap_or_default();

    PreparedChapter {
        index,
        number,
        anchor: anchor_id(number),
        number_label: number_label(number),
        title,
        image,
        paragraphs,
        metadata: chapter.metadata.clone(),
    }
}

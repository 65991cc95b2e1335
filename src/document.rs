//! Timeline document model and JSON parsing
//!
//! The payload is a single JSON object with optional page-chrome overrides
//! (`title`, `intro`) and an ordered list of chapters. Parsing is tolerant:
//! unknown fields are ignored, a non-numeric `order` falls back to the
//! default, and unrenderable `content` shapes are preserved without failing
//! the parse.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::SourceError;

/// Top-level parsed timeline payload
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct TimelineDocument {
    /// Optional site-title override
    #[serde(default)]
    pub title: Option<String>,
    /// Optional intro-section overrides
    #[serde(default)]
    pub intro: Option<Intro>,
    /// Ordered chapter list; absent in the payload means empty
    #[serde(default)]
    pub chapters: Vec<Chapter>,
}

impl TimelineDocument {
    /// Extract the page-chrome overrides carried by this document.
    pub fn chrome(&self) -> PageChrome {
        PageChrome {
            title: self.title.clone(),
            intro_title: self.intro.as_ref().and_then(|i| i.title.clone()),
            intro_text: self.intro.as_ref().and_then(|i| i.text.clone()),
        }
    }
}

/// Intro-section override payload
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Intro {
    /// Intro heading override
    #[serde(default)]
    pub title: Option<String>,
    /// Intro body text override
    #[serde(default)]
    pub text: Option<String>,
}

/// One titled unit of timeline content
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Chapter {
    /// Display title; a positional fallback label is generated when absent
    #[serde(default)]
    pub title: Option<String>,
    /// Sort key, default 0. Ties keep relative input order.
    #[serde(default, deserialize_with = "order_from_json")]
    pub order: f64,
    /// Optional image URL or path
    #[serde(default)]
    pub image: Option<String>,
    /// Optional image alt text; falls back to `title`, then a generated label
    #[serde(default, rename = "imageAlt")]
    pub image_alt: Option<String>,
    /// Paragraph content: one string, a list of strings, or anything else
    /// (which renders no paragraphs)
    #[serde(default)]
    pub content: Option<ChapterContent>,
    /// Optional trailing metadata note
    #[serde(default)]
    pub metadata: Option<String>,
}

/// Chapter paragraph content in its accepted shapes
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ChapterContent {
    /// A single paragraph
    Text(String),
    /// One paragraph per element, in order
    Paragraphs(Vec<String>),
    /// Any other JSON shape; renders zero paragraphs
    Other(Value),
}

impl ChapterContent {
    /// View the content as a paragraph slice. `Other` shapes yield none.
    pub fn paragraphs(&self) -> &[String] {
        match self {
            ChapterContent::Text(text) => core::slice::from_ref(text),
            ChapterContent::Paragraphs(items) => items,
            ChapterContent::Other(_) => &[],
        }
    }
}

/// Page-chrome overrides applied outside the chapters container.
///
/// Applied independent of chapter success; each field is only written to the
/// host page when present.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageChrome {
    /// Site-title override
    pub title: Option<String>,
    /// Intro heading override
    pub intro_title: Option<String>,
    /// Intro body text override
    pub intro_text: Option<String>,
}

/// Parse a raw JSON payload into a `TimelineDocument`.
pub fn parse_document(text: &str) -> Result<TimelineDocument, SourceError> {
    serde_json::from_str(text).map_err(|e| SourceError::Parse(e.to_string()))
}

// `order` may be any JSON value in quirky payloads; only numbers count.
fn order_from_json<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_f64().unwrap_or(0.0))
}

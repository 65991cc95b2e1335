use std::collections::{BTreeMap, BTreeSet};

use storyline::{
    load_document, prepare_chapters, ChapterSeq, ChapterSource, PageChrome, PreparedChapter,
    TimelineDocument, TimelineError,
};

use crate::render_ir::{chapter_block, error_notice, navigation_links, Node};
use crate::reveal::{Rect, RevealConfig, RevealObserver, Viewport};

/// Addressable host-page regions.
///
/// The host page may omit any of them; rendering is a no-op for absent
/// regions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Region {
    /// Displayed site title
    SiteTitle,
    /// Intro section heading
    IntroTitle,
    /// Intro section body text
    IntroText,
    /// Navigation menu container
    Navigation,
    /// Chapters container
    Chapters,
}

/// Host-page adapter contract.
///
/// The renderers produce block trees; a host implementation owns the actual
/// page mutation. Region operations report whether the region exists so the
/// renderers can no-op cleanly.
pub trait HostPage {
    /// Whether the page exposes the region at all.
    fn has_region(&self, region: Region) -> bool;

    /// Overwrite a text-only chrome region. Returns false when absent.
    fn set_region_text(&mut self, region: Region, text: &str) -> bool;

    /// Replace a container region's contents wholesale (clears first).
    /// Returns false when absent.
    fn replace_region(&mut self, region: Region, nodes: Vec<Node>) -> bool;

    /// Page-coordinate rect of a rendered chapter block, when laid out.
    fn block_rect(&self, anchor: &str) -> Option<Rect>;

    /// Current scroll viewport.
    fn viewport(&self) -> Viewport;

    /// Apply the one-shot visible marker to a chapter block.
    fn mark_visible(&mut self, anchor: &str) -> bool;

    /// Whether the host can deliver viewport-intersection geometry.
    fn supports_intersection(&self) -> bool {
        true
    }

    /// Force the page back to the top. Called once per presentation.
    fn reset_scroll(&mut self) {}
}

/// Replace the navigation region with one link per chapter.
///
/// Idempotent: re-invocation fully clears and rebuilds. Returns false when
/// the host page has no navigation region.
pub fn render_navigation(page: &mut dyn HostPage, chapters: &[PreparedChapter]) -> bool {
    page.replace_region(Region::Navigation, navigation_links(chapters))
}

/// Replace the chapters region with one structural block per chapter.
///
/// Idempotent, same as [`render_navigation`].
pub fn render_chapters(page: &mut dyn HostPage, chapters: &[PreparedChapter]) -> bool {
    let nodes = chapters
        .iter()
        .map(|chapter| Node::Block(chapter_block(chapter)))
        .collect();
    page.replace_region(Region::Chapters, nodes)
}

/// Replace the chapters region with a single diagnostic block.
///
/// Never touches the navigation region.
pub fn present_error(page: &mut dyn HostPage, message: &str) -> bool {
    page.replace_region(Region::Chapters, vec![Node::Block(error_notice(message))])
}

/// Apply page-chrome overrides. Each field is written only when present.
pub fn apply_chrome(page: &mut dyn HostPage, chrome: &PageChrome) {
    if let Some(title) = &chrome.title {
        page.set_region_text(Region::SiteTitle, title);
    }
    if let Some(title) = &chrome.intro_title {
        page.set_region_text(Region::IntroTitle, title);
    }
    if let Some(text) = &chrome.intro_text {
        page.set_region_text(Region::IntroText, text);
    }
}

/// Presentation options for a timeline page.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TimelineOptions {
    /// Reveal trigger configuration
    pub reveal: RevealConfig,
}

/// Page controller: owns the prepared chapter sequence and the reveal
/// observer for the lifetime of one page view.
///
/// Constructed from a load outcome, it catches every failure path; nothing
/// propagates past [`TimelinePage::present`], and every failure ends in a
/// user-visible message in the chapters region.
#[derive(Clone, Debug)]
pub struct TimelinePage {
    chrome: PageChrome,
    chapters: Vec<PreparedChapter>,
    error: Option<String>,
    observer: Option<RevealObserver>,
    options: TimelineOptions,
}

impl TimelinePage {
    /// Build the controller from a successfully parsed document.
    pub fn from_document(document: TimelineDocument) -> Self {
        Self::from_document_with_options(document, TimelineOptions::default())
    }

    /// Build the controller from a parsed document with explicit options.
    pub fn from_document_with_options(
        document: TimelineDocument,
        options: TimelineOptions,
    ) -> Self {
        let chrome = document.chrome();
        let chapters = prepare_chapters(&ChapterSeq::from_document(document));
        Self {
            chrome,
            chapters,
            error: None,
            observer: None,
            options,
        }
    }

    /// Build the controller from a load outcome, absorbing the error.
    pub fn from_outcome(outcome: Result<TimelineDocument, TimelineError>) -> Self {
        Self::from_outcome_with_options(outcome, TimelineOptions::default())
    }

    /// Build the controller from a load outcome with explicit options.
    pub fn from_outcome_with_options(
        outcome: Result<TimelineDocument, TimelineError>,
        options: TimelineOptions,
    ) -> Self {
        match outcome {
            Ok(document) => Self::from_document_with_options(document, options),
            Err(err) => Self {
                chrome: PageChrome::default(),
                chapters: Vec::new(),
                error: Some(format!("Error loading data: {}", err)),
                observer: None,
                options,
            },
        }
    }

    /// Run the source chain and build the controller from the outcome.
    pub async fn load(sources: &[ChapterSource]) -> Self {
        Self::load_with_options(sources, TimelineOptions::default()).await
    }

    /// Run the source chain with explicit options.
    pub async fn load_with_options(
        sources: &[ChapterSource],
        options: TimelineOptions,
    ) -> Self {
        Self::from_outcome_with_options(load_document(sources).await, options)
    }

    /// Prepared chapters in display order. Empty on any failure.
    pub fn chapters(&self) -> &[PreparedChapter] {
        &self.chapters
    }

    /// Page-chrome overrides from the loaded document.
    pub fn chrome(&self) -> &PageChrome {
        &self.chrome
    }

    /// Load-failure message, when the source chain was exhausted.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Number of chapter blocks still waiting to be revealed.
    pub fn pending_reveals(&self) -> usize {
        self.observer
            .as_ref()
            .map(RevealObserver::watched_count)
            .unwrap_or(0)
    }

    /// Drive the full presentation flow against a host page.
    ///
    /// Resets scroll, applies chrome, renders navigation and chapters (or
    /// the diagnostic message), and attaches the reveal observer with an
    /// initial evaluation. Always leaves the page in a consistent state.
    pub fn present(&mut self, page: &mut dyn HostPage) {
        page.reset_scroll();

        if let Some(message) = &self.error {
            self.observer = None;
            present_error(page, message);
            return;
        }

        // Chrome overrides apply independent of chapter success.
        apply_chrome(page, &self.chrome);

        if self.chapters.is_empty() {
            self.observer = None;
            render_navigation(page, &self.chapters);
            present_error(page, &TimelineError::EmptyDataset.to_string());
            return;
        }

        render_navigation(page, &self.chapters);
        render_chapters(page, &self.chapters);

        let mut observer = RevealObserver::new(self.options.reveal);
        for chapter in &self.chapters {
            observer.observe(chapter.anchor.clone());
        }
        if page.supports_intersection() {
            let viewport = page.viewport();
            observer.tick(page, viewport);
        } else {
            observer.reveal_all(page);
        }
        self.observer = Some(observer);
    }

    /// Forward a scroll event to the reveal observer.
    ///
    /// Returns the number of newly revealed blocks.
    pub fn on_scroll(&mut self, page: &mut dyn HostPage) -> usize {
        match &mut self.observer {
            Some(observer) => {
                let viewport = page.viewport();
                observer.tick(page, viewport)
            }
            None => 0,
        }
    }
}

// MemoryPage auto-layout: chapter blocks are stacked on a fixed pitch so
// reveal geometry is exercisable without a real layout engine.
const BLOCK_PITCH: f32 = 600.0;
const BLOCK_HEIGHT: f32 = 480.0;

/// Reference in-memory host page.
///
/// Holds rendered region contents, assigns a simple stacked layout to
/// chapter blocks, and records visibility marks. Used by tests and by the
/// static HTML backend.
#[derive(Clone, Debug)]
pub struct MemoryPage {
    present: BTreeSet<Region>,
    texts: BTreeMap<Region, String>,
    children: BTreeMap<Region, Vec<Node>>,
    rects: BTreeMap<String, Rect>,
    anchors: Vec<String>,
    visible: BTreeSet<String>,
    viewport: Viewport,
    intersection: bool,
    scroll_resets: usize,
}

impl Default for MemoryPage {
    fn default() -> Self {
        Self {
            present: BTreeSet::from([
                Region::SiteTitle,
                Region::IntroTitle,
                Region::IntroText,
                Region::Navigation,
                Region::Chapters,
            ]),
            texts: BTreeMap::new(),
            children: BTreeMap::new(),
            rects: BTreeMap::new(),
            anchors: Vec::new(),
            visible: BTreeSet::new(),
            viewport: Viewport::default(),
            intersection: true,
            scroll_resets: 0,
        }
    }
}

impl MemoryPage {
    /// Page with all regions present and intersection support enabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop a region, as a host page omitting it would.
    pub fn without_region(mut self, region: Region) -> Self {
        self.present.remove(&region);
        self.texts.remove(&region);
        self.children.remove(&region);
        self
    }

    /// Disable intersection support (forces the reveal-all fallback).
    pub fn without_intersection(mut self) -> Self {
        self.intersection = false;
        self
    }

    /// Rendered children of a container region.
    pub fn region_children(&self, region: Region) -> &[Node] {
        self.children.get(&region).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Text of a chrome region, when one was written.
    pub fn region_text(&self, region: Region) -> Option<&str> {
        self.texts.get(&region).map(String::as_str)
    }

    /// Anchors of the currently rendered chapter blocks, in order.
    pub fn block_anchors(&self) -> &[String] {
        &self.anchors
    }

    /// Whether a chapter block carries the visible marker.
    pub fn is_visible(&self, anchor: &str) -> bool {
        self.visible.contains(anchor)
    }

    /// Number of blocks currently marked visible.
    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    /// Override the layout rect of a chapter block.
    pub fn set_block_rect(&mut self, anchor: &str, rect: Rect) {
        self.rects.insert(anchor.to_string(), rect);
    }

    /// Replace the viewport.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Scroll to an absolute offset.
    pub fn scroll_to(&mut self, scroll_y: f32) {
        self.viewport.scroll_y = scroll_y;
    }

    /// Number of scroll resets the controller requested.
    pub fn scroll_resets(&self) -> usize {
        self.scroll_resets
    }

    fn relayout_chapters(&mut self) {
        let anchors: Vec<String> = self
            .region_children(Region::Chapters)
            .iter()
            .filter_map(Node::as_block)
            .filter_map(|block| block.anchor.clone())
            .collect();

        self.rects.retain(|anchor, _| anchors.contains(anchor));
        self.visible.retain(|anchor| anchors.contains(anchor));
        let width = self.viewport.width;
        for (index, anchor) in anchors.iter().enumerate() {
            self.rects.entry(anchor.clone()).or_insert(Rect {
                x: 0.0,
                y: index as f32 * BLOCK_PITCH,
                width,
                height: BLOCK_HEIGHT,
            });
        }
        self.anchors = anchors;
    }
}

impl HostPage for MemoryPage {
    fn has_region(&self, region: Region) -> bool {
        self.present.contains(&region)
    }

    fn set_region_text(&mut self, region: Region, text: &str) -> bool {
        if !self.has_region(region) {
            return false;
        }
        self.texts.insert(region, text.to_string());
        true
    }

    fn replace_region(&mut self, region: Region, nodes: Vec<Node>) -> bool {
        if !self.has_region(region) {
            return false;
        }
        self.children.insert(region, nodes);
        if region == Region::Chapters {
            self.relayout_chapters();
        }
        true
    }

    fn block_rect(&self, anchor: &str) -> Option<Rect> {
        self.rects.get(anchor).copied()
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn mark_visible(&mut self, anchor: &str) -> bool {
        if self.anchors.iter().any(|a| a == anchor) {
            self.visible.insert(anchor.to_string());
            true
        } else {
            false
        }
    }

    fn supports_intersection(&self) -> bool {
        self.intersection
    }

    fn reset_scroll(&mut self) {
        self.viewport.scroll_y = 0.0;
        self.scroll_resets += 1;
    }
}

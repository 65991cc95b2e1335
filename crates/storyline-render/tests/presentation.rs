//! Presentation-level tests: rendered output properties and reveal behavior.

use storyline::{parse_document, prepare_chapters, ChapterSeq, PreparedChapter, TimelineError};
use storyline_render::{
    present_error, render_chapters, render_navigation, BlockRole, MemoryPage, Node, Rect, Region,
    TimelinePage,
};

fn prepared(json: &str) -> Vec<PreparedChapter> {
    prepare_chapters(&ChapterSeq::from_document(parse_document(json).unwrap()))
}

fn presented(json: &str) -> (TimelinePage, MemoryPage) {
    let mut timeline = TimelinePage::from_document(parse_document(json).unwrap());
    let mut page = MemoryPage::new();
    timeline.present(&mut page);
    (timeline, page)
}

// -- Rendered output properties ----------------------------------------------

#[test]
fn test_block_count_equals_chapter_count() {
    for (json, expected) in [
        (r#"{"chapters":[{},{},{}]}"#, 3),
        (r#"{"chapters":[]}"#, 0),
        (r#"{"title":"no chapters key"}"#, 0),
    ] {
        let chapters = prepared(json);
        assert_eq!(chapters.len(), expected);
        let mut page = MemoryPage::new();
        render_chapters(&mut page, &chapters);
        assert_eq!(page.region_children(Region::Chapters).len(), expected);
    }
}

#[test]
fn test_header_and_nav_link_agree_on_fallback_title() {
    let (_, page) = presented(r#"{"chapters":[{"order":5},{"order":-5}]}"#);

    let nav = page.region_children(Region::Navigation);
    let Node::Link(first_link) = &nav[0] else {
        panic!("navigation should hold links");
    };
    assert_eq!(first_link.label, "Chapter 1");
    assert_eq!(first_link.href, "#chapter-1");

    let chapters = page.region_children(Region::Chapters);
    let first_block = chapters[0].as_block().unwrap();
    assert_eq!(
        first_block
            .find_role(BlockRole::ChapterTitle)
            .unwrap()
            .text_content(),
        "Chapter 1"
    );
    assert_eq!(first_block.anchor.as_deref(), Some("chapter-1"));
}

#[test]
fn test_paragraph_shapes() {
    let (_, page) = presented(r#"{"chapters":[{"content":"Hello"},{"content":["A","B"]}]}"#);
    let chapters = page.region_children(Region::Chapters);

    let first = chapters[0].as_block().unwrap();
    assert_eq!(first.count_role(BlockRole::Paragraph), 1);
    assert_eq!(
        first.find_role(BlockRole::TextColumn).unwrap().text_content(),
        "Hello"
    );

    let second = chapters[1].as_block().unwrap();
    assert_eq!(second.count_role(BlockRole::Paragraph), 2);
    let column = second.find_role(BlockRole::TextColumn).unwrap();
    let texts: Vec<String> = column
        .children
        .iter()
        .filter_map(Node::as_block)
        .map(|b| b.text_content())
        .collect();
    assert_eq!(texts, ["A", "B"]);
}

#[test]
fn test_renderers_are_idempotent() {
    let chapters = prepared(r#"{"chapters":[{"title":"A"},{"title":"B"}]}"#);
    let mut page = MemoryPage::new();

    render_navigation(&mut page, &chapters);
    render_chapters(&mut page, &chapters);
    let nav_once = page.region_children(Region::Navigation).to_vec();
    let blocks_once = page.region_children(Region::Chapters).to_vec();

    render_navigation(&mut page, &chapters);
    render_chapters(&mut page, &chapters);
    assert_eq!(page.region_children(Region::Navigation), nav_once);
    assert_eq!(page.region_children(Region::Chapters), blocks_once);
    assert_eq!(nav_once.len(), 2);
    assert_eq!(blocks_once.len(), 2);
}

#[test]
fn test_rerender_fully_replaces_previous_content() {
    let many = prepared(r#"{"chapters":[{},{},{},{}]}"#);
    let few = prepared(r#"{"chapters":[{"title":"only"}]}"#);
    let mut page = MemoryPage::new();

    render_navigation(&mut page, &many);
    render_chapters(&mut page, &many);
    render_navigation(&mut page, &few);
    render_chapters(&mut page, &few);

    assert_eq!(page.region_children(Region::Navigation).len(), 1);
    assert_eq!(page.region_children(Region::Chapters).len(), 1);
    assert_eq!(page.block_anchors(), ["chapter-1"]);
}

#[test]
fn test_error_presenter_leaves_navigation_alone() {
    let chapters = prepared(r#"{"chapters":[{"title":"A"}]}"#);
    let mut page = MemoryPage::new();
    render_navigation(&mut page, &chapters);

    present_error(&mut page, "boom");

    assert_eq!(page.region_children(Region::Navigation).len(), 1);
    let shown = page.region_children(Region::Chapters);
    assert_eq!(shown.len(), 1);
    let notice = shown[0].as_block().unwrap();
    assert_eq!(notice.role, BlockRole::ErrorNotice);
    assert_eq!(notice.text_content(), "boom");
}

#[test]
fn test_renderers_no_op_without_regions() {
    let chapters = prepared(r#"{"chapters":[{"title":"A"}]}"#);
    let mut page = MemoryPage::new()
        .without_region(Region::Navigation)
        .without_region(Region::Chapters);

    assert!(!render_navigation(&mut page, &chapters));
    assert!(!render_chapters(&mut page, &chapters));
    assert!(!present_error(&mut page, "nope"));
}

// -- Load outcomes -----------------------------------------------------------

#[test]
fn test_load_failure_message_is_shown_verbatim() {
    let mut timeline = TimelinePage::from_outcome(Err(TimelineError::Source(
        storyline::SourceError::Transport("socket closed".into()),
    )));
    let mut page = MemoryPage::new();
    timeline.present(&mut page);

    let shown = page.region_children(Region::Chapters);
    assert_eq!(
        shown[0].text_content(),
        "Error loading data: Source error: transport failure: socket closed"
    );
}

#[test]
fn test_empty_dataset_distinct_from_no_data() {
    let (_, empty_page) = presented(r#"{"chapters":[]}"#);
    let empty_message = empty_page.region_children(Region::Chapters)[0].text_content();

    let mut failed = TimelinePage::from_outcome(Err(TimelineError::NoData));
    let mut failed_page = MemoryPage::new();
    failed.present(&mut failed_page);
    let failed_message = failed_page.region_children(Region::Chapters)[0].text_content();

    assert_ne!(empty_message, failed_message);
    assert_eq!(empty_message, "No chapters found in timeline data");
}

// -- Reveal behavior ---------------------------------------------------------

#[test]
fn test_reveal_progresses_with_scroll() {
    let (mut timeline, mut page) = presented(
        r#"{"chapters":[{"title":"1"},{"title":"2"},{"title":"3"},{"title":"4"},{"title":"5"}]}"#,
    );
    // Stacked auto-layout: two blocks start in view.
    assert_eq!(page.visible_count(), 2);

    page.scroll_to(900.0);
    timeline.on_scroll(&mut page);
    assert!(page.is_visible("chapter-3"));

    page.scroll_to(2000.0);
    timeline.on_scroll(&mut page);
    assert_eq!(page.visible_count(), 5);
    assert_eq!(timeline.pending_reveals(), 0);
}

#[test]
fn test_reveal_threshold_respects_bottom_margin() {
    let (mut timeline, mut page) = presented(r#"{"chapters":[{},{},{}]}"#);
    assert!(!page.is_visible("chapter-3"));

    // Root bottom sits at 750 with the default margin; a 480-tall block
    // needs a 48px overlap to cross the 10% threshold. 40px is not enough.
    page.set_block_rect(
        "chapter-3",
        Rect {
            x: 0.0,
            y: 710.0,
            width: 1280.0,
            height: 480.0,
        },
    );
    assert_eq!(timeline.on_scroll(&mut page), 0);
    assert!(!page.is_visible("chapter-3"));

    page.set_block_rect(
        "chapter-3",
        Rect {
            x: 0.0,
            y: 690.0,
            width: 1280.0,
            height: 480.0,
        },
    );
    assert_eq!(timeline.on_scroll(&mut page), 1);
    assert!(page.is_visible("chapter-3"));
}

#[test]
fn test_reveal_is_one_shot() {
    let (mut timeline, mut page) = presented(r#"{"chapters":[{},{},{}]}"#);
    page.scroll_to(1000.0);
    timeline.on_scroll(&mut page);
    assert_eq!(page.visible_count(), 3);

    // Scrolling back up never re-hides or re-reveals.
    page.scroll_to(0.0);
    assert_eq!(timeline.on_scroll(&mut page), 0);
    assert_eq!(page.visible_count(), 3);
}

#[test]
fn test_fallback_without_intersection_support() {
    let mut timeline = TimelinePage::from_document(
        parse_document(r#"{"chapters":[{},{},{},{},{},{},{},{}]}"#).unwrap(),
    );
    let mut page = MemoryPage::new().without_intersection();
    timeline.present(&mut page);
    assert_eq!(page.visible_count(), 8);
}

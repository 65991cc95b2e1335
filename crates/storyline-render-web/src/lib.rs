//! Static HTML backend for `storyline-render`.
//!
//! Emits a rendered [`MemoryPage`] as a self-contained HTML document. Block
//! roles map to fixed tags and class names; text is escaped; images carry a
//! `loading="lazy"` hint. Blocks marked visible on the page get the
//! `visible` class, so a statically emitted page shows revealed chapters
//! without any scripting.

use storyline_render::{BlockNode, BlockRole, MemoryPage, Node, Region};

// Backend-owned baseline styling: hidden/revealed chapter states and enough
// layout to make the preview readable. Theming is the host page's concern.
const PAGE_CSS: &str = "\
body{margin:0 auto;max-width:720px;padding:0 1rem;font-family:Georgia,serif}
nav a{margin-right:1rem}
.chapter{opacity:0;transform:translateY(20px);transition:opacity .6s ease,transform .6s ease}
.chapter.visible{opacity:1;transform:none}
.chapter-image{max-width:100%;height:auto}
.chapter-metadata{font-size:.85rem;color:#666}
.error{padding:1rem;border:1px solid #c00}
";

/// Escape text for HTML content and attribute positions.
pub fn html_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Emit a node list as HTML, using the page for visibility marks.
pub fn nodes_html(nodes: &[Node], page: &MemoryPage) -> String {
    let mut out = String::new();
    for node in nodes {
        write_node(&mut out, node, page);
    }
    out
}

/// Emit a full standalone HTML document from a rendered page.
///
/// The document title falls back to `fallback_title` when the page carries
/// no site-title override. The intro section is emitted only when overrides
/// were applied.
pub fn page_html(page: &MemoryPage, fallback_title: &str) -> String {
    let title = page
        .region_text(Region::SiteTitle)
        .unwrap_or(fallback_title);

    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str(&format!("<title>{}</title>\n", html_escape(title)));
    out.push_str("<style>\n");
    out.push_str(PAGE_CSS);
    out.push_str("</style>\n</head>\n<body>\n");
    out.push_str(&format!(
        "<h1 class=\"site-title\">{}</h1>\n",
        html_escape(title)
    ));

    let intro_title = page.region_text(Region::IntroTitle);
    let intro_text = page.region_text(Region::IntroText);
    if intro_title.is_some() || intro_text.is_some() {
        out.push_str("<section class=\"intro\">\n");
        if let Some(text) = intro_title {
            out.push_str(&format!(
                "<h2 class=\"intro-title\">{}</h2>\n",
                html_escape(text)
            ));
        }
        if let Some(text) = intro_text {
            out.push_str(&format!(
                "<p class=\"intro-text\">{}</p>\n",
                html_escape(text)
            ));
        }
        out.push_str("</section>\n");
    }

    out.push_str("<nav id=\"chapterNav\">");
    out.push_str(&nodes_html(page.region_children(Region::Navigation), page));
    out.push_str("</nav>\n<main id=\"chaptersContainer\">\n");
    out.push_str(&nodes_html(page.region_children(Region::Chapters), page));
    out.push_str("</main>\n</body>\n</html>\n");
    out
}

fn write_node(out: &mut String, node: &Node, page: &MemoryPage) {
    match node {
        Node::Text(text) => out.push_str(&html_escape(text)),
        Node::Link(link) => {
            out.push_str(&format!(
                "<a href=\"{}\">{}</a>",
                html_escape(&link.href),
                html_escape(&link.label)
            ));
        }
        Node::Image(image) => {
            out.push_str(&format!(
                "<img class=\"chapter-image\" src=\"{}\" alt=\"{}\"",
                html_escape(&image.src),
                html_escape(&image.alt)
            ));
            if image.lazy {
                out.push_str(" loading=\"lazy\"");
            }
            out.push('>');
        }
        Node::Block(block) => write_block(out, block, page),
    }
}

fn write_block(out: &mut String, block: &BlockNode, page: &MemoryPage) {
    let (tag, class) = role_markup(block.role);
    out.push('<');
    out.push_str(tag);

    let visible = block
        .anchor
        .as_deref()
        .is_some_and(|anchor| page.is_visible(anchor));
    match (class, visible) {
        ("", _) => {}
        (class, false) => out.push_str(&format!(" class=\"{}\"", class)),
        (class, true) => out.push_str(&format!(" class=\"{} visible\"", class)),
    }
    if let Some(anchor) = &block.anchor {
        out.push_str(&format!(" id=\"{}\"", html_escape(anchor)));
    }
    out.push('>');

    for child in &block.children {
        write_node(out, child, page);
    }

    out.push_str("</");
    out.push_str(tag);
    out.push('>');
    out.push('\n');
}

fn role_markup(role: BlockRole) -> (&'static str, &'static str) {
    match role {
        BlockRole::Chapter => ("div", "chapter"),
        BlockRole::ChapterHeader => ("div", "chapter-header"),
        BlockRole::ChapterNumber => ("div", "chapter-number"),
        BlockRole::ChapterTitle => ("h2", "chapter-title"),
        BlockRole::ChapterBody => ("div", "chapter-content"),
        BlockRole::ImageFrame => ("div", "chapter-image-container"),
        BlockRole::TextColumn => ("div", "chapter-text"),
        BlockRole::Paragraph => ("p", ""),
        BlockRole::MetadataNote => ("div", "chapter-metadata"),
        BlockRole::ErrorNotice => ("div", "error"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storyline::parse_document;
    use storyline_render::TimelinePage;

    fn rendered(json: &str) -> MemoryPage {
        let mut timeline = TimelinePage::from_document(parse_document(json).unwrap());
        let mut page = MemoryPage::new().without_intersection();
        timeline.present(&mut page);
        page
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<a href="x">Q&A's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Q&amp;A&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn test_chapter_markup() {
        let page = rendered(
            r#"{"chapters":[{"title":"A & B","image":"img/a.jpg","content":"Hello"}]}"#,
        );
        let html = nodes_html(page.region_children(Region::Chapters), &page);
        assert!(html.contains("<div class=\"chapter visible\" id=\"chapter-1\">"));
        assert!(html.contains("<div class=\"chapter-number\">01</div>"));
        assert!(html.contains("<h2 class=\"chapter-title\">A &amp; B</h2>"));
        assert!(html.contains(
            "<img class=\"chapter-image\" src=\"img/a.jpg\" alt=\"A &amp; B\" loading=\"lazy\">"
        ));
        assert!(html.contains("<p>Hello</p>"));
    }

    #[test]
    fn test_unrevealed_chapter_has_no_visible_class() {
        let mut timeline = TimelinePage::from_document(
            parse_document(r#"{"chapters":[{"title":"A"},{},{},{}]}"#).unwrap(),
        );
        let mut page = MemoryPage::new();
        timeline.present(&mut page);
        let html = nodes_html(page.region_children(Region::Chapters), &page);
        assert!(html.contains("<div class=\"chapter visible\" id=\"chapter-1\">"));
        assert!(html.contains("<div class=\"chapter\" id=\"chapter-4\">"));
    }

    #[test]
    fn test_full_page_document() {
        let page = rendered(
            r#"{"title":"My <Timeline>","intro":{"text":"welcome"},"chapters":[{"title":"A"}]}"#,
        );
        let html = page_html(&page, "Timeline");
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>My &lt;Timeline&gt;</title>"));
        assert!(html.contains("<p class=\"intro-text\">welcome</p>"));
        assert!(html.contains("<nav id=\"chapterNav\"><a href=\"#chapter-1\">A</a></nav>"));
        assert!(html.contains("<main id=\"chaptersContainer\">"));
    }

    #[test]
    fn test_fallback_title_when_no_override() {
        let page = rendered(r#"{"chapters":[{"title":"A"}]}"#);
        let html = page_html(&page, "Timeline");
        assert!(html.contains("<title>Timeline</title>"));
    }

    #[test]
    fn test_error_page_markup() {
        let page = rendered(r#"{"chapters":[]}"#);
        let html = page_html(&page, "Timeline");
        assert!(html.contains("<div class=\"error\">No chapters found in timeline data</div>"));
        assert!(html.contains("<nav id=\"chapterNav\"></nav>"));
    }
}

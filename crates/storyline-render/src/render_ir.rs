use storyline::PreparedChapter;

/// Structural role of a block node.
///
/// Roles describe document structure only; how a backend maps them to
/// markup or styling is its own concern.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockRole {
    /// One chapter unit, carrying the stable anchor id
    Chapter,
    /// Chapter header row
    ChapterHeader,
    /// Zero-padded chapter number
    ChapterNumber,
    /// Chapter title heading
    ChapterTitle,
    /// Chapter body below the header
    ChapterBody,
    /// Wrapper around the chapter image
    ImageFrame,
    /// Paragraph column
    TextColumn,
    /// One paragraph of text
    Paragraph,
    /// Trailing metadata note
    MetadataNote,
    /// Diagnostic message shown in place of chapters
    ErrorNotice,
}

/// Backend-agnostic page content node.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    /// Structural block with children
    Block(BlockNode),
    /// Plain text content
    Text(String),
    /// Anchor link
    Link(LinkNode),
    /// Image with resolved alt text
    Image(ImageNode),
}

impl Node {
    /// View this node as a block, when it is one.
    pub fn as_block(&self) -> Option<&BlockNode> {
        match self {
            Node::Block(block) => Some(block),
            _ => None,
        }
    }

    /// Concatenated text of this node and its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }
}

/// Structural block with a role, an optional anchor id, and children.
#[derive(Clone, Debug, PartialEq)]
pub struct BlockNode {
    /// Structural role
    pub role: BlockRole,
    /// Stable anchor id, set on chapter blocks
    pub anchor: Option<String>,
    /// Child nodes in display order
    pub children: Vec<Node>,
}

impl BlockNode {
    /// Create an empty block with the given role.
    pub fn new(role: BlockRole) -> Self {
        Self {
            role,
            anchor: None,
            children: Vec::new(),
        }
    }

    /// Set the anchor id.
    pub fn with_anchor(mut self, anchor: impl Into<String>) -> Self {
        self.anchor = Some(anchor.into());
        self
    }

    /// Append a child node.
    pub fn push(&mut self, child: Node) {
        self.children.push(child);
    }

    /// First descendant block with the given role, depth-first.
    pub fn find_role(&self, role: BlockRole) -> Option<&BlockNode> {
        for child in &self.children {
            if let Node::Block(block) = child {
                if block.role == role {
                    return Some(block);
                }
                if let Some(found) = block.find_role(role) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// Number of descendant blocks with the given role.
    pub fn count_role(&self, role: BlockRole) -> usize {
        self.children
            .iter()
            .filter_map(Node::as_block)
            .map(|block| usize::from(block.role == role) + block.count_role(role))
            .sum()
    }

    /// Concatenated text of all descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            collect_text(child, &mut out);
        }
        out
    }
}

/// Anchor link node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkNode {
    /// Link target, e.g. `#chapter-1`
    pub href: String,
    /// Display label
    pub label: String,
}

/// Image node with resolved alt text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageNode {
    /// Image URL or path
    pub src: String,
    /// Resolved alt text
    pub alt: String,
    /// Deferred-load hint for the backend
    pub lazy: bool,
}

fn collect_text(node: &Node, out: &mut String) {
    match node {
        Node::Text(text) => out.push_str(text),
        Node::Link(link) => out.push_str(&link.label),
        Node::Image(_) => {}
        Node::Block(block) => {
            for child in &block.children {
                collect_text(child, out);
            }
        }
    }
}

/// Build the structural block for one prepared chapter.
///
/// Fixed sub-order: header (number, title), then the image frame only when
/// an image is present, then the paragraph column with the metadata note
/// appended last.
pub fn chapter_block(chapter: &PreparedChapter) -> BlockNode {
    let mut header = BlockNode::new(BlockRole::ChapterHeader);
    let mut number = BlockNode::new(BlockRole::ChapterNumber);
    number.push(Node::Text(chapter.number_label.clone()));
    header.push(Node::Block(number));
    let mut title = BlockNode::new(BlockRole::ChapterTitle);
    title.push(Node::Text(chapter.title.clone()));
    header.push(Node::Block(title));

    let mut body = BlockNode::new(BlockRole::ChapterBody);
    if let Some(image) = &chapter.image {
        let mut frame = BlockNode::new(BlockRole::ImageFrame);
        frame.push(Node::Image(ImageNode {
            src: image.src.clone(),
            alt: image.alt.clone(),
            lazy: true,
        }));
        body.push(Node::Block(frame));
    }

    let mut column = BlockNode::new(BlockRole::TextColumn);
    for paragraph in &chapter.paragraphs {
        let mut node = BlockNode::new(BlockRole::Paragraph);
        node.push(Node::Text(paragraph.clone()));
        column.push(Node::Block(node));
    }
    if let Some(metadata) = &chapter.metadata {
        let mut note = BlockNode::new(BlockRole::MetadataNote);
        note.push(Node::Text(metadata.clone()));
        column.push(Node::Block(note));
    }
    body.push(Node::Block(column));

    let mut block = BlockNode::new(BlockRole::Chapter).with_anchor(chapter.anchor.clone());
    block.push(Node::Block(header));
    block.push(Node::Block(body));
    block
}

/// Build the navigation menu: one link per chapter, in order.
pub fn navigation_links(chapters: &[PreparedChapter]) -> Vec<Node> {
    chapters
        .iter()
        .map(|chapter| {
            Node::Link(LinkNode {
                href: format!("#{}", chapter.anchor),
                label: chapter.title.clone(),
            })
        })
        .collect()
}

/// Build a diagnostic block carrying the message verbatim.
pub fn error_notice(message: &str) -> BlockNode {
    let mut block = BlockNode::new(BlockRole::ErrorNotice);
    block.push(Node::Text(message.to_string()));
    block
}

#[cfg(test)]
mod tests {
    use super::*;
    use storyline::{prepare_chapters, ChapterSeq};

    fn prepared(json: &str) -> Vec<PreparedChapter> {
        prepare_chapters(&ChapterSeq::from_document(
            storyline::parse_document(json).unwrap(),
        ))
    }

    #[test]
    fn test_chapter_block_structure() {
        let chapters = prepared(
            r#"{"chapters":[{"title":"T","image":"a.jpg","content":["A","B"],"metadata":"note"}]}"#,
        );
        let block = chapter_block(&chapters[0]);

        assert_eq!(block.role, BlockRole::Chapter);
        assert_eq!(block.anchor.as_deref(), Some("chapter-1"));
        let header = block.find_role(BlockRole::ChapterHeader).unwrap();
        assert_eq!(
            header.find_role(BlockRole::ChapterNumber).unwrap().text_content(),
            "01"
        );
        assert_eq!(
            header.find_role(BlockRole::ChapterTitle).unwrap().text_content(),
            "T"
        );
        assert_eq!(block.count_role(BlockRole::ImageFrame), 1);
        assert_eq!(block.count_role(BlockRole::Paragraph), 2);
        assert_eq!(
            block.find_role(BlockRole::MetadataNote).unwrap().text_content(),
            "note"
        );
    }

    #[test]
    fn test_image_and_metadata_are_optional() {
        let chapters = prepared(r#"{"chapters":[{"title":"plain"}]}"#);
        let block = chapter_block(&chapters[0]);
        assert_eq!(block.count_role(BlockRole::ImageFrame), 0);
        assert_eq!(block.count_role(BlockRole::Paragraph), 0);
        assert_eq!(block.count_role(BlockRole::MetadataNote), 0);
        assert_eq!(block.count_role(BlockRole::TextColumn), 1);
    }

    #[test]
    fn test_image_node_is_lazy_with_resolved_alt() {
        let chapters = prepared(r#"{"chapters":[{"image":"a.jpg"}]}"#);
        let block = chapter_block(&chapters[0]);
        let frame = block.find_role(BlockRole::ImageFrame).unwrap();
        let Node::Image(image) = &frame.children[0] else {
            panic!("image frame should hold an image node");
        };
        assert!(image.lazy);
        assert_eq!(image.alt, "Chapter 1 image");
    }

    #[test]
    fn test_metadata_comes_after_paragraphs() {
        let chapters = prepared(r#"{"chapters":[{"content":"p","metadata":"m"}]}"#);
        let block = chapter_block(&chapters[0]);
        let column = block.find_role(BlockRole::TextColumn).unwrap();
        let roles: Vec<_> = column
            .children
            .iter()
            .filter_map(Node::as_block)
            .map(|b| b.role)
            .collect();
        assert_eq!(roles, [BlockRole::Paragraph, BlockRole::MetadataNote]);
    }

    #[test]
    fn test_navigation_links_match_chapters() {
        let chapters = prepared(r#"{"chapters":[{"title":"A"},{}]}"#);
        let links = navigation_links(&chapters);
        assert_eq!(links.len(), 2);
        let Node::Link(first) = &links[0] else {
            panic!("navigation should hold links");
        };
        assert_eq!(first.href, "#chapter-1");
        assert_eq!(first.label, "A");
        let Node::Link(second) = &links[1] else {
            panic!("navigation should hold links");
        };
        assert_eq!(second.href, "#chapter-2");
        assert_eq!(second.label, "Chapter 2");
    }

    #[test]
    fn test_error_notice_carries_message_verbatim() {
        let block = error_notice("something <went> wrong");
        assert_eq!(block.role, BlockRole::ErrorNotice);
        assert_eq!(block.text_content(), "something <went> wrong");
    }
}

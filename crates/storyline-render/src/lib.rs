//! Block builders, host-page contract, and page controller for `storyline`.

mod render_engine;
mod render_ir;
mod reveal;

pub use render_engine::{
    apply_chrome, present_error, render_chapters, render_navigation, HostPage, MemoryPage,
    Region, TimelineOptions, TimelinePage,
};
pub use render_ir::{
    chapter_block, error_notice, navigation_links, BlockNode, BlockRole, ImageNode, LinkNode,
    Node,
};
pub use reveal::{Rect, RevealConfig, RevealObserver, Viewport};

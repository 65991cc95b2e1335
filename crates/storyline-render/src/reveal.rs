//! One-shot scroll-reveal observer
//!
//! Watches rendered chapter blocks and marks each visible the first time at
//! least a threshold fraction of its area intersects the viewport, with the
//! viewport bottom inset by a fixed margin so blocks reveal slightly before
//! reaching the literal edge. A revealed block is unwatched and never
//! re-hidden. Hosts without intersection support reveal everything at once.

use crate::render_engine::HostPage;

/// Axis-aligned rectangle in page coordinates (pixels).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Rect {
    /// Right edge.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Whether the point lies within this rect.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }
}

/// Current scroll viewport in page coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Scroll offset from the top of the page
    pub scroll_y: f32,
    /// Viewport width
    pub width: f32,
    /// Viewport height
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scroll_y: 0.0,
            width: 1280.0,
            height: 800.0,
        }
    }
}

/// Reveal trigger configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealConfig {
    /// Fraction of a block's area that must intersect to trigger
    pub threshold: f32,
    /// Inward offset of the viewport bottom edge, in pixels
    pub bottom_margin_px: f32,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            bottom_margin_px: 50.0,
        }
    }
}

impl RevealConfig {
    fn root_rect(&self, viewport: Viewport) -> Rect {
        Rect {
            x: 0.0,
            y: viewport.scroll_y,
            width: viewport.width,
            height: (viewport.height - self.bottom_margin_px).max(0.0),
        }
    }
}

/// Watches chapter blocks and applies one-shot visibility marks.
#[derive(Clone, Debug, Default)]
pub struct RevealObserver {
    config: RevealConfig,
    watched: Vec<String>,
}

impl RevealObserver {
    /// Create an observer with the given configuration.
    pub fn new(config: RevealConfig) -> Self {
        Self {
            config,
            watched: Vec::new(),
        }
    }

    /// Start watching a block by its anchor id.
    pub fn observe(&mut self, anchor: impl Into<String>) {
        self.watched.push(anchor.into());
    }

    /// Whether the anchor is still being watched.
    pub fn is_watching(&self, anchor: &str) -> bool {
        self.watched.iter().any(|a| a == anchor)
    }

    /// Number of blocks still being watched.
    pub fn watched_count(&self) -> usize {
        self.watched.len()
    }

    /// Evaluate all watched blocks against the viewport.
    ///
    /// Blocks at or above the intersection threshold are marked visible and
    /// unwatched. Blocks without geometry yet stay watched. Returns the
    /// number of newly revealed blocks.
    pub fn tick(&mut self, page: &mut dyn HostPage, viewport: Viewport) -> usize {
        let root = self.config.root_rect(viewport);
        let mut revealed = 0;
        let mut still_watching = Vec::with_capacity(self.watched.len());
        for anchor in self.watched.drain(..) {
            match page.block_rect(&anchor) {
                Some(rect) if intersection_ratio(rect, root) >= self.config.threshold => {
                    page.mark_visible(&anchor);
                    revealed += 1;
                }
                _ => still_watching.push(anchor),
            }
        }
        self.watched = still_watching;
        revealed
    }

    /// Mark every watched block visible immediately and stop watching.
    ///
    /// Fallback for hosts without intersection support: eventual full
    /// visibility wins over animation fidelity.
    pub fn reveal_all(&mut self, page: &mut dyn HostPage) -> usize {
        let mut revealed = 0;
        for anchor in self.watched.drain(..) {
            page.mark_visible(&anchor);
            revealed += 1;
        }
        revealed
    }
}

fn intersection_ratio(block: Rect, root: Rect) -> f32 {
    let overlap_w = (block.right().min(root.right()) - block.x.max(root.x)).max(0.0);
    let overlap_h = (block.bottom().min(root.bottom()) - block.y.max(root.y)).max(0.0);
    let block_area = block.width * block.height;
    if block_area <= 0.0 {
        // Degenerate blocks count as visible once their origin enters the root.
        if root.contains(block.x, block.y) {
            1.0
        } else {
            0.0
        }
    } else {
        (overlap_w * overlap_h) / block_area
    }
}

//! Conversion from viewport rectangles to scroll-relative rectangles
//!
//! Scroll-relative space has its origin at the scroll surface's unscrolled
//! top-left corner, so a rectangle expressed in it does not change when the
//! surface scrolls unless the element itself moves with the viewport.

use serde::Deserialize;

use super::types::Rect;

/// How an element is positioned by the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Positioning {
    /// In-flow, scrolls with its container
    Normal,
    /// Pinned to the viewport
    Fixed,
    /// Edge-anchored: in flow until scroll reaches the anchor offset
    Sticky(StickyAnchor),
}

/// Anchor offsets of an edge-anchored element
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StickyAnchor {
    /// Offset from the container's left edge where the element sticks
    pub left: Option<f64>,
    /// Offset from the container's top edge where the element sticks
    pub top: Option<f64>,
    /// Where the element would be in viewport space if it were not stuck
    pub flow_rect: Rect,
}

/// The scroll surface a rectangle is converted against
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct ScrollContainer {
    /// Left edge of the container in viewport space
    #[serde(default)]
    pub viewport_left: f64,
    /// Top edge of the container in viewport space
    #[serde(default)]
    pub viewport_top: f64,
    #[serde(default)]
    pub scroll_left: f64,
    #[serde(default)]
    pub scroll_top: f64,
    /// The container is the root document rather than a nested region
    #[serde(default)]
    pub is_document: bool,
}

impl ScrollContainer {
    /// Root document scrolled to the given offsets
    pub fn document(scroll_left: f64, scroll_top: f64) -> Self {
        Self {
            viewport_left: 0.0,
            viewport_top: 0.0,
            scroll_left,
            scroll_top,
            is_document: true,
        }
    }

    /// Nested scroll region at a viewport position
    pub fn nested(viewport_left: f64, viewport_top: f64, scroll_left: f64, scroll_top: f64) -> Self {
        Self {
            viewport_left,
            viewport_top,
            scroll_left,
            scroll_top,
            is_document: false,
        }
    }

    /// Viewport offset that applies to in-flow content
    fn origin(&self) -> (f64, f64) {
        if self.is_document {
            (0.0, 0.0)
        } else {
            (self.viewport_left, self.viewport_top)
        }
    }
}

/// Convert a viewport rectangle into scroll-relative space
///
/// `use_natural` forces edge-anchored elements to report their in-flow
/// position even once scroll has carried them past their anchor offset.
pub fn to_scroll_relative(
    rect: Rect,
    container: &ScrollContainer,
    positioning: Positioning,
    use_natural: bool,
) -> Rect {
    match positioning {
        Positioning::Normal => normal(rect, container),
        Positioning::Fixed => fixed(rect, container),
        Positioning::Sticky(anchor) => sticky(&anchor, container, use_natural),
    }
}

fn normal(rect: Rect, container: &ScrollContainer) -> Rect {
    let (origin_left, origin_top) = container.origin();
    let dx = container.scroll_left - origin_left;
    let dy = container.scroll_top - origin_top;
    Rect::new(rect.left + dx, rect.top + dy, rect.right + dx, rect.bottom + dy)
}

fn fixed(rect: Rect, container: &ScrollContainer) -> Rect {
    let (dx, dy) = if container.is_document {
        (container.scroll_left, container.scroll_top)
    } else {
        // fixed elements ignore the nested container's scroll
        (-container.viewport_left, -container.viewport_top)
    };
    Rect::new(rect.left + dx, rect.top + dy, rect.right + dx, rect.bottom + dy)
}

fn sticky(anchor: &StickyAnchor, container: &ScrollContainer, use_natural: bool) -> Rect {
    let natural = normal(anchor.flow_rect, container);
    let width = natural.width();
    let height = natural.height();

    let left = match anchor.left {
        Some(offset) if !use_natural => anchored_edge(natural.left, container.scroll_left, offset),
        _ => natural.left,
    };
    let top = match anchor.top {
        Some(offset) if !use_natural => anchored_edge(natural.top, container.scroll_top, offset),
        _ => natural.top,
    };

    Rect::new(left, top, left + width, top + height)
}

/// Natural position until scroll passes the anchor, then scroll + offset
fn anchored_edge(natural: f64, scroll: f64, offset: f64) -> f64 {
    let stuck = scroll + offset;
    if stuck > natural {
        stuck
    } else {
        natural
    }
}

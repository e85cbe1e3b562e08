//! Host-side primitives the engine consumes
//!
//! The engine never talks to a platform directly. A host answers geometry
//! and scroll queries, discovers obstacle and frontier elements, and may
//! receive boundary lines for debug overlays.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::constraint::Side;
use crate::geometry::{Positioning, Rect, ScrollContainer};

/// Opaque handle to a host element
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementId(pub String);

impl ElementId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Geometry of an element in viewport space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementGeometry {
    pub rect: Rect,
    pub positioning: Positioning,
}

impl ElementGeometry {
    pub fn normal(rect: Rect) -> Self {
        Self {
            rect,
            positioning: Positioning::Normal,
        }
    }
}

/// Scroll state of a scrollable surface
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollState {
    pub scroll_left: f64,
    pub scroll_top: f64,
    pub client_width: f64,
    pub client_height: f64,
    pub scroll_width: f64,
    pub scroll_height: f64,
    /// The surface is the root document
    pub is_document: bool,
}

impl ScrollState {
    /// Scrollable extent in scroll-relative space
    pub fn content_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.scroll_width, self.scroll_height)
    }

    /// Combine with the surface's own viewport rectangle
    pub fn container(&self, viewport: Rect) -> ScrollContainer {
        ScrollContainer {
            viewport_left: viewport.left,
            viewport_top: viewport.top,
            scroll_left: self.scroll_left,
            scroll_top: self.scroll_top,
            is_document: self.is_document,
        }
    }
}

/// Marker an element can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    Obstacle,
    Frontier,
}

/// An element found by marker discovery
#[derive(Debug, Clone, PartialEq)]
pub struct MarkedElement {
    pub element: ElementId,
    /// Gesture name the marker is restricted to
    pub name: Option<String>,
    /// Frontier side; `None` for obstacles
    pub side: Option<Side>,
}

/// Queries the engine needs answered by the host
pub trait Host {
    /// Geometry of an element, or `None` when it has no defined position
    fn geometry(&self, element: &ElementId) -> Option<ElementGeometry>;

    /// Scroll state of a scrollable surface
    fn scroll_state(&self, surface: &ElementId) -> Option<ScrollState>;

    /// Elements inside `container` carrying `marker`, in registration order
    ///
    /// Elements with an ignore marker on themselves or an ancestor are
    /// excluded by the host.
    fn discover(&self, container: &ElementId, marker: MarkerKind) -> Vec<MarkedElement>;
}

impl<H: Host + ?Sized> Host for &H {
    fn geometry(&self, element: &ElementId) -> Option<ElementGeometry> {
        (**self).geometry(element)
    }

    fn scroll_state(&self, surface: &ElementId) -> Option<ScrollState> {
        (**self).scroll_state(surface)
    }

    fn discover(&self, container: &ElementId, marker: MarkerKind) -> Vec<MarkedElement> {
        (**self).discover(container, marker)
    }
}

/// A named boundary for debug overlays
#[derive(Debug, Clone, PartialEq)]
pub struct Boundary {
    pub name: String,
    pub rect: Rect,
}

/// Consumer of debug boundaries; never feeds back into resolution
pub trait VisualizationSink {
    /// Called after each sample with the live boundaries and the corrected rectangle
    fn show(&mut self, boundaries: &[Boundary], element: Rect);

    /// Called once when the gesture is released
    fn clear(&mut self);
}

impl<S: VisualizationSink> VisualizationSink for Rc<RefCell<S>> {
    fn show(&mut self, boundaries: &[Boundary], element: Rect) {
        self.borrow_mut().show(boundaries, element);
    }

    fn clear(&mut self) {
        self.borrow_mut().clear();
    }
}

/// Sink that records every frame, for tests and replay tools
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    pub frames: Vec<(Vec<Boundary>, Rect)>,
    pub cleared: bool,
}

impl VisualizationSink for RecordingSink {
    fn show(&mut self, boundaries: &[Boundary], element: Rect) {
        self.frames.push((boundaries.to_vec(), element));
    }

    fn clear(&mut self) {
        self.cleared = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_id_display() {
        assert_eq!(ElementId::new("card").to_string(), "#card");
    }

    #[test]
    fn test_scroll_state_container() {
        let state = ScrollState {
            scroll_left: 5.0,
            scroll_top: 10.0,
            is_document: false,
            ..ScrollState::default()
        };
        let container = state.container(Rect::new(50.0, 60.0, 250.0, 260.0));
        assert_eq!(container, ScrollContainer::nested(50.0, 60.0, 5.0, 10.0));
    }
}

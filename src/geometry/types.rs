//! Core geometric value types shared by the conversion layer and the resolver

use std::ops::{Add, Sub};

use serde::Deserialize;

/// A 2D point in viewport or scroll-relative space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A movement delta along both axes
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Movement {
    pub x: f64,
    pub y: f64,
}

impl Movement {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    /// Zero out the components of axes that are not draggable
    pub fn masked(self, axes: Axes) -> Self {
        Self {
            x: if axes.x { self.x } else { 0.0 },
            y: if axes.y { self.y } else { 0.0 },
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Movement {
    type Output = Movement;

    fn add(self, other: Movement) -> Movement {
        Movement::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Movement {
    type Output = Movement;

    fn sub(self, other: Movement) -> Movement {
        Movement::new(self.x - other.x, self.y - other.y)
    }
}

/// Width and height of the dragged element
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Which axes a gesture may move along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Axes {
    pub x: bool,
    pub y: bool,
}

impl Axes {
    pub const BOTH: Axes = Axes { x: true, y: true };
    pub const X: Axes = Axes { x: true, y: false };
    pub const Y: Axes = Axes { x: false, y: true };

    pub fn any(&self) -> bool {
        self.x || self.y
    }
}

impl Default for Axes {
    fn default() -> Self {
        Self::BOTH
    }
}

/// An axis-aligned rectangle stored as four edges
///
/// A rectangle is *valid* when all edges are finite and `left <= right`,
/// `top <= bottom`. Invalid rectangles are carried through the engine and
/// reported by diagnostics instead of being rejected.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Build a rectangle from its origin and size
    pub fn from_origin(origin: Point, size: Size) -> Self {
        Self::new(
            origin.x,
            origin.y,
            origin.x + size.width,
            origin.y + size.height,
        )
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    pub fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    pub fn is_finite(&self) -> bool {
        self.left.is_finite()
            && self.top.is_finite()
            && self.right.is_finite()
            && self.bottom.is_finite()
    }

    /// Edges are finite and ordered
    pub fn is_valid(&self) -> bool {
        self.is_finite() && self.left <= self.right && self.top <= self.bottom
    }

    /// Valid and with a non-zero extent on both axes
    pub fn has_area(&self) -> bool {
        self.is_valid() && self.width() > 0.0 && self.height() > 0.0
    }

    /// Shift the rectangle by a movement delta
    pub fn translate(&self, movement: Movement) -> Rect {
        Rect::new(
            self.left + movement.x,
            self.top + movement.y,
            self.right + movement.x,
            self.bottom + movement.y,
        )
    }

    /// Strict overlap: touching edges do not intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left < other.right
            && self.right > other.left
            && self.top < other.bottom
            && self.bottom > other.top
    }

    /// Overlapping region of two rectangles, if any
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        if !self.intersects(other) {
            return None;
        }
        Some(Rect::new(
            self.left.max(other.left),
            self.top.max(other.top),
            self.right.min(other.right),
            self.bottom.min(other.bottom),
        ))
    }

    /// Smallest rectangle covering both
    pub fn union(&self, other: &Rect) -> Rect {
        Rect::new(
            self.left.min(other.left),
            self.top.min(other.top),
            self.right.max(other.right),
            self.bottom.max(other.bottom),
        )
    }

    /// Round every edge to a fixed number of decimal places
    pub fn rounded(&self, places: u32) -> Rect {
        Rect::new(
            round_to(self.left, places),
            round_to(self.top, places),
            round_to(self.right, places),
            round_to(self.bottom, places),
        )
    }
}

/// Largest precision `round_to` honours; f64 carries about 15 significant digits
pub const MAX_PRECISION: u32 = 15;

/// Round a value to `places` decimal places, capped at [`MAX_PRECISION`]
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places.min(MAX_PRECISION) as i32);
    (value * factor).round() / factor
}

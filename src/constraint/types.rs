//! Constraint values produced fresh for every movement sample

use std::fmt;

use serde::Deserialize;

use crate::geometry::Rect;
use crate::host::ElementId;

/// Tracks where a constraint came from (for diagnostics)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConstraintSource {
    /// Human-readable constraint name
    pub name: String,
    /// Host element the constraint was derived from, if any
    pub element: Option<ElementId>,
}

impl ConstraintSource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            element: None,
        }
    }

    pub fn element(name: impl Into<String>, element: ElementId) -> Self {
        Self {
            name: name.into(),
            element: Some(element),
        }
    }
}

impl fmt::Display for ConstraintSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.element {
            Some(element) => write!(f, "\"{}\" ({})", self.name, element),
            None => write!(f, "\"{}\"", self.name),
        }
    }
}

/// Bounds the element must stay within; absent sides are unconstrained
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AreaConstraint {
    pub left: Option<f64>,
    pub top: Option<f64>,
    pub right: Option<f64>,
    pub bottom: Option<f64>,
    pub source: ConstraintSource,
}

impl AreaConstraint {
    /// An area with every side unconstrained
    pub fn unbounded() -> Self {
        Self {
            source: ConstraintSource::new("area"),
            ..Self::default()
        }
    }

    /// An area bounded on all four sides by a rectangle
    pub fn from_rect(rect: Rect) -> Self {
        Self {
            left: Some(rect.left),
            top: Some(rect.top),
            right: Some(rect.right),
            bottom: Some(rect.bottom),
            source: ConstraintSource::new("area"),
        }
    }

    pub fn with_left(mut self, left: f64) -> Self {
        self.left = Some(left);
        self
    }

    pub fn with_top(mut self, top: f64) -> Self {
        self.top = Some(top);
        self
    }

    pub fn with_right(mut self, right: f64) -> Self {
        self.right = Some(right);
        self
    }

    pub fn with_bottom(mut self, bottom: f64) -> Self {
        self.bottom = Some(bottom);
        self
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.source.name = name.into();
        self
    }

    pub fn with_element(mut self, element: ElementId) -> Self {
        self.source.element = Some(element);
        self
    }

    pub fn bound(&self, side: Side) -> Option<f64> {
        match side {
            Side::Left => self.left,
            Side::Top => self.top,
            Side::Right => self.right,
            Side::Bottom => self.bottom,
        }
    }

    pub fn set_bound(&mut self, side: Side, value: f64) {
        match side {
            Side::Left => self.left = Some(value),
            Side::Top => self.top = Some(value),
            Side::Right => self.right = Some(value),
            Side::Bottom => self.bottom = Some(value),
        }
    }

    /// The area as a rectangle, when all four sides are bounded
    pub fn as_rect(&self) -> Option<Rect> {
        Some(Rect::new(self.left?, self.top?, self.right?, self.bottom?))
    }

    /// True when both bounds of an axis are present and out of order
    pub fn is_inverted(&self) -> bool {
        matches!((self.left, self.right), (Some(l), Some(r)) if l > r)
            || matches!((self.top, self.bottom), (Some(t), Some(b)) if t > b)
    }
}

/// A rectangle the dragged element must not enter
#[derive(Debug, Clone, PartialEq)]
pub struct ObstacleConstraint {
    pub rect: Rect,
    pub source: ConstraintSource,
    /// The obstacle is edge-anchored by the host
    pub is_sticky: bool,
}

impl ObstacleConstraint {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            source: ConstraintSource::new("obstacle"),
            is_sticky: false,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.source.name = name.into();
        self
    }

    pub fn with_element(mut self, element: ElementId) -> Self {
        self.source.element = Some(element);
        self
    }

    pub fn sticky(mut self, is_sticky: bool) -> Self {
        self.is_sticky = is_sticky;
        self
    }
}

/// A constraint in the movement pipeline
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    Area(AreaConstraint),
    Obstacle(ObstacleConstraint),
}

impl Constraint {
    /// Get the source of this constraint
    pub fn source(&self) -> &ConstraintSource {
        match self {
            Constraint::Area(area) => &area.source,
            Constraint::Obstacle(obstacle) => &obstacle.source,
        }
    }
}

impl From<AreaConstraint> for Constraint {
    fn from(area: AreaConstraint) -> Self {
        Constraint::Area(area)
    }
}

impl From<ObstacleConstraint> for Constraint {
    fn from(obstacle: ObstacleConstraint) -> Self {
        Constraint::Obstacle(obstacle)
    }
}

/// One side of a rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Top,
    Right,
    Bottom,
}

impl Side {
    /// Horizontal sides belong to the X axis
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Side::Left | Side::Right)
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Top => write!(f, "top"),
            Side::Right => write!(f, "right"),
            Side::Bottom => write!(f, "bottom"),
        }
    }
}

/// A live bound contributed by a sticky frontier element
#[derive(Debug, Clone, PartialEq)]
pub struct StickyFrontier {
    pub side: Side,
    pub bound: f64,
    pub source: ConstraintSource,
}

impl StickyFrontier {
    pub fn new(side: Side, bound: f64) -> Self {
        Self {
            side,
            bound,
            source: ConstraintSource::new(format!("{} frontier", side)),
        }
    }

    /// Derive the bound from the frontier's scroll-relative rectangle
    ///
    /// A frontier limits the area with the edge that faces into it: a
    /// left frontier contributes its right edge, a top frontier its bottom.
    pub fn from_rect(side: Side, rect: Rect) -> Self {
        let bound = match side {
            Side::Left => rect.right,
            Side::Right => rect.left,
            Side::Top => rect.bottom,
            Side::Bottom => rect.top,
        };
        Self::new(side, bound)
    }

    pub fn with_source(mut self, source: ConstraintSource) -> Self {
        self.source = source;
        self
    }
}

//! Materializes the constraints for one movement sample
//!
//! This is the only part of constraint handling that talks to the host:
//! - Area bounds (scroll surface, a bounding element, or explicit bounds)
//! - Sticky frontiers tightening the area
//! - Obstacles, in the order the host registered them
//!
//! Its output is plain values that the composer resolves without any host.

use tracing::warn;

use crate::geometry::{to_scroll_relative, Axes, Positioning, Rect, ScrollContainer};
use crate::host::{Boundary, ElementGeometry, ElementId, Host, MarkerKind, ScrollState};

use super::sticky::{apply_frontiers, marker_applies};
use super::types::{
    AreaConstraint, Constraint, ConstraintSource, ObstacleConstraint, StickyFrontier,
};

/// Where the base movable area comes from
#[derive(Debug, Clone, PartialEq)]
pub enum AreaSource {
    /// The full scrollable extent of the scroll surface
    Surface,
    /// The scroll-relative rectangle of a host element
    Element(ElementId),
    /// Explicit scroll-relative bounds
    Bounds(AreaConstraint),
}

/// Constraints materialized for one sample
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintSet {
    /// Area after sticky frontiers were applied
    pub area: AreaConstraint,
    pub obstacles: Vec<ObstacleConstraint>,
    /// Frontiers that matched the gesture, for diagnostics
    pub frontiers: Vec<StickyFrontier>,
}

impl ConstraintSet {
    /// Ordered constraint list: the area first, then obstacles in registration order
    pub fn constraints(&self) -> Vec<Constraint> {
        let mut constraints = Vec::with_capacity(self.obstacles.len() + 1);
        constraints.push(Constraint::Area(self.area.clone()));
        constraints.extend(self.obstacles.iter().cloned().map(Constraint::Obstacle));
        constraints
    }

    /// Boundaries for debug overlays
    pub fn boundaries(&self) -> Vec<Boundary> {
        let mut boundaries = Vec::new();
        if let Some(rect) = self.area.as_rect() {
            boundaries.push(Boundary {
                name: self.area.source.name.clone(),
                rect,
            });
        }
        for obstacle in &self.obstacles {
            if obstacle.rect.is_valid() {
                boundaries.push(Boundary {
                    name: obstacle.source.name.clone(),
                    rect: obstacle.rect,
                });
            }
        }
        boundaries
    }
}

/// Collects the constraints of one gesture from the host
pub struct ConstraintCollector<'a, H: Host> {
    host: &'a H,
    container: &'a ElementId,
    dragged: &'a ElementId,
    gesture_name: Option<&'a str>,
    axes: Axes,
    travel: Option<Rect>,
}

impl<'a, H: Host> ConstraintCollector<'a, H> {
    pub fn new(
        host: &'a H,
        container: &'a ElementId,
        dragged: &'a ElementId,
        gesture_name: Option<&'a str>,
        axes: Axes,
    ) -> Self {
        Self {
            host,
            container,
            dragged,
            gesture_name,
            axes,
            travel: None,
        }
    }

    /// Scroll-relative span the dragged element has covered so far
    ///
    /// Stuck obstacles block at their anchored position once that position
    /// falls inside the span; until then they block where the layout put them.
    pub fn with_travel(mut self, travel: Rect) -> Self {
        self.travel = Some(travel);
        self
    }

    /// Collect all constraints for the current scroll state
    pub fn collect(
        &self,
        area: &AreaSource,
        scroll: &ScrollState,
        container: &ScrollContainer,
    ) -> ConstraintSet {
        // 1. Base area
        let base = self.collect_area(area, scroll, container);

        // 2. Frontiers tighten it
        let frontiers = self.collect_frontiers(container);
        let area = apply_frontiers(&base, &frontiers, self.axes);

        // 3. Obstacles
        let obstacles = self.collect_obstacles(container);

        ConstraintSet {
            area,
            obstacles,
            frontiers,
        }
    }

    fn collect_area(
        &self,
        area: &AreaSource,
        scroll: &ScrollState,
        container: &ScrollContainer,
    ) -> AreaConstraint {
        match area {
            AreaSource::Surface => {
                AreaConstraint::from_rect(scroll.content_rect()).with_element(self.container.clone())
            }
            AreaSource::Element(id) => {
                let rect = match self.host.geometry(id) {
                    Some(geometry) => {
                        to_scroll_relative(geometry.rect, container, geometry.positioning, false)
                    }
                    None => {
                        warn!(element = %id, "area element has no geometry; leaving area unbounded");
                        return AreaConstraint::unbounded().with_element(id.clone());
                    }
                };
                AreaConstraint::from_rect(rect).with_element(id.clone())
            }
            AreaSource::Bounds(bounds) => bounds.clone(),
        }
    }

    fn collect_frontiers(&self, container: &ScrollContainer) -> Vec<StickyFrontier> {
        let mut frontiers = Vec::new();
        for marked in self.host.discover(self.container, MarkerKind::Frontier) {
            if marked.element == *self.dragged
                || !marker_applies(marked.name.as_deref(), self.gesture_name)
            {
                continue;
            }
            let Some(side) = marked.side else {
                warn!(element = %marked.element, "frontier marker without a side; ignoring it");
                continue;
            };
            let Some(geometry) = self.host.geometry(&marked.element) else {
                warn!(element = %marked.element, "frontier has no geometry; ignoring it");
                continue;
            };

            // live frontiers follow their anchored position
            let rect = to_scroll_relative(geometry.rect, container, geometry.positioning, false);
            let source = ConstraintSource::element(
                format!("{} frontier {}", side, marked.element.as_str()),
                marked.element.clone(),
            );
            frontiers.push(StickyFrontier::from_rect(side, rect).with_source(source));
        }
        frontiers
    }

    fn collect_obstacles(&self, container: &ScrollContainer) -> Vec<ObstacleConstraint> {
        let mut obstacles = Vec::new();
        for marked in self.host.discover(self.container, MarkerKind::Obstacle) {
            if marked.element == *self.dragged
                || !marker_applies(marked.name.as_deref(), self.gesture_name)
            {
                continue;
            }

            let (rect, is_sticky) = match self.host.geometry(&marked.element) {
                Some(geometry) => {
                    let is_sticky = matches!(geometry.positioning, Positioning::Sticky(_));
                    (self.obstacle_rect(&geometry, container), is_sticky)
                }
                None => (Rect::new(f64::NAN, f64::NAN, f64::NAN, f64::NAN), false),
            };

            obstacles.push(
                ObstacleConstraint::new(rect)
                    .named(marked.element.as_str())
                    .with_element(marked.element.clone())
                    .sticky(is_sticky),
            );
        }
        obstacles
    }

    fn obstacle_rect(&self, geometry: &ElementGeometry, container: &ScrollContainer) -> Rect {
        let natural = to_scroll_relative(geometry.rect, container, geometry.positioning, true);
        if !matches!(geometry.positioning, Positioning::Sticky(_)) {
            return natural;
        }
        let anchored = to_scroll_relative(geometry.rect, container, geometry.positioning, false);
        match self.travel {
            Some(travel) if anchored != natural && travel.intersects(&anchored) => anchored,
            _ => natural,
        }
    }
}

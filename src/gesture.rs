//! Drag gesture lifecycle
//!
//! A [`Gesture`] owns the only mutable state of a drag. Every pointer move,
//! scroll, or programmatic move is handled as one synchronous pass:
//! materialize the constraints for the current scroll state, resolve the
//! requested movement against them, and fold the result into the gesture's
//! accumulator. Releasing consumes the gesture.

use std::cell::Cell;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::constraint::{
    composer, lint, AreaSource, ConstraintCollector, ConstraintSet, EngineConfig, LintWarning,
    Resolution, ResolveContext,
};
use crate::error::DragError;
use crate::geometry::{to_scroll_relative, Axes, Movement, Point, Positioning, Rect};
use crate::host::{ElementId, Host, ScrollState, VisualizationSink};

/// What to drag, inside which scroll surface, and how
#[derive(Debug, Clone, PartialEq)]
pub struct GestureSpec {
    pub element: ElementId,
    pub container: ElementId,
    pub axes: Axes,
    /// Name used to select named obstacle and frontier markers
    pub name: Option<String>,
    pub area: AreaSource,
}

impl GestureSpec {
    pub fn new(element: ElementId, container: ElementId) -> Self {
        Self {
            element,
            container,
            axes: Axes::BOTH,
            name: None,
            area: AreaSource::Surface,
        }
    }

    pub fn with_axes(mut self, axes: Axes) -> Self {
        self.axes = axes;
        self
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_area(mut self, area: AreaSource) -> Self {
        self.area = area;
        self
    }
}

/// Mutable record of one drag, all rectangles scroll-relative
#[derive(Debug, Clone, PartialEq)]
pub struct GestureState {
    /// Element rectangle when the gesture started
    pub start: Rect,
    /// Element rectangle after the last sample
    pub current: Rect,
    /// Corrected movement applied since the start
    pub cumulative: Movement,
    /// Bounding box of every rectangle the element has occupied
    pub travel: Rect,
    pub axes: Axes,
    pub scroll_at_start: Point,
    pub name: Option<String>,
}

/// Immutable input of one sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Pointer offset since the grab, in viewport space
    pub pointer: Movement,
    /// Scroll offset of the surface
    pub scroll: Point,
}

impl Sample {
    /// Movement still needed to bring the element under the pointer
    pub fn requested(&self, state: &GestureState) -> Movement {
        let scrolled = Movement::new(
            self.scroll.x - state.scroll_at_start.x,
            self.scroll.y - state.scroll_at_start.y,
        );
        self.pointer + scrolled - state.cumulative
    }
}

/// Result of handling one sample
#[derive(Debug, Clone, PartialEq)]
pub struct SampleOutcome {
    pub resolution: Resolution,
    /// Element rectangle after the corrected movement
    pub rect: Rect,
    /// Corrected movement since the start
    pub cumulative: Movement,
    /// Diagnostics, when enabled in the config
    pub warnings: Vec<LintWarning>,
}

/// Flag that drops scroll events raised while a scroll is being handled
///
/// Clones share the flag, so a host can check whether a scroll it is about
/// to report was caused by the gesture's own handling.
#[derive(Debug, Clone, Default)]
pub struct ScrollGuard(Rc<Cell<bool>>);

impl ScrollGuard {
    pub fn is_active(&self) -> bool {
        self.0.get()
    }

    /// Mark scroll handling as in progress, or `None` if it already is
    pub fn enter(&self) -> Option<ScrollGuardToken> {
        if self.0.replace(true) {
            None
        } else {
            Some(ScrollGuardToken(self.0.clone()))
        }
    }
}

/// Clears the scroll guard when dropped
#[derive(Debug)]
pub struct ScrollGuardToken(Rc<Cell<bool>>);

impl Drop for ScrollGuardToken {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// An active drag gesture
pub struct Gesture<H: Host> {
    host: H,
    spec: GestureSpec,
    config: EngineConfig,
    state: GestureState,
    pointer: Movement,
    scroll: ScrollState,
    container_viewport: Rect,
    guard: ScrollGuard,
    sink: Option<Box<dyn VisualizationSink>>,
}

impl<H: Host> Gesture<H> {
    /// Start a gesture, checking every precondition up front
    pub fn grab(host: H, spec: GestureSpec, config: EngineConfig) -> Result<Self, DragError> {
        if !spec.axes.any() {
            return Err(DragError::NoDraggableAxis);
        }

        let scroll = host
            .scroll_state(&spec.container)
            .ok_or_else(|| DragError::missing_scroll_state(&spec.container))?;

        let container_viewport = if scroll.is_document {
            Rect::default()
        } else {
            let geometry = host
                .geometry(&spec.container)
                .ok_or_else(|| DragError::missing_geometry(&spec.container))?;
            if !geometry.rect.is_valid() {
                return Err(DragError::unresolved_geometry(&spec.container));
            }
            geometry.rect
        };

        let geometry = host
            .geometry(&spec.element)
            .ok_or_else(|| DragError::missing_geometry(&spec.element))?;
        if !geometry.rect.is_valid() {
            return Err(DragError::unresolved_geometry(&spec.element));
        }
        match geometry.positioning {
            Positioning::Normal => {}
            Positioning::Fixed if scroll.is_document => {}
            Positioning::Fixed => {
                return Err(DragError::unsupported_positioning(
                    &spec.element,
                    "viewport-fixed elements cannot be tracked inside a nested scroll surface",
                ))
            }
            Positioning::Sticky(_) => {
                return Err(DragError::unsupported_positioning(
                    &spec.element,
                    "edge-anchored elements cannot be dragged",
                ))
            }
        }

        let container = scroll.container(container_viewport);
        let start = to_scroll_relative(geometry.rect, &container, geometry.positioning, false);
        debug!(element = %spec.element, ?start, "gesture grabbed");

        let state = GestureState {
            start,
            current: start,
            cumulative: Movement::zero(),
            travel: start,
            axes: spec.axes,
            scroll_at_start: Point::new(scroll.scroll_left, scroll.scroll_top),
            name: spec.name.clone(),
        };

        Ok(Self {
            host,
            spec,
            config,
            state,
            pointer: Movement::zero(),
            scroll,
            container_viewport,
            guard: ScrollGuard::default(),
            sink: None,
        })
    }

    /// Attach a sink for boundary overlays (used when `markers` is enabled)
    pub fn with_sink(mut self, sink: Box<dyn VisualizationSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    pub fn spec(&self) -> &GestureSpec {
        &self.spec
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Shared handle on the scroll re-entrancy flag
    pub fn scroll_guard(&self) -> ScrollGuard {
        self.guard.clone()
    }

    /// Constraints for the current scroll state, without resolving anything
    pub fn materialize(&self) -> ConstraintSet {
        let container = self.scroll.container(self.container_viewport);
        ConstraintCollector::new(
            &self.host,
            &self.spec.container,
            &self.spec.element,
            self.spec.name.as_deref(),
            self.state.axes,
        )
        .with_travel(self.state.travel)
        .collect(&self.spec.area, &self.scroll, &container)
    }

    /// Pointer moved; `offset` is its displacement since the grab
    pub fn pointer_move(&mut self, offset: Movement) -> SampleOutcome {
        self.pointer = offset;
        self.process()
    }

    /// Move the element programmatically by `delta` from where it is now
    pub fn move_by(&mut self, delta: Movement) -> SampleOutcome {
        let scrolled = Movement::new(
            self.scroll.scroll_left - self.state.scroll_at_start.x,
            self.scroll.scroll_top - self.state.scroll_at_start.y,
        );
        self.pointer = self.state.cumulative - scrolled + delta;
        self.process()
    }

    /// The scroll surface scrolled; re-resolve so the element follows the pointer
    ///
    /// Returns `None` for a re-entrant call or when the host lost the scroll state.
    pub fn scroll(&mut self) -> Option<SampleOutcome> {
        let Some(_token) = self.guard.enter() else {
            debug!("ignoring re-entrant scroll");
            return None;
        };

        match self.host.scroll_state(&self.spec.container) {
            Some(scroll) => self.scroll = scroll,
            None => {
                warn!(surface = %self.spec.container, "scroll surface lost its scroll state");
                return None;
            }
        }
        Some(self.process())
    }

    /// End the gesture and return its final state
    pub fn release(mut self) -> GestureState {
        if let Some(sink) = self.sink.as_mut() {
            sink.clear();
        }
        debug!(
            element = %self.spec.element,
            x = self.state.cumulative.x,
            y = self.state.cumulative.y,
            "gesture released"
        );
        self.state
    }

    fn process(&mut self) -> SampleOutcome {
        let sample = Sample {
            pointer: self.pointer,
            scroll: Point::new(self.scroll.scroll_left, self.scroll.scroll_top),
        };
        let set = self.materialize();
        let constraints = set.constraints();

        let warnings = if self.config.diagnostics {
            let warnings = lint::check(&constraints, self.state.start.size());
            lint::report(&warnings);
            warnings
        } else {
            Vec::new()
        };

        let requested = sample.requested(&self.state);
        let ctx = ResolveContext::new(self.state.current, self.state.axes)
            .with_precision(self.config.precision);
        let resolution = composer::resolve(requested, &constraints, &ctx);

        self.state.cumulative = self.state.cumulative + resolution.movement;
        self.state.current = self.state.start.translate(self.state.cumulative);
        self.state.travel = self.state.travel.union(&self.state.current);
        debug!(
            requested_x = resolution.requested.x,
            requested_y = resolution.requested.y,
            x = resolution.movement.x,
            y = resolution.movement.y,
            x_source = resolution.x_source.as_deref().unwrap_or("-"),
            y_source = resolution.y_source.as_deref().unwrap_or("-"),
            "sample resolved"
        );

        if self.config.markers {
            if let Some(sink) = self.sink.as_mut() {
                sink.show(&set.boundaries(), self.state.current);
            }
        }

        SampleOutcome {
            resolution,
            rect: self.state.current,
            cumulative: self.state.cumulative,
            warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_guard_blocks_reentry() {
        let guard = ScrollGuard::default();
        let token = guard.enter();
        assert!(token.is_some());
        assert!(guard.is_active());
        assert!(guard.enter().is_none());
        drop(token);
        assert!(!guard.is_active());
        assert!(guard.enter().is_some());
    }

    #[test]
    fn test_sample_requested_includes_scroll() {
        let state = GestureState {
            start: Rect::new(0.0, 0.0, 10.0, 10.0),
            current: Rect::new(5.0, 0.0, 15.0, 10.0),
            cumulative: Movement::new(5.0, 0.0),
            travel: Rect::new(0.0, 0.0, 15.0, 10.0),
            axes: Axes::BOTH,
            scroll_at_start: Point::new(0.0, 100.0),
            name: None,
        };
        let sample = Sample {
            pointer: Movement::new(10.0, 0.0),
            scroll: Point::new(0.0, 130.0),
        };
        assert_eq!(sample.requested(&state), Movement::new(5.0, 30.0));
    }
}
